//! Turn moves: play, choose a color, draw, keep.
//!
//! Callers verify ownership with [`check_action`](super::turns::check_action)
//! first and pass the pending action it returned. Each move freezes the turn,
//! mutates hands and piles, then advances the turn machine.

use rand::Rng;

use super::cards_logic::card_matches;
use super::cards_types::{Card, Color};
use super::errors::RuleError;
use super::state::Session;
use super::turns::{advance, freeze, TurnAction, TurnEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedCard {
    pub card: Card,
    /// The play emptied the player's hand.
    pub went_out: bool,
}

/// Play the card at `index` (0-based) from `player_id`'s hand.
///
/// A play that empties the hand leaves the turn frozen on the winner; the
/// round is over and the caller scores it.
pub fn play_card(
    session: &mut Session,
    player_id: &str,
    index: usize,
) -> Result<PlayedCard, RuleError> {
    let card = *session
        .hand(player_id)
        .get(index)
        .ok_or_else(|| RuleError::invalid("Invalid card index."))?;
    let top = *session.top_card().ok_or(RuleError::RoundNotStarted)?;
    if !card_matches(&card, &top) {
        return Err(RuleError::NonMatchingCard { card, top });
    }

    freeze(session);
    let went_out = match session.player_mut(player_id) {
        Some(player) => {
            player.hand.remove(index);
            player.hand.is_empty()
        }
        None => return Err(RuleError::NotParticipant),
    };
    session.deck.discard(card);

    if !went_out {
        advance(session, TurnEvent::Played);
    }
    Ok(PlayedCard { card, went_out })
}

/// Give the wild on top of the discard pile its color.
pub fn choose_color(session: &mut Session, pending: TurnAction, color: Color) {
    let pending_draw = match pending {
        TurnAction::ChooseColor { pending_draw } => pending_draw,
        _ => 0,
    };
    freeze(session);
    session.deck.colorize_top(color);
    advance(session, TurnEvent::ColorChosen { pending_draw });
}

/// Draw what the pending action asks for: the forced count, or one card.
pub fn draw_cards<R: Rng + ?Sized>(
    session: &mut Session,
    player_id: &str,
    pending: TurnAction,
    rng: &mut R,
) -> Vec<Card> {
    let (count, event) = match pending {
        TurnAction::ForcedDraw { count } => (usize::from(count), TurnEvent::ForcedDrawn),
        _ => (1, TurnEvent::DrewOne),
    };
    freeze(session);
    let drawn = session.deal_to(player_id, count, rng);
    // Nothing left to draw: there is no drawn card to decide on.
    let event = match event {
        TurnEvent::DrewOne if drawn.is_empty() => TurnEvent::Kept,
        other => other,
    };
    advance(session, event);
    drawn
}

/// Keep the card just drawn and pass the turn.
pub fn keep_card(session: &mut Session) {
    freeze(session);
    advance(session, TurnEvent::Kept);
}
