//! Turn state machine: who acts next and what they owe.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cards_types::Face;
use super::errors::RuleError;
use super::state::{Direction, PlayerId, Session};

/// Starter flips allowed before falling back to a scan of the draw pile.
pub const MAX_STARTER_REDRAWS: usize = 16;

/// What the turn holder must do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnAction {
    Play,
    ForcedDraw { count: u8 },
    /// `pending_draw` is 4 after a wild draw four, 0 after a plain wild.
    ChooseColor { pending_draw: u8 },
    DrawOneDecision { card_index: usize },
    /// Transition in progress; nothing is allowed.
    Frozen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub player_id: PlayerId,
    pub action: TurnAction,
}

impl Turn {
    pub fn new(player_id: impl Into<PlayerId>, action: TurnAction) -> Self {
        Self {
            player_id: player_id.into(),
            action,
        }
    }
}

/// Kinds of player requests checked against the pending action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    Play,
    Draw,
    Keep,
    Color,
}

impl TurnAction {
    pub fn allows(self, class: ActionClass) -> bool {
        match self {
            TurnAction::Play => matches!(class, ActionClass::Play | ActionClass::Draw),
            TurnAction::ForcedDraw { .. } => class == ActionClass::Draw,
            TurnAction::ChooseColor { .. } => class == ActionClass::Color,
            TurnAction::DrawOneDecision { .. } => {
                matches!(class, ActionClass::Play | ActionClass::Keep)
            }
            TurnAction::Frozen => false,
        }
    }

    /// Reminder shown to a holder who tried something else.
    pub fn instruction(self) -> &'static str {
        match self {
            TurnAction::Play => "You need to play a card!",
            TurnAction::ForcedDraw { .. } => "You need to draw cards!",
            TurnAction::ChooseColor { .. } => "You need to choose a card color!",
            TurnAction::DrawOneDecision { .. } => "You need to play or keep the card you drew!",
            TurnAction::Frozen => "Hold on, this turn is still being resolved.",
        }
    }
}

/// Verify `player_id` may perform `class` now; returns the pending action.
pub fn check_action(
    session: &Session,
    player_id: &str,
    class: ActionClass,
) -> Result<TurnAction, RuleError> {
    if !session.is_seated(player_id) {
        return Err(RuleError::NotParticipant);
    }
    let turn = session.turn.as_ref().ok_or(RuleError::RoundNotStarted)?;
    if turn.player_id != player_id {
        return Err(RuleError::WrongTurn);
    }
    if !turn.action.allows(class) {
        return Err(RuleError::WrongAction {
            pending: turn.action,
        });
    }
    Ok(turn.action)
}

/// Lock the current holder's turn while a transition is applied.
pub fn freeze(session: &mut Session) {
    if let Some(turn) = session.turn.as_mut() {
        turn.action = TurnAction::Frozen;
    }
}

/// What the holder just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// A card went onto the discard pile; its face drives the transition.
    Played,
    ColorChosen { pending_draw: u8 },
    ForcedDrawn,
    DrewOne,
    Kept,
}

/// Move the turn forward after `event`.
pub fn advance(session: &mut Session, event: TurnEvent) {
    let Some(holder) = session.turn_holder().map(str::to_owned) else {
        return;
    };

    let next = match event {
        TurnEvent::Played => return advance_after_play(session, holder),
        TurnEvent::ColorChosen { pending_draw } if pending_draw > 0 => {
            let next = session.player_after(&holder, 1).unwrap_or(holder);
            Turn::new(next, TurnAction::ForcedDraw { count: pending_draw })
        }
        TurnEvent::DrewOne => {
            let card_index = session.hand(&holder).len().saturating_sub(1);
            Turn::new(holder, TurnAction::DrawOneDecision { card_index })
        }
        TurnEvent::ColorChosen { .. } | TurnEvent::ForcedDrawn | TurnEvent::Kept => {
            let next = session.player_after(&holder, 1).unwrap_or(holder);
            Turn::new(next, TurnAction::Play)
        }
    };
    session.turn = Some(next);
}

fn advance_after_play(session: &mut Session, holder: PlayerId) {
    let Some(top) = session.top_card().copied() else {
        return;
    };

    let turn = match top.face {
        Face::WildDrawFour => Turn::new(holder, TurnAction::ChooseColor { pending_draw: 4 }),
        Face::Wild => Turn::new(holder, TurnAction::ChooseColor { pending_draw: 0 }),
        Face::DrawTwo => {
            let next = session.player_after(&holder, 1).unwrap_or(holder);
            Turn::new(next, TurnAction::ForcedDraw { count: 2 })
        }
        Face::Skip => {
            let next = session.player_after(&holder, 2).unwrap_or(holder);
            Turn::new(next, TurnAction::Play)
        }
        Face::Reverse => {
            session.direction = session.direction.flipped();
            if session.player_count() == 2 {
                Turn::new(holder, TurnAction::Play)
            } else {
                let next = session.player_after(&holder, 1).unwrap_or(holder);
                Turn::new(next, TurnAction::Play)
            }
        }
        Face::Number(_) => {
            let next = session.player_after(&holder, 1).unwrap_or(holder);
            Turn::new(next, TurnAction::Play)
        }
    };
    session.turn = Some(turn);
}

/// Resolve the opening turn from the freshly flipped starter card.
///
/// A wild draw four starter goes back into the pile and a new one is flipped,
/// at most [`MAX_STARTER_REDRAWS`] times. After that the draw pile is scanned
/// for any other card; a table holding nothing else opens like a plain wild.
pub fn set_first_turn<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) {
    let Some(first) = session.seats.first().cloned() else {
        session.turn = None;
        return;
    };

    for _ in 0..MAX_STARTER_REDRAWS {
        if session.top_card().map(|c| c.face) != Some(Face::WildDrawFour) {
            break;
        }
        session.deck.return_top(rng);
        session.deck.flip_starter();
    }
    if session.top_card().map(|c| c.face) == Some(Face::WildDrawFour) {
        swap_in_playable_starter(session);
    }

    let Some(starter) = session.top_card().copied() else {
        session.turn = Some(Turn::new(first, TurnAction::Play));
        return;
    };

    let turn = match starter.face {
        Face::Wild | Face::WildDrawFour => {
            Turn::new(first, TurnAction::ChooseColor { pending_draw: 0 })
        }
        Face::DrawTwo => {
            session.deal_to(&first, 2, rng);
            let second = session.seats[session.seat_after(0, 1)].clone();
            Turn::new(second, TurnAction::Play)
        }
        Face::Skip => {
            let second = session.seats[session.seat_after(0, 1)].clone();
            Turn::new(second, TurnAction::Play)
        }
        Face::Reverse => {
            session.direction = Direction::Backward;
            let last = session.seats[session.seat_after(0, 1)].clone();
            Turn::new(last, TurnAction::Play)
        }
        Face::Number(_) => Turn::new(first, TurnAction::Play),
    };
    session.turn = Some(turn);
}

fn swap_in_playable_starter(session: &mut Session) {
    let pile = &mut session.deck.draw_pile;
    let Some(index) = pile.iter().position(|c| c.face != Face::WildDrawFour) else {
        return;
    };
    let replacement = pile.swap_remove(index);
    if let Some(starter) = session.deck.discard_pile.pop() {
        session.deck.draw_pile.push(starter.reverted());
    }
    session.deck.discard_pile.push(replacement);
}
