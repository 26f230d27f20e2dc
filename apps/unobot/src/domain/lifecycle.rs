//! Roster changes and round start/stop/pause.

use rand::Rng;

use super::cards_types::Card;
use super::dealing::Deck;
use super::errors::RuleError;
use super::state::{Direction, Player, PlayerId, Session};
use super::turns::{set_first_turn, Turn, TurnAction};

/// What seating a new player did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinEffect {
    /// Seated; nothing else changed.
    Seated,
    /// Second player seated; the session now waits for its start trigger.
    RoundPending,
    /// Seated mid-round with this fresh hand.
    DealtIn(Vec<Card>),
}

/// What removing a player did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveEffect {
    Left,
    /// Fewer than two players remained, so the round was stopped.
    RoundStopped,
    /// The leaver held the turn; it now belongs to this player.
    TurnPassed(PlayerId),
}

/// Seat a player at the end of the rotation.
pub fn add_player<R: Rng + ?Sized>(
    session: &mut Session,
    player_id: &str,
    name: &str,
    hand_size: usize,
    rng: &mut R,
) -> Result<JoinEffect, RuleError> {
    if session.is_seated(player_id) {
        return Err(RuleError::AlreadyJoined {
            channel_id: session.channel_id.clone(),
            here: true,
        });
    }

    session.seats.push(player_id.to_owned());
    session
        .players
        .insert(player_id.to_owned(), Player::new(player_id, name));

    if session.active {
        let hand = session.deal_to(player_id, hand_size, rng);
        return Ok(JoinEffect::DealtIn(hand));
    }
    if session.player_count() >= 2 && !session.intermission {
        pause_session(session);
        return Ok(JoinEffect::RoundPending);
    }
    Ok(JoinEffect::Seated)
}

/// Unseat a player. Their hand goes under the discard pile; scores stay.
pub fn remove_player(session: &mut Session, player_id: &str) -> Result<LeaveEffect, RuleError> {
    let seat = session.seat_of(player_id).ok_or(RuleError::AlreadyLeft)?;
    let held_turn = session.turn_holder() == Some(player_id);

    session.seats.remove(seat);
    let leaver = session.players.remove(player_id);

    if !session.active {
        return Ok(LeaveEffect::Left);
    }
    if session.player_count() < 2 {
        stop_session(session);
        return Ok(LeaveEffect::RoundStopped);
    }

    if let Some(leaver) = leaver {
        session.deck.bury(leaver.hand);
    }

    if !held_turn {
        return Ok(LeaveEffect::Left);
    }

    // Seats after the leaver shifted down by one.
    let n = session.player_count();
    let next_seat = match session.direction {
        Direction::Forward => seat % n,
        Direction::Backward => (seat + n - 1) % n,
    };
    let next = session.seats[next_seat].clone();
    let action = match session.top_card() {
        Some(top) if top.is_uncolored_wild() => TurnAction::ChooseColor { pending_draw: 0 },
        _ => TurnAction::Play,
    };
    session.turn = Some(Turn::new(next.clone(), action));
    Ok(LeaveEffect::TurnPassed(next))
}

/// Deal a new round to every seated player and resolve the opening turn.
pub fn start_session<R: Rng + ?Sized>(session: &mut Session, hand_size: usize, rng: &mut R) {
    session.deck = Deck::fresh(rng);
    session.direction = Direction::Forward;
    session.turn = None;

    for player in session.players.values_mut() {
        player.hand.clear();
        player.call_status = None;
    }
    for player_id in session.seats.clone() {
        session.deal_to(&player_id, hand_size, rng);
    }

    session.deck.flip_starter();
    set_first_turn(session, rng);
    session.active = true;
    session.intermission = false;
}

/// End the round and clear everything except the roster and scores.
pub fn stop_session(session: &mut Session) {
    session.active = false;
    session.intermission = false;
    session.deck = Deck::default();
    session.direction = Direction::Forward;
    session.turn = None;
    for player in session.players.values_mut() {
        player.hand.clear();
        player.call_status = None;
    }
}

/// Park the session between rounds.
pub fn pause_session(session: &mut Session) {
    session.active = false;
    session.intermission = true;
}
