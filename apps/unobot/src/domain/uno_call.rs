//! "UNO!" declarations, miscall penalties and callouts.
//!
//! A player who drops to one card is `Tracked`. If the turn comes all the
//! way back to them without a declaration they become `Notified`, and only
//! then can another player call them out. Declaring with one card makes a
//! player `Safe`; declaring with more costs two cards and leaves them
//! `Penalized` until they declare again on one card. Repeat declarations
//! while penalized are refused without a second penalty.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::errors::{RuleError, UnoCallRejection};
use super::state::Session;

pub const PENALTY_CARDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Tracked,
    Notified,
    Safe,
    Penalized,
}

/// Result of a player's own declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    Declared,
    /// Declared while holding more than one card; these are the penalty cards.
    Miscalled(Vec<Card>),
}

/// Update every player's status after a completed turn action.
pub fn monitor_status(session: &mut Session) {
    let holder = session.turn_holder().map(str::to_owned);
    for player in session.players.values_mut() {
        let cards = player.hand.len();
        player.call_status = match player.call_status {
            Some(CallStatus::Penalized) => Some(CallStatus::Penalized),
            _ if cards > 1 => None,
            None if cards == 1 => Some(CallStatus::Tracked),
            Some(CallStatus::Tracked) if holder.as_deref() == Some(player.id.as_str()) => {
                Some(CallStatus::Notified)
            }
            other => other,
        };
    }
}

/// `player_id` declares UNO.
pub fn call<R: Rng + ?Sized>(
    session: &mut Session,
    player_id: &str,
    rng: &mut R,
) -> Result<CallResult, RuleError> {
    let player = session.player(player_id).ok_or(RuleError::NotParticipant)?;
    match player.call_status {
        Some(CallStatus::Safe) => {
            return Err(RuleError::UnoCallInvalid(UnoCallRejection::AlreadySafe));
        }
        Some(CallStatus::Penalized) if player.hand.len() > 1 => {
            return Err(RuleError::UnoCallInvalid(UnoCallRejection::AlreadyPenalized));
        }
        _ => {}
    }

    if player.hand.len() > 1 {
        let drawn = session.deal_to(player_id, PENALTY_CARDS, rng);
        if let Some(player) = session.player_mut(player_id) {
            player.call_status = Some(CallStatus::Penalized);
        }
        return Ok(CallResult::Miscalled(drawn));
    }

    if let Some(player) = session.player_mut(player_id) {
        player.call_status = Some(CallStatus::Safe);
    }
    Ok(CallResult::Declared)
}

/// `accuser` calls out `target` for not declaring. Returns the cards drawn.
pub fn callout<R: Rng + ?Sized>(
    session: &mut Session,
    accuser: &str,
    target: &str,
    rng: &mut R,
) -> Result<Vec<Card>, RuleError> {
    if !session.is_seated(accuser) {
        return Err(RuleError::NotParticipant);
    }
    if accuser == target {
        return Err(RuleError::invalid("You can't call yourself out."));
    }
    let victim = session
        .player(target)
        .ok_or(RuleError::UnoCallInvalid(UnoCallRejection::TargetNotPlaying))?;

    let rejection = match victim.call_status {
        Some(CallStatus::Notified) => None,
        Some(CallStatus::Safe) => Some(UnoCallRejection::TargetSafe),
        Some(CallStatus::Tracked) => Some(UnoCallRejection::GracePeriod),
        Some(CallStatus::Penalized) => Some(UnoCallRejection::TargetPenalized),
        None if victim.hand.len() > 1 => Some(UnoCallRejection::MoreThanOneCard),
        None => Some(UnoCallRejection::NotTracked),
    };
    if let Some(reason) = rejection {
        return Err(RuleError::UnoCallInvalid(reason));
    }

    let drawn = session.deal_to(target, PENALTY_CARDS, rng);
    if let Some(victim) = session.player_mut(target) {
        victim.call_status = None;
    }
    Ok(drawn)
}
