//! Rule-level rejections raised by the game domain.
//!
//! Every variant is recoverable: the service layer turns it into a negative
//! outcome and nothing is persisted.

use thiserror::Error;

use super::cards_types::Card;
use super::turns::TurnAction;

/// Prefix for malformed references (bad card text, out-of-range index).
pub const INVALID_INPUT_PREFIX: &str = ":no_entry_sign: Invalid input. ";
/// Prefix for well-formed requests the rules do not allow right now.
pub const NO_ACTION_PREFIX: &str = ":no_entry_sign: Can't do that. ";
/// Prefix for requests that cannot apply to this session at all.
pub const ERROR_PREFIX: &str = ":no_entry_sign: ";

/// Why an UNO declaration or callout was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnoCallRejection {
    /// The caller already declared.
    AlreadySafe,
    /// The caller already paid a miscall penalty and still holds several cards.
    AlreadyPenalized,
    /// The target already declared.
    TargetSafe,
    /// The target reached one card but the grace cycle has not elapsed.
    GracePeriod,
    /// The target already paid a miscall penalty.
    TargetPenalized,
    /// The target holds more than one card.
    MoreThanOneCard,
    /// The target has no tracked status.
    NotTracked,
    /// The mentioned user is not seated in this session.
    TargetNotPlaying,
}

impl UnoCallRejection {
    pub fn message(self) -> &'static str {
        match self {
            UnoCallRejection::AlreadySafe => "You are already safe!",
            UnoCallRejection::AlreadyPenalized => "You already took a penalty for that.",
            UnoCallRejection::TargetSafe => "That player is safe!",
            UnoCallRejection::GracePeriod => "Give them a moment, they can still call UNO!",
            UnoCallRejection::TargetPenalized => "That player already took a penalty.",
            UnoCallRejection::MoreThanOneCard => "That player has more than one card.",
            UnoCallRejection::NotTracked => "That player is not down to one card.",
            UnoCallRejection::TargetNotPlaying => "That player is not in this game.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("actor is not a participant")]
    NotParticipant,
    #[error("actor does not hold the turn")]
    WrongTurn,
    #[error("action not allowed while turn is {pending:?}")]
    WrongAction { pending: TurnAction },
    #[error("no session in this channel")]
    NoActiveSession,
    #[error("session exists but no round is running")]
    RoundNotStarted,
    #[error("session already seats {max} players")]
    SessionFull { max: usize },
    #[error("actor already plays in channel {channel_id}")]
    AlreadyJoined { channel_id: String, here: bool },
    #[error("actor is not seated in this session")]
    AlreadyLeft,
    #[error("{card} does not match top card {top}")]
    NonMatchingCard { card: Card, top: Card },
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("uno call rejected: {0:?}")]
    UnoCallInvalid(UnoCallRejection),
}

impl RuleError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    /// Chat-facing text for this rejection.
    pub fn user_message(&self) -> String {
        match self {
            RuleError::InvalidInput(detail) => format!("{INVALID_INPUT_PREFIX}{detail}"),
            RuleError::NotParticipant => format!("{ERROR_PREFIX}You need to join the game!"),
            RuleError::WrongTurn => format!("{NO_ACTION_PREFIX}It's not your turn!"),
            RuleError::WrongAction { pending } => {
                format!("{NO_ACTION_PREFIX}{}", pending.instruction())
            }
            RuleError::NoActiveSession => {
                format!("{ERROR_PREFIX}There is no running UNO session here. Start one!")
            }
            RuleError::RoundNotStarted => format!("{ERROR_PREFIX}Game has not started yet!"),
            RuleError::SessionFull { .. } => format!("{ERROR_PREFIX}This session is full!"),
            RuleError::AlreadyJoined { here: true, .. } => {
                format!("{NO_ACTION_PREFIX}You're currently playing here!")
            }
            RuleError::AlreadyJoined { channel_id, .. } => {
                format!("{NO_ACTION_PREFIX}You're currently playing UNO in <#{channel_id}>!")
            }
            RuleError::AlreadyLeft => format!("{ERROR_PREFIX}You're not in this game."),
            RuleError::NonMatchingCard { .. } => {
                format!("{NO_ACTION_PREFIX}That does not match the top card.")
            }
            RuleError::CardNotInHand(_) => format!("{NO_ACTION_PREFIX}You don't have that card."),
            RuleError::UnoCallInvalid(reason) => format!("{NO_ACTION_PREFIX}{}", reason.message()),
        }
    }
}
