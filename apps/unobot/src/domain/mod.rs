//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod errors;
pub mod lifecycle;
pub mod moves;
pub mod scoring;
pub mod state;
pub mod turns;
pub mod uno_call;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_deck;
#[cfg(test)]
mod tests_props_matching;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_turns;
#[cfg(test)]
mod tests_uno_call;

// Re-exports for ergonomics
pub use cards_logic::{card_display_name, card_matches, card_points, format_hand};
pub use cards_parsing::{lookup_card, lookup_color};
pub use cards_types::{Card, Color, Face};
pub use dealing::{Deck, DECK_SIZE};
pub use errors::{RuleError, UnoCallRejection};
pub use state::{Direction, Player, PlayerId, Session};
pub use turns::{ActionClass, Turn, TurnAction, TurnEvent};
pub use uno_call::CallStatus;
