// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::dealing::{card_kinds, standard_deck};
use crate::domain::{Card, Color, Face};

pub fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Red),
        Just(Color::Yellow),
        Just(Color::Green),
        Just(Color::Blue),
    ]
}

/// Any card kind a hand can hold (wilds uncolored).
pub fn card() -> impl Strategy<Value = Card> {
    let kinds = card_kinds();
    (0..kinds.len()).prop_map(move |i| kinds[i])
}

/// Any card that can lie on the discard top, including chosen-color wilds.
pub fn top_card() -> impl Strategy<Value = Card> {
    prop_oneof![
        3 => card().prop_filter("colored", |c| !c.is_wild()),
        1 => (color(), prop_oneof![Just(Face::Wild), Just(Face::WildDrawFour)])
            .prop_map(|(color, face)| Card::colored(color, face)),
    ]
}

/// A shuffled standard deck.
pub fn shuffled_deck() -> impl Strategy<Value = Vec<Card>> {
    Just(standard_deck()).prop_shuffle()
}

/// Seed for a `StdRng`.
pub fn rng_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Player count a session can seat.
pub fn player_count() -> impl Strategy<Value = usize> {
    2usize..=10
}
