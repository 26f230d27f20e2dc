/// Property-based tests for the card-match rule
use proptest::prelude::*;

use crate::domain::{card_matches, test_gens, test_prelude, Face};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Uncolored wilds match anything
    #[test]
    fn prop_wilds_match_any_top(
        top in test_gens::top_card(),
        wild in prop_oneof![
            Just(crate::domain::Card::wild()),
            Just(crate::domain::Card::wild_draw_four()),
        ],
    ) {
        prop_assert!(card_matches(&wild, &top));
    }

    /// Property: Character comparison equals color-or-face matching,
    /// plus exactly one extra pairing: a draw two on a chosen-color wild
    /// draw four (both tokens carry `D` second).
    #[test]
    fn prop_match_rule_boundaries(
        card in test_gens::card().prop_filter("not wild", |c| !c.is_wild()),
        top in test_gens::top_card(),
    ) {
        let same_color = card.color == top.color;
        let same_face = card.face == top.face;
        let draw_letter_overlap = card.face == Face::DrawTwo && top.face == Face::WildDrawFour;

        prop_assert_eq!(
            card_matches(&card, &top),
            same_color || same_face || draw_letter_overlap,
            "{} on {}", card, top
        );
    }

    /// Property: A chosen-color plain wild is matched by color only
    #[test]
    fn prop_chosen_wild_matches_by_color_only(
        card in test_gens::card().prop_filter("not wild", |c| !c.is_wild()),
        color in test_gens::color(),
    ) {
        let top = crate::domain::Card::colored(color, Face::Wild);
        prop_assert_eq!(card_matches(&card, &top), card.color == Some(color));
    }
}
