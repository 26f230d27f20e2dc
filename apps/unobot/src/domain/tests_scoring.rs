// Round scoring.

use proptest::prelude::*;

use crate::domain::scoring::score_cards;
use crate::domain::test_state_helpers::table;
use crate::domain::{card_points, test_gens, test_prelude, Player, Session};

#[test]
fn winner_collects_every_other_hand() {
    let mut session = table(
        &[
            ("a", &[]),
            ("b", &["W", "RS", "G7"]),
            ("c", &["WD4", "B0", "YD2", "Br"]),
        ],
        "R5",
    );

    let points = score_cards(&mut session, "a");

    assert_eq!(points, 50 + 20 + 7 + 50 + 0 + 20 + 20);
    assert_eq!(session.scores.get("a"), Some(&points));
}

#[test]
fn scores_accumulate_across_rounds() {
    let mut session = table(&[("a", &[]), ("b", &["Y9"])], "R5");
    session.scores.insert("a".into(), 40);
    session.scores.insert("b".into(), 12);

    score_cards(&mut session, "a");

    assert_eq!(session.scores.get("a"), Some(&49));
    assert_eq!(session.scores.get("b"), Some(&12));
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: The award equals the sum over all non-winner hands,
    /// whatever the winner still holds.
    #[test]
    fn prop_score_is_sum_of_other_hands(
        hands in prop::collection::vec(prop::collection::vec(test_gens::card(), 0..8), 2..6),
    ) {
        let mut session = Session::new("g", "c");
        for (i, hand) in hands.iter().enumerate() {
            let id = format!("p{i}");
            let mut player = Player::new(id.clone(), id.clone());
            player.hand = hand.clone();
            session.seats.push(id.clone());
            session.players.insert(id, player);
        }
        let expected: u32 = hands[1..].iter().flatten().map(card_points).sum();

        let points = score_cards(&mut session, "p0");

        prop_assert_eq!(points, expected);
        prop_assert_eq!(session.scores.get("p0").copied(), Some(expected));
    }
}
