/// Property-based tests for dealing, drawing and the opening turn
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::dealing::Deck;
use crate::domain::lifecycle::start_session;
use crate::domain::state::{Player, Session};
use crate::domain::turns::{set_first_turn, TurnAction};
use crate::domain::{test_gens, test_prelude, Card, Face, DECK_SIZE};

fn seated(count: usize) -> Session {
    let mut session = Session::new("g", "c");
    for i in 0..count {
        let id = format!("p{i}");
        session.seats.push(id.clone());
        session.players.insert(id.clone(), Player::new(id, format!("P{i}")));
    }
    session
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Card conservation at round start
    /// Dealing, flipping the starter and resolving the opening turn never
    /// create or lose a card.
    #[test]
    fn prop_start_conserves_cards(
        players in test_gens::player_count(),
        seed in test_gens::rng_seed(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = seated(players);

        start_session(&mut session, 7, &mut rng);

        prop_assert_eq!(session.card_total(), DECK_SIZE);
        prop_assert!(session.active);
        prop_assert!(!session.intermission);
        prop_assert!(session.turn.is_some());
        prop_assert_ne!(session.top_card().map(|c| c.face), Some(Face::WildDrawFour));
        for id in &session.seats {
            let held = session.hand(id).len();
            prop_assert!(held == 7 || held == 9, "{} holds {}", id, held);
        }
    }

    /// Property: draw(n) succeeds whenever the table can cover it
    /// and never disturbs the discard top.
    #[test]
    fn prop_draw_covers_request_and_keeps_top(
        deck in test_gens::shuffled_deck(),
        split in 1usize..DECK_SIZE,
        n in 1usize..20,
        seed in test_gens::rng_seed(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cards = deck;
        let discard_pile = cards.split_off(split);
        let mut pile = Deck { draw_pile: cards, discard_pile };
        let top = pile.top().copied();
        let available = pile.draw_pile.len() + pile.discard_pile.len() - 1;

        let drawn = pile.draw(n, &mut rng);

        prop_assert_eq!(drawn.len(), n.min(available));
        prop_assert_eq!(pile.top().copied(), top);
        prop_assert_eq!(pile.len() + drawn.len(), DECK_SIZE);
    }

    /// Property: opening turn terminates on wild draw four heavy piles
    #[test]
    fn prop_first_turn_terminates_on_stacked_piles(
        filler in 0usize..6,
        seed in test_gens::rng_seed(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = seated(3);
        let mut draw_pile = vec![Card::wild_draw_four(); 3];
        draw_pile.extend(std::iter::repeat(Card::wild()).take(filler));
        session.deck = Deck {
            draw_pile,
            discard_pile: vec![Card::wild_draw_four()],
        };

        set_first_turn(&mut session, &mut rng);

        let top = session.top_card().copied();
        if filler == 0 {
            prop_assert_eq!(top, Some(Card::wild_draw_four()));
        } else {
            prop_assert_eq!(top, Some(Card::wild()));
        }
        prop_assert_eq!(session.deck.len(), 4 + filler);
        let action = session.turn.as_ref().map(|t| t.action);
        prop_assert_eq!(action, Some(TurnAction::ChooseColor { pending_draw: 0 }));
    }
}
