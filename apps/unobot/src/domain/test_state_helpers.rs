//! Test-only session fixtures for domain unit tests.

#[cfg(test)]
pub use state_helpers::{card, cards, seeded_rng, table};

#[cfg(test)]
mod state_helpers {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::domain::dealing::{standard_deck, Deck};
    use crate::domain::state::{Player, Session};
    use crate::domain::turns::{Turn, TurnAction};
    use crate::domain::Card;

    pub fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    pub fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    pub fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| card(t)).collect()
    }

    /// Build an active session with exact hands and a given discard top.
    ///
    /// Cards are taken out of a standard deck so the table always holds all
    /// 108; the remainder becomes the draw pile. The first player holds the
    /// turn at `Play`.
    pub fn table(hands: &[(&str, &[&str])], top: &str) -> Session {
        let mut remaining = standard_deck();
        let mut take = |token: &str| {
            let wanted = card(token).reverted();
            let pos = remaining
                .iter()
                .position(|c| *c == wanted)
                .unwrap_or_else(|| panic!("deck has no spare {token}"));
            remaining.remove(pos);
            card(token)
        };

        let mut session = Session::new("guild", "channel");
        for (id, hand) in hands {
            let mut player = Player::new(*id, id.to_uppercase());
            player.hand = hand.iter().map(|t| take(*t)).collect();
            session.seats.push((*id).to_string());
            session.players.insert((*id).to_string(), player);
        }
        let top_card = take(top);

        session.deck = Deck {
            draw_pile: remaining,
            discard_pile: vec![top_card],
        };
        session.active = true;
        session.turn = hands
            .first()
            .map(|(id, _)| Turn::new(*id, TurnAction::Play));
        session
    }
}
