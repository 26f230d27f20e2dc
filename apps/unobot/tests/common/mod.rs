#![allow(dead_code)]

use std::sync::Arc;

use unobot::config::game::GameConfig;
use unobot::domain::dealing::{standard_deck, Deck};
use unobot::domain::{Card, Player, Session, Turn, TurnAction};
use unobot::infra::memory_store::MemorySessionStore;
use unobot::repos::SessionStore;
use unobot::services::{Actor, UnoService};

pub const GUILD: &str = "guild-1";
pub const CHANNEL: &str = "channel-1";

#[ctor::ctor]
fn init_logging() {
    unobot_test_support::logging::init();
}

pub fn card(token: &str) -> Card {
    token.parse().expect("valid card token")
}

pub fn actor(id: &str) -> Actor {
    Actor::new(GUILD, CHANNEL, id, id.to_uppercase())
}

pub fn actor_in(channel: &str, id: &str) -> Actor {
    Actor::new(GUILD, channel, id, id.to_uppercase())
}

/// Service over a fresh in-memory store, with zero delays and a fixed seed.
pub fn service() -> (Arc<MemorySessionStore>, UnoService) {
    service_with(GameConfig::for_tests())
}

pub fn service_with(config: GameConfig) -> (Arc<MemorySessionStore>, UnoService) {
    let store = Arc::new(MemorySessionStore::new());
    let service = UnoService::new(store.clone(), config);
    (store, service)
}

/// An active session with exact hands and discard top; the first player
/// holds the turn. Every card comes out of one standard deck.
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

    let mut session = Session::new(GUILD, CHANNEL);
    for (id, hand) in hands {
        let mut player = Player::new(*id, id.to_uppercase());
        player.hand = hand.iter().map(|t| take(t)).collect();
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

/// Store `session` and return the service that will play it.
pub async fn seeded(session: Session) -> (Arc<MemorySessionStore>, UnoService) {
    let (store, service) = service();
    store.insert(&session).await.expect("insert seeded session");
    (store, service)
}

pub async fn load(store: &MemorySessionStore) -> Session {
    store
        .fetch_one(GUILD, CHANNEL)
        .await
        .expect("fetch session")
        .expect("session exists")
}
