//! In-memory session state reconstructed for every action.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::dealing::Deck;
use super::turns::Turn;
use super::uno_call::CallStatus;

pub type PlayerId = String;

/// Rotation direction over the seat order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing seat index.
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub call_status: Option<CallStatus>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: Vec::new(),
            call_status: None,
        }
    }
}

/// One channel's game session.
///
/// `seats` is the rotation order; `players` holds one record per seated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub guild_id: String,
    pub channel_id: String,
    pub active: bool,
    pub intermission: bool,
    pub seats: Vec<PlayerId>,
    pub players: BTreeMap<PlayerId, Player>,
    pub deck: Deck,
    pub direction: Direction,
    pub turn: Option<Turn>,
    pub scores: BTreeMap<PlayerId, u32>,
}

impl Session {
    pub fn new(guild_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
            active: false,
            intermission: false,
            seats: Vec::new(),
            players: BTreeMap::new(),
            deck: Deck::default(),
            direction: Direction::Forward,
            turn: None,
            scores: BTreeMap::new(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_seated(&self, player_id: &str) -> bool {
        self.players.contains_key(player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.get_mut(player_id)
    }

    pub fn player_name(&self, player_id: &str) -> Option<&str> {
        self.player(player_id).map(|p| p.name.as_str())
    }

    pub fn hand(&self, player_id: &str) -> &[Card] {
        self.player(player_id)
            .map(|p| p.hand.as_slice())
            .unwrap_or_default()
    }

    pub fn seat_of(&self, player_id: &str) -> Option<usize> {
        self.seats.iter().position(|id| id == player_id)
    }

    /// Seat reached by moving `steps` seats from `seat` in the current direction.
    pub fn seat_after(&self, seat: usize, steps: usize) -> usize {
        let n = self.seats.len();
        if n == 0 {
            return 0;
        }
        let steps = steps % n;
        match self.direction {
            Direction::Forward => (seat + steps) % n,
            Direction::Backward => (seat + n - steps) % n,
        }
    }

    /// Player `steps` seats after `player_id` in the current direction.
    pub fn player_after(&self, player_id: &str, steps: usize) -> Option<PlayerId> {
        let seat = self.seat_of(player_id)?;
        self.seats.get(self.seat_after(seat, steps)).cloned()
    }

    pub fn turn_holder(&self) -> Option<&str> {
        self.turn.as_ref().map(|t| t.player_id.as_str())
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.deck.top()
    }

    /// Cards on the table: both piles plus every hand.
    pub fn card_total(&self) -> usize {
        self.deck.len() + self.players.values().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Move `n` cards from the draw pile into a player's hand.
    pub fn deal_to<R: rand::Rng + ?Sized>(
        &mut self,
        player_id: &str,
        n: usize,
        rng: &mut R,
    ) -> Vec<Card> {
        if !self.players.contains_key(player_id) {
            return Vec::new();
        }
        let drawn = self.deck.draw(n, rng);
        if let Some(player) = self.players.get_mut(player_id) {
            player.hand.extend(drawn.iter().copied());
        }
        drawn
    }
}
