//! DTOs for the sessions_sea adapter. Document fields arrive already encoded
//! as JSON values.

use sea_orm::prelude::Json;

/// Insert payload for a new session row.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub guild_id: String,
    pub channel_id: String,
    pub active: bool,
    pub intermission: bool,
    pub players: Json,
    pub hands: Json,
    pub draw_pile: Json,
    pub discard_pile: Json,
    pub direction: String,
    pub turn: Option<Json>,
    pub uno: Json,
    pub scores: Json,
}

/// Sparse update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub guild_id: String,
    pub channel_id: String,
    pub active: Option<bool>,
    pub intermission: Option<bool>,
    pub players: Option<Json>,
    pub hands: Option<Json>,
    pub draw_pile: Option<Json>,
    pub discard_pile: Option<Json>,
    pub direction: Option<String>,
    /// Three-state: None = no change, Some(None) = clear.
    pub turn: Option<Option<Json>>,
    pub uno: Option<Json>,
    pub scores: Option<Json>,
}

impl SessionUpdate {
    pub fn new(guild_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_intermission(mut self, intermission: bool) -> Self {
        self.intermission = Some(intermission);
        self
    }

    pub fn with_players(mut self, players: Json) -> Self {
        self.players = Some(players);
        self
    }

    pub fn with_hands(mut self, hands: Json) -> Self {
        self.hands = Some(hands);
        self
    }

    pub fn with_draw_pile(mut self, pile: Json) -> Self {
        self.draw_pile = Some(pile);
        self
    }

    pub fn with_discard_pile(mut self, pile: Json) -> Self {
        self.discard_pile = Some(pile);
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_turn(mut self, turn: Option<Json>) -> Self {
        self.turn = Some(turn);
        self
    }

    pub fn with_uno(mut self, uno: Json) -> Self {
        self.uno = Some(uno);
        self
    }

    pub fn with_scores(mut self, scores: Json) -> Self {
        self.scores = Some(scores);
        self
    }
}
