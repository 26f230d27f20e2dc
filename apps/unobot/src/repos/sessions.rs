//! Session persistence: the stored document shape, its merge-patch, and the
//! `SessionStore` seam the services talk to.
//!
//! In memory a session is a [`Session`] (one record per player plus a seat
//! list). On disk it is a flat document with parallel `players`, `hands`,
//! `uno` and `scores` fields. Every action persists only the fields it
//! changed, computed with [`SessionPatch::between`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::sessions_sea::{self, SessionCreate, SessionUpdate};
use crate::domain::{
    CallStatus, Card, Deck, Direction, Player, PlayerId, Session, Turn, TurnAction,
};
use crate::entities::uno_sessions;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Seat entry in the stored `players` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: PlayerId,
    pub name: String,
}

/// Flat persisted form of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDocument {
    pub guild_id: String,
    pub channel_id: String,
    pub active: bool,
    pub intermission: bool,
    pub players: Vec<PlayerEntry>,
    pub hands: BTreeMap<PlayerId, Vec<Card>>,
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub direction: Direction,
    pub turn: Option<Turn>,
    pub uno: BTreeMap<PlayerId, CallStatus>,
    pub scores: BTreeMap<PlayerId, u32>,
}

impl From<&Session> for SessionDocument {
    fn from(session: &Session) -> Self {
        let seated = session
            .seats
            .iter()
            .filter_map(|id| session.player(id));

        let mut players = Vec::with_capacity(session.seats.len());
        let mut hands = BTreeMap::new();
        let mut uno = BTreeMap::new();
        for player in seated {
            players.push(PlayerEntry {
                id: player.id.clone(),
                name: player.name.clone(),
            });
            if !player.hand.is_empty() {
                hands.insert(player.id.clone(), player.hand.clone());
            }
            if let Some(status) = player.call_status {
                uno.insert(player.id.clone(), status);
            }
        }

        Self {
            guild_id: session.guild_id.clone(),
            channel_id: session.channel_id.clone(),
            active: session.active,
            intermission: session.intermission,
            players,
            hands,
            draw_pile: session.deck.draw_pile.clone(),
            discard_pile: session.deck.discard_pile.clone(),
            direction: session.direction,
            turn: session.turn.clone(),
            uno,
            scores: session.scores.clone(),
        }
    }
}

impl From<SessionDocument> for Session {
    fn from(mut doc: SessionDocument) -> Self {
        let mut players = BTreeMap::new();
        let mut seats = Vec::with_capacity(doc.players.len());
        for entry in doc.players {
            let mut player = Player::new(entry.id.clone(), entry.name);
            player.hand = doc.hands.remove(&entry.id).unwrap_or_default();
            player.call_status = doc.uno.remove(&entry.id);
            seats.push(entry.id.clone());
            players.insert(entry.id, player);
        }

        Session {
            guild_id: doc.guild_id,
            channel_id: doc.channel_id,
            active: doc.active,
            intermission: doc.intermission,
            seats,
            players,
            deck: Deck {
                draw_pile: doc.draw_pile,
                discard_pile: doc.discard_pile,
            },
            direction: doc.direction,
            turn: doc.turn,
            scores: doc.scores,
        }
    }
}

/// Sparse merge-patch over a [`SessionDocument`]. `None` = unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub active: Option<bool>,
    pub intermission: Option<bool>,
    pub players: Option<Vec<PlayerEntry>>,
    pub hands: Option<BTreeMap<PlayerId, Vec<Card>>>,
    pub draw_pile: Option<Vec<Card>>,
    pub discard_pile: Option<Vec<Card>>,
    pub direction: Option<Direction>,
    /// Some(None) clears the turn.
    pub turn: Option<Option<Turn>>,
    pub uno: Option<BTreeMap<PlayerId, CallStatus>>,
    pub scores: Option<BTreeMap<PlayerId, u32>>,
}

fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
    (before != after).then(|| after.clone())
}

impl SessionPatch {
    /// Fields of `after` that differ from `before`.
    pub fn diff(before: &SessionDocument, after: &SessionDocument) -> Self {
        Self {
            active: changed(&before.active, &after.active),
            intermission: changed(&before.intermission, &after.intermission),
            players: changed(&before.players, &after.players),
            hands: changed(&before.hands, &after.hands),
            draw_pile: changed(&before.draw_pile, &after.draw_pile),
            discard_pile: changed(&before.discard_pile, &after.discard_pile),
            direction: changed(&before.direction, &after.direction),
            turn: changed(&before.turn, &after.turn),
            uno: changed(&before.uno, &after.uno),
            scores: changed(&before.scores, &after.scores),
        }
    }

    pub fn between(before: &Session, after: &Session) -> Self {
        Self::diff(&before.into(), &after.into())
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Names of the document fields this patch writes.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("active", self.active.is_some()),
            ("intermission", self.intermission.is_some()),
            ("players", self.players.is_some()),
            ("hands", self.hands.is_some()),
            ("draw_pile", self.draw_pile.is_some()),
            ("discard_pile", self.discard_pile.is_some()),
            ("direction", self.direction.is_some()),
            ("turn", self.turn.is_some()),
            ("uno", self.uno.is_some()),
            ("scores", self.scores.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Merge this patch into a stored document.
    pub fn apply(&self, doc: &mut SessionDocument) {
        if let Some(active) = self.active {
            doc.active = active;
        }
        if let Some(intermission) = self.intermission {
            doc.intermission = intermission;
        }
        if let Some(players) = &self.players {
            doc.players = players.clone();
        }
        if let Some(hands) = &self.hands {
            doc.hands = hands.clone();
        }
        if let Some(pile) = &self.draw_pile {
            doc.draw_pile = pile.clone();
        }
        if let Some(pile) = &self.discard_pile {
            doc.discard_pile = pile.clone();
        }
        if let Some(direction) = self.direction {
            doc.direction = direction;
        }
        if let Some(turn) = &self.turn {
            doc.turn = turn.clone();
        }
        if let Some(uno) = &self.uno {
            doc.uno = uno.clone();
        }
        if let Some(scores) = &self.scores {
            doc.scores = scores.clone();
        }
    }
}

/// Store status reported by `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreHealth {
    pub store: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub migrations: String,
}

/// Load/save gateway for session documents.
///
/// No optimistic-concurrency token: two writers on one session can race.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn fetch_one(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<Option<Session>, DomainError>;

    /// Every session in a guild.
    async fn fetch_all(&self, guild_id: &str) -> Result<Vec<Session>, DomainError>;

    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    async fn update(
        &self,
        guild_id: &str,
        channel_id: &str,
        patch: &SessionPatch,
    ) -> Result<(), DomainError>;

    async fn health(&self) -> StoreHealth;
}

fn encode<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Encode".into()),
            format!("session encode failed: {e}"),
        )
    })
}

fn decode<T: DeserializeOwned>(field: &str, value: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| DomainError::corrupt(field, e))
}

impl TryFrom<uno_sessions::Model> for SessionDocument {
    type Error = DomainError;

    fn try_from(model: uno_sessions::Model) -> Result<Self, Self::Error> {
        let direction = decode("direction", serde_json::Value::String(model.direction))?;
        let turn: Option<Turn> = match model.turn {
            Some(value) if !value.is_null() => Some(decode("turn", value)?),
            _ => None,
        };

        Ok(Self {
            guild_id: model.guild_id,
            channel_id: model.channel_id,
            active: model.active,
            intermission: model.intermission,
            players: decode("players", model.players)?,
            hands: decode("hands", model.hands)?,
            draw_pile: decode("draw_pile", model.draw_pile)?,
            discard_pile: decode("discard_pile", model.discard_pile)?,
            direction,
            turn,
            uno: decode("uno", model.uno)?,
            scores: decode("scores", model.scores)?,
        })
    }
}

fn direction_column(direction: Direction) -> Result<String, DomainError> {
    match encode(&direction)? {
        serde_json::Value::String(s) => Ok(s),
        other => Err(DomainError::infra(
            InfraErrorKind::Other("Encode".into()),
            format!("direction encoded as {other}"),
        )),
    }
}

fn create_dto(doc: &SessionDocument) -> Result<SessionCreate, DomainError> {
    Ok(SessionCreate {
        guild_id: doc.guild_id.clone(),
        channel_id: doc.channel_id.clone(),
        active: doc.active,
        intermission: doc.intermission,
        players: encode(&doc.players)?,
        hands: encode(&doc.hands)?,
        draw_pile: encode(&doc.draw_pile)?,
        discard_pile: encode(&doc.discard_pile)?,
        direction: direction_column(doc.direction)?,
        turn: doc.turn.as_ref().map(encode).transpose()?,
        uno: encode(&doc.uno)?,
        scores: encode(&doc.scores)?,
    })
}

fn update_dto(
    guild_id: &str,
    channel_id: &str,
    patch: &SessionPatch,
) -> Result<SessionUpdate, DomainError> {
    let mut dto = SessionUpdate::new(guild_id, channel_id);
    if let Some(active) = patch.active {
        dto = dto.with_active(active);
    }
    if let Some(intermission) = patch.intermission {
        dto = dto.with_intermission(intermission);
    }
    if let Some(players) = &patch.players {
        dto = dto.with_players(encode(players)?);
    }
    if let Some(hands) = &patch.hands {
        dto = dto.with_hands(encode(hands)?);
    }
    if let Some(pile) = &patch.draw_pile {
        dto = dto.with_draw_pile(encode(pile)?);
    }
    if let Some(pile) = &patch.discard_pile {
        dto = dto.with_discard_pile(encode(pile)?);
    }
    if let Some(direction) = patch.direction {
        dto = dto.with_direction(direction_column(direction)?);
    }
    if let Some(turn) = &patch.turn {
        dto = dto.with_turn(turn.as_ref().map(encode).transpose()?);
    }
    if let Some(uno) = &patch.uno {
        dto = dto.with_uno(encode(uno)?);
    }
    if let Some(scores) = &patch.scores {
        dto = dto.with_scores(encode(scores)?);
    }
    Ok(dto)
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct SeaSessionStore {
    db: DatabaseConnection,
}

impl SeaSessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl SessionStore for SeaSessionStore {
    async fn fetch_one(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<Option<Session>, DomainError> {
        let model = sessions_sea::find_one(&self.db, guild_id, channel_id).await?;
        model
            .map(|m| SessionDocument::try_from(m).map(Session::from))
            .transpose()
    }

    async fn fetch_all(&self, guild_id: &str) -> Result<Vec<Session>, DomainError> {
        sessions_sea::find_by_guild(&self.db, guild_id)
            .await?
            .into_iter()
            .map(|m| SessionDocument::try_from(m).map(Session::from))
            .collect()
    }

    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let dto = create_dto(&SessionDocument::from(session))?;
        sessions_sea::create_session(&self.db, dto).await?;
        Ok(())
    }

    async fn update(
        &self,
        guild_id: &str,
        channel_id: &str,
        patch: &SessionPatch,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Ok(());
        }
        debug!(guild_id, channel_id, fields = ?patch.changed_fields(), "Patching session row");
        let dto = update_dto(guild_id, channel_id, patch)?;
        sessions_sea::update_session(&self.db, dto).await?;
        Ok(())
    }

    async fn health(&self) -> StoreHealth {
        let probe = self
            .db
            .query_one(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1 as health_check".to_string(),
            ))
            .await;

        match probe {
            Ok(_) => {
                let migrations = match get_latest_migration_version(&self.db).await {
                    Ok(Some(version)) => version,
                    Ok(None) => "no_migrations".to_string(),
                    Err(_) => "unknown".to_string(),
                };
                StoreHealth {
                    store: "postgres",
                    ok: true,
                    error: None,
                    migrations,
                }
            }
            Err(e) => StoreHealth {
                store: "postgres",
                ok: false,
                error: Some(format!("DB query failed: {e}")),
                migrations: "unknown".to_string(),
            },
        }
    }
}

/// True if a persisted turn is stuck mid-transition.
pub fn is_frozen(session: &Session) -> bool {
    matches!(
        session.turn,
        Some(Turn {
            action: TurnAction::Frozen,
            ..
        })
    )
}
