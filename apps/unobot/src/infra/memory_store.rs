//! Process-local session store for tests and `UNO_STORE=memory`.
//!
//! Holds the same flat documents the Postgres store writes, and applies
//! patches with the same merge semantics.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::Session;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::sessions::{SessionDocument, SessionPatch, SessionStore, StoreHealth};

type SessionKey = (String, String);

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    docs: DashMap<SessionKey, SessionDocument>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document, as a database row would hold it.
    pub fn document(&self, guild_id: &str, channel_id: &str) -> Option<SessionDocument> {
        self.docs
            .get(&(guild_id.to_string(), channel_id.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn fetch_one(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<Option<Session>, DomainError> {
        Ok(self.document(guild_id, channel_id).map(Session::from))
    }

    async fn fetch_all(&self, guild_id: &str) -> Result<Vec<Session>, DomainError> {
        let mut docs: Vec<SessionDocument> = self
            .docs
            .iter()
            .filter(|entry| entry.key().0 == guild_id)
            .map(|entry| entry.value().clone())
            .collect();
        docs.sort_by(|a, b| a.channel_id.cmp(&b.channel_id));
        Ok(docs.into_iter().map(Session::from).collect())
    }

    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let key = (session.guild_id.clone(), session.channel_id.clone());
        match self.docs.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::SessionExists,
                "A session already exists for this channel",
            )),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(SessionDocument::from(session));
                Ok(())
            }
        }
    }

    async fn update(
        &self,
        guild_id: &str,
        channel_id: &str,
        patch: &SessionPatch,
    ) -> Result<(), DomainError> {
        let key = (guild_id.to_string(), channel_id.to_string());
        let mut doc = self
            .docs
            .get_mut(&key)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Session, "Session not found"))?;
        patch.apply(doc.value_mut());
        Ok(())
    }

    async fn health(&self) -> StoreHealth {
        StoreHealth {
            store: "memory",
            ok: true,
            error: None,
            migrations: "n/a".to_string(),
        }
    }
}
