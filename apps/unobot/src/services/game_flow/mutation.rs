use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::{Actor, UnoService};
use crate::domain::{RuleError, Session};
use crate::error::AppError;
use crate::repos::sessions::{is_frozen, SessionPatch};
use crate::services::outcome::Outcome;

impl UnoService {
    /// Persist whatever `after` changed relative to `before`, in one update.
    pub(super) async fn persist(&self, before: &Session, after: &Session) -> Result<(), AppError> {
        let patch = SessionPatch::between(before, after);
        if patch.is_empty() {
            return Ok(());
        }
        debug!(
            guild_id = %after.guild_id,
            channel_id = %after.channel_id,
            fields = ?patch.changed_fields(),
            "Persisting session patch"
        );
        self.store
            .update(&after.guild_id, &after.channel_id, &patch)
            .await?;
        Ok(())
    }

    pub(super) fn reject(&self, actor: &Actor, context: &str, err: RuleError) -> Outcome {
        warn!(
            guild_id = %actor.guild_id,
            channel_id = %actor.channel_id,
            player_id = %actor.user_id,
            action = context,
            reason = %err,
            "Action rejected"
        );
        Outcome::rejected(&err, context)
    }

    /// Apply `apply` to a copy of `before`; persist only if it succeeds.
    pub(super) async fn transition<F>(
        &self,
        actor: &Actor,
        context: &'static str,
        before: Session,
        apply: F,
    ) -> Result<Outcome, AppError>
    where
        F: FnOnce(&mut Session, &mut StdRng) -> Result<Outcome, RuleError>,
    {
        if is_frozen(&before) {
            warn!(
                guild_id = %actor.guild_id,
                channel_id = %actor.channel_id,
                "Loaded a session with a frozen turn"
            );
        }

        let mut session = before.clone();
        match self.with_rng(|rng| apply(&mut session, rng)) {
            Ok(outcome) => {
                self.persist(&before, &session).await?;
                debug!(
                    guild_id = %actor.guild_id,
                    channel_id = %actor.channel_id,
                    player_id = %actor.user_id,
                    action = context,
                    "Action applied"
                );
                Ok(outcome)
            }
            Err(err) => Ok(self.reject(actor, context, err)),
        }
    }

    /// Load the actor's channel session and run [`Self::transition`] on it.
    pub(super) async fn mutate<F>(
        &self,
        actor: &Actor,
        context: &'static str,
        apply: F,
    ) -> Result<Outcome, AppError>
    where
        F: FnOnce(&mut Session, &mut StdRng) -> Result<Outcome, RuleError>,
    {
        match self
            .store
            .fetch_one(&actor.guild_id, &actor.channel_id)
            .await?
        {
            Some(before) => self.transition(actor, context, before, apply).await,
            None => Ok(self.reject(actor, context, RuleError::NoActiveSession)),
        }
    }
}
