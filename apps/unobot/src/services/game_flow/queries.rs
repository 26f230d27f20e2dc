//! Read-only views. Nothing here writes to the store.

use super::messages::{hand_message, mention, top_card_line};
use super::{Actor, UnoService};
use crate::domain::{RuleError, Session};
use crate::error::AppError;
use crate::services::outcome::{Outcome, Target};

impl UnoService {
    /// Card counts for every seated player, in seat order.
    pub async fn peek(&self, actor: &Actor) -> Result<Outcome, AppError> {
        self.query(actor, "peek", |session| {
            in_running_round(session, &actor.user_id)?;
            let lines = session
                .seats
                .iter()
                .filter_map(|id| session.player(id))
                .map(|p| format!("{}: {}", p.name, p.hand.len()))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(format!(":eyes: | **Player Hands:**\n\n{lines}"))
        })
        .await
    }

    pub async fn top_card(&self, actor: &Actor) -> Result<Outcome, AppError> {
        self.query(actor, "top", |session| {
            let holder = session
                .turn_holder()
                .ok_or(RuleError::RoundNotStarted)?;
            Ok(format!(
                "{}\n:mega: | It's {}'s turn.",
                top_card_line(session),
                mention(holder)
            ))
        })
        .await
    }

    pub async fn show_hand(&self, actor: &Actor) -> Result<Outcome, AppError> {
        self.query(actor, "hand", |session| {
            in_running_round(session, &actor.user_id)?;
            Ok(hand_message(session, &actor.user_id))
        })
        .await
    }

    async fn query<F>(
        &self,
        actor: &Actor,
        context: &'static str,
        render: F,
    ) -> Result<Outcome, AppError>
    where
        F: FnOnce(&Session) -> Result<String, RuleError>,
    {
        let Some(session) = self
            .store
            .fetch_one(&actor.guild_id, &actor.channel_id)
            .await?
        else {
            return Ok(self.reject(actor, context, RuleError::NoActiveSession));
        };
        match render(&session) {
            Ok(message) => Ok(Outcome::success(
                format!(
                    "User {} (ID: {}) ran {context} in channel {}",
                    actor.user_name, actor.user_id, actor.channel_id
                ),
                message,
            )
            .to(Target::Caller)),
            Err(err) => Ok(self.reject(actor, context, err)),
        }
    }
}

fn in_running_round(session: &Session, player_id: &str) -> Result<(), RuleError> {
    if !session.is_seated(player_id) {
        return Err(RuleError::NotParticipant);
    }
    if !session.active {
        return Err(RuleError::RoundNotStarted);
    }
    Ok(())
}
