use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use super::messages::{hand_message, mention, name_of, top_card_line, turn_prompt};
use super::{Actor, UnoService};
use crate::domain::lifecycle::{
    add_player, remove_player, start_session, stop_session, JoinEffect, LeaveEffect,
};
use crate::domain::uno_call::monitor_status;
use crate::domain::{format_hand, RuleError, Session};
use crate::error::AppError;
use crate::services::outcome::{FollowUp, Outcome, OutcomeSink, Target};

const STARTING_SOON: &str = ":exclamation: | Game starting soon! Use `join` to hop in.";
const STOPPED_PREMATURELY: &str =
    ":exclamation: | Game stopped prematurely because there aren't enough players.";

impl UnoService {
    /// Seat the caller, creating the channel's session on first join.
    ///
    /// A player sits in at most one session per guild.
    pub async fn join(&self, actor: &Actor) -> Result<Outcome, AppError> {
        let sessions = self.store.fetch_all(&actor.guild_id).await?;
        if let Some(seated) = sessions.iter().find(|s| s.is_seated(&actor.user_id)) {
            let err = RuleError::AlreadyJoined {
                channel_id: seated.channel_id.clone(),
                here: seated.channel_id == actor.channel_id,
            };
            return Ok(self.reject(actor, "join", err));
        }

        let existing = sessions
            .into_iter()
            .find(|s| s.channel_id == actor.channel_id);
        match existing {
            None => self.open_session(actor).await,
            Some(session) => self.join_existing(actor, session).await,
        }
    }

    async fn open_session(&self, actor: &Actor) -> Result<Outcome, AppError> {
        let mut session = Session::new(actor.guild_id.clone(), actor.channel_id.clone());
        let hand_size = self.config.hand_size;
        self.with_rng(|rng| {
            add_player(&mut session, &actor.user_id, &actor.user_name, hand_size, rng)
        })
        .map_err(|err| AppError::internal(format!("seating in a new session: {err}")))?;
        self.store.insert(&session).await?;

        info!(
            guild_id = %actor.guild_id,
            channel_id = %actor.channel_id,
            player_id = %actor.user_id,
            "Session created"
        );
        Ok(Outcome::success(
            format!(
                "User {} (ID: {}) created an UNO room in channel {}",
                actor.user_name, actor.user_id, actor.channel_id
            ),
            ":door: | UNO room created! Game will start when at least one other person joins in.",
        ))
    }

    async fn join_existing(&self, actor: &Actor, session: Session) -> Result<Outcome, AppError> {
        let max_players = self.config.max_players;
        let hand_size = self.config.hand_size;
        let start_secs = self.config.start_delay.as_secs();

        self.transition(actor, "join", session, |session, rng| {
            if session.player_count() >= max_players {
                return Err(RuleError::SessionFull { max: max_players });
            }
            let effect = add_player(session, &actor.user_id, &actor.user_name, hand_size, rng)?;

            let log = format!(
                "User {} (ID: {}) joined the UNO game in channel {}",
                actor.user_name, actor.user_id, session.channel_id
            );
            let joined = ":door: | You've joined the room!";
            Ok(match effect {
                JoinEffect::Seated => Outcome::success(log, joined),
                JoinEffect::RoundPending => Outcome::success(
                    log,
                    format!("{joined}\n{STARTING_SOON} ({start_secs}s)"),
                )
                .with_follow_up(FollowUp::StartRound),
                JoinEffect::DealtIn(hand) => Outcome::success(
                    log,
                    format!(
                        ":door: | **{}** joined the game and was dealt {} cards.",
                        actor.user_name,
                        hand.len()
                    ),
                )
                .with_notice(
                    Target::Caller,
                    format!(":notebook: | **Your hand:**\n\n{}", format_hand(&hand)),
                ),
            })
        })
        .await
    }

    /// Unseat the caller. Scores stay with the session.
    pub async fn leave(&self, actor: &Actor) -> Result<Outcome, AppError> {
        self.mutate(actor, "leave", |session, _rng| {
            let name = name_of(session, &actor.user_id);
            let effect = remove_player(session, &actor.user_id)?;

            let mut channel = format!(":walking: | **{name}** has left the UNO game!");
            match effect {
                LeaveEffect::Left => {}
                LeaveEffect::RoundStopped => {
                    channel = format!("{channel}\n{STOPPED_PREMATURELY}");
                }
                LeaveEffect::TurnPassed(_) => {
                    monitor_status(session);
                    channel = format!("{channel}\n{}", turn_prompt(session));
                }
            }

            Ok(Outcome::success(
                format!(
                    "User {name} (ID: {}) left the UNO game in channel {}",
                    actor.user_id, session.channel_id
                ),
                channel,
            )
            .with_notice(Target::Caller, ":walking: | You have left the UNO game!"))
        })
        .await
    }

    /// Run a delayed round start after its delay elapses.
    ///
    /// The session is re-read first: if a round already runs, or the session
    /// left intermission meanwhile, nothing happens.
    pub async fn run_follow_up(
        &self,
        guild_id: &str,
        channel_id: &str,
        follow_up: FollowUp,
    ) -> Result<Outcome, AppError> {
        let delay = match follow_up {
            FollowUp::StartRound => self.config.start_delay,
            FollowUp::RestartRound => self.config.restart_delay,
        };
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }

        let Some(before) = self.store.fetch_one(guild_id, channel_id).await? else {
            return Ok(Outcome::rejected(&RuleError::NoActiveSession, "follow_up"));
        };
        if before.active || !before.intermission {
            return Ok(Outcome::success(
                format!("Skipped {follow_up:?} in channel {channel_id}: nothing pending"),
                "",
            )
            .failed());
        }

        let mut session = before.clone();
        if session.player_count() < 2 {
            stop_session(&mut session);
            self.persist(&before, &session).await?;
            return Ok(Outcome::success(
                format!("Stopped the UNO game in channel {channel_id}: not enough players"),
                STOPPED_PREMATURELY,
            ));
        }

        let hand_size = self.config.hand_size;
        self.with_rng(|rng| start_session(&mut session, hand_size, rng));
        self.persist(&before, &session).await?;

        let holder = session.turn_holder().map(mention).unwrap_or_default();
        let mut channel = format!(
            ":bellhop: | UNO game is starting...!\n{}\n:mega: | Your move, {holder}.",
            top_card_line(&session)
        );
        if follow_up == FollowUp::RestartRound {
            channel = format!("{STARTING_SOON}\n{channel}");
        }
        info!(
            guild_id,
            channel_id,
            players = session.player_count(),
            "Round started"
        );

        let outcome = session.seats.iter().fold(
            Outcome::success(
                format!("Started an UNO round in channel {channel_id}"),
                channel,
            ),
            |outcome, player_id| {
                outcome.with_notice(
                    Target::Mentioned(player_id.clone()),
                    hand_message(&session, player_id),
                )
            },
        );
        Ok(outcome)
    }

    /// Run `follow_up` in the background and hand its outcome to `sink`.
    pub fn spawn_follow_up(
        self: Arc<Self>,
        sink: Arc<dyn OutcomeSink>,
        guild_id: String,
        channel_id: String,
        follow_up: FollowUp,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            match self.run_follow_up(&guild_id, &channel_id, follow_up).await {
                Ok(outcome) => sink.deliver(&guild_id, &channel_id, &outcome).await,
                Err(err) => error!(
                    guild_id = %guild_id,
                    channel_id = %channel_id,
                    error = %err,
                    "Follow-up failed"
                ),
            }
        })
    }
}
