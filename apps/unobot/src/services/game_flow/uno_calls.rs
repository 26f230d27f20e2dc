use super::messages::{hand_message, name_of, parse_mention};
use super::{Actor, UnoService};
use crate::domain::uno_call::{call, callout, CallResult};
use crate::domain::RuleError;
use crate::error::AppError;
use crate::services::outcome::{Outcome, Target};

impl UnoService {
    /// Declare UNO, or call out the mentioned player for not declaring.
    pub async fn call_uno(
        &self,
        actor: &Actor,
        mention_text: Option<&str>,
    ) -> Result<Outcome, AppError> {
        self.mutate(actor, "uno", |session, rng| {
            let player_id = actor.user_id.as_str();
            if !session.is_seated(player_id) {
                return Err(RuleError::NotParticipant);
            }
            if !session.active {
                return Err(RuleError::RoundNotStarted);
            }
            let name = name_of(session, player_id);

            let Some(text) = mention_text.map(str::trim).filter(|t| !t.is_empty()) else {
                return Ok(match call(session, player_id, rng)? {
                    CallResult::Declared => Outcome::success(
                        format!(
                            "User {name} (ID: {player_id}) called UNO in channel {}",
                            session.channel_id
                        ),
                        format!(":exclamation: | **{name}** has **UNO!**"),
                    ),
                    CallResult::Miscalled(drawn) => Outcome::success(
                        format!(
                            "User {name} (ID: {player_id}) miscalled UNO in channel {} and drew {}",
                            session.channel_id,
                            drawn.len()
                        ),
                        format!(":exclamation: | **{name}** miscalled UNO and draws two cards."),
                    )
                    .failed()
                    .with_notice(
                        Target::Caller,
                        format!(
                            ":exclamation: | Miscalled UNO! You draw two cards.\n\n{}",
                            hand_message(session, player_id)
                        ),
                    ),
                });
            };

            let target = parse_mention(text)
                .ok_or_else(|| RuleError::invalid("Mention the player you're calling out."))?;
            let drawn = callout(session, player_id, &target, rng)?;
            let target_name = name_of(session, &target);

            Ok(Outcome::success(
                format!(
                    "User {name} (ID: {player_id}) caught {target_name} (ID: {target}) in channel {}; {} cards drawn",
                    session.channel_id,
                    drawn.len()
                ),
                format!(
                    ":exclamation: | **{target_name}** was caught not calling UNO! They draw two cards."
                ),
            )
            .with_notice(
                Target::Mentioned(target.clone()),
                hand_message(session, &target),
            ))
        })
        .await
    }
}
