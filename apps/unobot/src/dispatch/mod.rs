//! Text command front door: parse, then route to the game service.

pub mod command;

pub use command::{Command, CommandError};

use tracing::debug;

use crate::error::AppError;
use crate::services::{Actor, Outcome, UnoService};

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Empty => AppError::bad_request("EMPTY_COMMAND", err.to_string()),
            CommandError::Unknown(_) => AppError::bad_request("UNKNOWN_COMMAND", err.to_string()),
        }
    }
}

/// Run one parsed command for `actor`.
pub async fn dispatch(
    service: &UnoService,
    actor: &Actor,
    command: Command,
) -> Result<Outcome, AppError> {
    debug!(
        guild_id = %actor.guild_id,
        channel_id = %actor.channel_id,
        player_id = %actor.user_id,
        command = command.name(),
        "Dispatching command"
    );
    match command {
        Command::Join => service.join(actor).await,
        Command::Leave => service.leave(actor).await,
        Command::Play(card_ref) => service.play(actor, &card_ref).await,
        Command::Color(color_ref) => service.choose_color(actor, &color_ref).await,
        Command::Draw => service.draw(actor).await,
        Command::Keep => service.keep(actor).await,
        Command::Peek => service.peek(actor).await,
        Command::Top => service.top_card(actor).await,
        Command::Hand => service.show_hand(actor).await,
        Command::Uno(mention) => service.call_uno(actor, mention.as_deref()).await,
    }
}

/// Parse `text` and run it.
pub async fn dispatch_text(
    service: &UnoService,
    actor: &Actor,
    text: &str,
) -> Result<Outcome, AppError> {
    let command = Command::parse(text)?;
    dispatch(service, actor, command).await
}
