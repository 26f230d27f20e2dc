//! Chat command endpoint.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::dispatch::dispatch_text;
use crate::error::AppError;
use crate::services::Actor;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub user_id: String,
    pub user_name: String,
    pub text: String,
}

/// POST /api/uno/{guild_id}/{channel_id}
///
/// Runs one chat command and returns its `Outcome`. A follow-up the command
/// asks for (delayed round start) runs in the background and reports to the
/// configured sink.
async fn post_command(
    path: web::Path<(String, String)>,
    body: web::Json<CommandRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (guild_id, channel_id) = path.into_inner();
    let CommandRequest {
        user_id,
        user_name,
        text,
    } = body.into_inner();

    if user_id.trim().is_empty() {
        return Err(AppError::invalid(
            "INVALID_USER_ID",
            "user_id must not be empty".to_string(),
        ));
    }

    let actor = Actor::new(guild_id, channel_id, user_id, user_name);
    let outcome = dispatch_text(&app_state.service, &actor, &text).await?;

    if let Some(follow_up) = outcome.follow_up {
        info!(
            guild_id = %actor.guild_id,
            channel_id = %actor.channel_id,
            follow_up = ?follow_up,
            "Scheduling follow-up"
        );
        app_state.schedule(&actor.guild_id, &actor.channel_id, follow_up);
    }

    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{guild_id}/{channel_id}", web::post().to(post_command));
}
