//! Chat text shared by the action handlers.

use crate::domain::{card_display_name, format_hand, Session, TurnAction};

pub fn mention(player_id: &str) -> String {
    format!("<@{player_id}>")
}

/// Extract the id from `<@id>` or `<@!id>`.
pub fn parse_mention(text: &str) -> Option<String> {
    let inner = text.trim().strip_prefix("<@")?.strip_suffix('>')?;
    let id = inner.strip_prefix('!').unwrap_or(inner);
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())).then(|| id.to_string())
}

/// What the current turn holder must do, addressed to them.
pub(super) fn turn_prompt(session: &Session) -> String {
    let Some(turn) = session.turn.as_ref() else {
        return String::new();
    };
    let who = mention(&turn.player_id);
    match turn.action {
        TurnAction::Play => format!(":mega: | Your turn {who}."),
        TurnAction::ForcedDraw { count } => format!(":mega: | You must draw {count} cards {who}."),
        TurnAction::ChooseColor { .. } => ":mega: | Choose a color for the next turn.".to_string(),
        TurnAction::DrawOneDecision { .. } => {
            format!(":mega: | Play the card you drew or keep it, {who}.")
        }
        TurnAction::Frozen => String::new(),
    }
}

pub(super) fn hand_message(session: &Session, player_id: &str) -> String {
    format!(
        ":notebook: | **Your hand:**\n\n{}",
        format_hand(session.hand(player_id))
    )
}

pub(super) fn top_card_line(session: &Session) -> String {
    match session.top_card() {
        Some(card) => format!(":sparkles: | Top card: **{}**", card_display_name(card)),
        None => ":sparkles: | The discard pile is empty.".to_string(),
    }
}

/// Display name of `player_id`, falling back to the raw id.
pub(super) fn name_of(session: &Session, player_id: &str) -> String {
    session
        .player_name(player_id)
        .unwrap_or(player_id)
        .to_string()
}
