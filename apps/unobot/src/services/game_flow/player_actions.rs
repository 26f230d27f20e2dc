use tracing::info;

use super::messages::{hand_message, name_of, turn_prompt};
use super::{Actor, UnoService};
use crate::domain::lifecycle::{pause_session, stop_session};
use crate::domain::moves::{choose_color, draw_cards, keep_card, play_card};
use crate::domain::scoring::score_cards;
use crate::domain::turns::check_action;
use crate::domain::uno_call::monitor_status;
use crate::domain::{
    card_display_name, lookup_card, lookup_color, ActionClass, Card, RuleError, Session,
    TurnAction,
};
use crate::error::AppError;
use crate::services::outcome::{FollowUp, Outcome, Target};

/// Resolve a play reference to a hand index (0-based).
///
/// `card_ref` is a 1-based index or free text. While deciding on a drawn
/// card only that card may be played; an empty reference means it.
fn resolve_card_ref(
    hand: &[Card],
    pending: TurnAction,
    card_ref: &str,
) -> Result<usize, RuleError> {
    let card_ref = card_ref.trim();

    if let TurnAction::DrawOneDecision { card_index } = pending {
        let drawn = hand
            .get(card_index)
            .ok_or_else(|| RuleError::invalid("Invalid card index."))?;
        if card_ref.is_empty() {
            return Ok(card_index);
        }
        let named = if card_ref.chars().all(|c| c.is_ascii_digit()) {
            card_ref
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| hand.get(i))
                .copied()
        } else {
            lookup_card(card_ref)
        };
        return match named {
            Some(card) if card == *drawn => Ok(card_index),
            _ => Err(RuleError::WrongAction { pending }),
        };
    }

    if card_ref.is_empty() {
        return Err(RuleError::invalid("Tell me which card to play."));
    }
    if card_ref.chars().all(|c| c.is_ascii_digit()) {
        return card_ref
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < hand.len())
            .ok_or_else(|| RuleError::invalid("Invalid card index."));
    }

    let card = lookup_card(card_ref)
        .ok_or_else(|| RuleError::invalid(format!("I don't know the card \"{card_ref}\".")))?;
    hand.iter()
        .position(|c| *c == card)
        .ok_or(RuleError::CardNotInHand(card))
}

impl UnoService {
    /// Play a card by 1-based hand index or by name.
    pub async fn play(&self, actor: &Actor, card_ref: &str) -> Result<Outcome, AppError> {
        let restart_secs = self.config.restart_delay.as_secs();
        self.mutate(actor, "play", |session, _rng| {
            let player_id = actor.user_id.as_str();
            let pending = check_action(session, player_id, ActionClass::Play)?;
            let index = resolve_card_ref(session.hand(player_id), pending, card_ref)?;
            let played = play_card(session, player_id, index)?;
            let name = name_of(session, player_id);
            let card_name = card_display_name(&played.card);
            let played_line = format!(":sparkles: | **{name}** plays a **{card_name}**!");

            if played.went_out {
                return Ok(finish_round(session, player_id, &name, played_line, restart_secs));
            }

            monitor_status(session);
            Ok(Outcome::success(
                format!(
                    "User {name} (ID: {player_id}) played {card_name} in channel {}",
                    session.channel_id
                ),
                format!("{played_line}\n{}", turn_prompt(session)),
            )
            .with_notice(Target::Caller, hand_message(session, player_id)))
        })
        .await
    }

    /// Give the wild on top its color.
    pub async fn choose_color(&self, actor: &Actor, color_ref: &str) -> Result<Outcome, AppError> {
        self.mutate(actor, "color", |session, _rng| {
            let player_id = actor.user_id.as_str();
            let pending = check_action(session, player_id, ActionClass::Color)?;
            let color = lookup_color(color_ref)
                .ok_or_else(|| RuleError::invalid("Pick red, yellow, green or blue."))?;

            choose_color(session, pending, color);
            monitor_status(session);

            let name = name_of(session, player_id);
            Ok(Outcome::success(
                format!(
                    "User {name} (ID: {player_id}) chose color {} in channel {}",
                    color.name(),
                    session.channel_id
                ),
                format!(
                    ":sparkles: | **{name}** picks **{}**!\n{}",
                    color.name(),
                    turn_prompt(session)
                ),
            ))
        })
        .await
    }

    /// Draw the forced count, or one card voluntarily.
    pub async fn draw(&self, actor: &Actor) -> Result<Outcome, AppError> {
        self.mutate(actor, "draw", |session, rng| {
            let player_id = actor.user_id.as_str();
            let pending = check_action(session, player_id, ActionClass::Draw)?;
            let drawn = draw_cards(session, player_id, pending, rng);
            monitor_status(session);

            let name = name_of(session, player_id);
            let drew_line = match drawn.len() {
                1 => format!(":sparkles: | **{name}** has drawn a card."),
                n => format!(":sparkles: | **{name}** has drawn {n} cards."),
            };
            let mut hand_notice = hand_message(session, player_id);
            if let (TurnAction::Play, [card]) = (pending, drawn.as_slice()) {
                hand_notice = format!(
                    "{hand_notice}\n\nYou drew **{}**. Play it or keep it.",
                    card_display_name(card)
                );
            }

            Ok(Outcome::success(
                format!(
                    "User {name} (ID: {player_id}) drew {} card(s) in channel {}",
                    drawn.len(),
                    session.channel_id
                ),
                format!("{drew_line}\n{}", turn_prompt(session)),
            )
            .with_notice(Target::Caller, hand_notice))
        })
        .await
    }

    /// Keep the card just drawn and pass.
    pub async fn keep(&self, actor: &Actor) -> Result<Outcome, AppError> {
        self.mutate(actor, "keep", |session, _rng| {
            let player_id = actor.user_id.as_str();
            check_action(session, player_id, ActionClass::Keep)?;
            keep_card(session);
            monitor_status(session);

            let name = name_of(session, player_id);
            Ok(Outcome::success(
                format!(
                    "User {name} (ID: {player_id}) kept their drawn card in channel {}",
                    session.channel_id
                ),
                format!(":sparkles: | **{name}** keeps their card.\n{}", turn_prompt(session)),
            )
            .with_notice(Target::Caller, hand_message(session, player_id)))
        })
        .await
    }
}

/// Score the round, park the session, and schedule the next deal.
fn finish_round(
    session: &mut Session,
    winner: &str,
    name: &str,
    played_line: String,
    restart_secs: u64,
) -> Outcome {
    let points = score_cards(session, winner);
    stop_session(session);
    pause_session(session);
    info!(
        guild_id = %session.guild_id,
        channel_id = %session.channel_id,
        player_id = winner,
        points,
        "Round won"
    );

    Outcome::success(
        format!(
            "User {name} (ID: {winner}) won an UNO game in channel {}, scoring {points} points!",
            session.channel_id
        ),
        format!(
            "{played_line}\n:tada: | {name} won! They earn {points} points. {restart_secs} second intermission..."
        ),
    )
    .with_follow_up(FollowUp::RestartRound)
}
