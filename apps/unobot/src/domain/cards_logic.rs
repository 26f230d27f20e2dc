use super::cards_types::{Card, Face};

/// Can `card` be played on `top`?
///
/// Uncolored wilds always match. Otherwise the two tokens are compared one
/// character at a time: equal first characters or equal second characters.
/// `RD2` therefore matches a blue-chosen `BD4`, and `R5` matches `B5`.
pub fn card_matches(card: &Card, top: &Card) -> bool {
    if card.is_uncolored_wild() {
        return true;
    }
    let card_token = card.token();
    let top_token = top.token();
    let mut card_chars = card_token.chars();
    let mut top_chars = top_token.chars();

    if card_chars.next() == top_chars.next() {
        return true;
    }
    match (card_chars.next(), top_chars.next()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Human-readable card name: `Red 5`, `Blue Skip`, `Wild Draw 4 (Green)`.
pub fn card_display_name(card: &Card) -> String {
    let face = match card.face {
        Face::Number(n) => n.to_string(),
        Face::Skip => "Skip".to_string(),
        Face::Reverse => "Reverse".to_string(),
        Face::DrawTwo => "Draw 2".to_string(),
        Face::Wild => return wild_name("Wild", card),
        Face::WildDrawFour => return wild_name("Wild Draw 4", card),
    };
    match card.color {
        Some(color) => format!("{} {face}", color.name()),
        None => face,
    }
}

fn wild_name(base: &str, card: &Card) -> String {
    match card.color {
        Some(color) => format!("{base} ({})", color.name()),
        None => base.to_string(),
    }
}

/// Points a card is worth to the round winner.
pub fn card_points(card: &Card) -> u32 {
    match card.face {
        Face::Wild | Face::WildDrawFour => 50,
        Face::Skip | Face::Reverse | Face::DrawTwo => 20,
        Face::Number(n) => u32::from(n),
    }
}

/// Render a hand as `1. Red 5`, one card per line.
pub fn format_hand(hand: &[Card]) -> String {
    hand.iter()
        .enumerate()
        .map(|(i, card)| format!("{}. {}", i + 1, card_display_name(card)))
        .collect::<Vec<_>>()
        .join("\n")
}
