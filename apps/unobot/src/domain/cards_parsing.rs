//! Card parsing: exact tokens (`R5`, `WD4`) and free-text lookup ("red skip").

use std::str::FromStr;

use super::cards_types::{Card, Color, Face};
use super::dealing::card_kinds;
use super::errors::RuleError;

impl FromStr for Card {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RuleError::invalid(format!("Parse card: {s}"));

        let lead = s.chars().next().ok_or_else(invalid)?;
        let color = match lead {
            'W' => None,
            other => Some(Color::from_letter(other).ok_or_else(invalid)?),
        };
        let face = match &s[lead.len_utf8()..] {
            "" => Face::Wild,
            "D4" => Face::WildDrawFour,
            "D2" => Face::DrawTwo,
            "S" => Face::Skip,
            "r" => Face::Reverse,
            digit if digit.len() == 1 => {
                let n = digit.chars().next().and_then(|c| c.to_digit(10));
                Face::Number(n.ok_or_else(invalid)? as u8)
            }
            _ => return Err(invalid()),
        };

        // `W` only prefixes wild faces
        if color.is_none() && !face.is_wild() {
            return Err(invalid());
        }
        Ok(Card { color, face })
    }
}

/// Resolve free text to a card that exists in a standard deck.
///
/// Exact tokens win (case-insensitive). Otherwise the text is split on the
/// first delimiter kind present (quotes, then `;`, then `,`, then space) and
/// scanned for a color keyword followed by a modifier or a digit.
pub fn lookup_card(search: &str) -> Option<Card> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }

    if let Some(card) = card_kinds()
        .into_iter()
        .find(|c| c.token().eq_ignore_ascii_case(search))
    {
        return Some(card);
    }

    let lowered = search.to_lowercase();
    let tokens = split_search(&lowered);
    let token = match tokens.as_slice() {
        [] => return None,
        [single] => single_token(single)?,
        [first, second, ..] => two_tokens(first, second)?,
    };

    token
        .parse::<Card>()
        .ok()
        .filter(|card| !(card.is_wild() && card.color.is_some()))
}

/// Leading `r`/`y`/`g`/`b` selects a color.
pub fn lookup_color(search: &str) -> Option<Color> {
    let search = search.trim().to_lowercase();
    match search.chars().next()? {
        'r' => Some(Color::Red),
        'y' => Some(Color::Yellow),
        'g' => Some(Color::Green),
        'b' => Some(Color::Blue),
        _ => None,
    }
}

fn split_search(search: &str) -> Vec<&str> {
    let is_quote = |c: char| c == '"' || c == '\'';
    if search.contains(is_quote) {
        return search
            .split(is_quote)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
    }

    let delimiter = [';', ',', ' ']
        .into_iter()
        .find(|d| search.contains(*d))
        .unwrap_or(' ');
    search
        .splitn(2, delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// (letter, full word); order matters: "red" is checked as a word because a
// bare `r` shows up inside too many other words.
const COLOR_WORDS: [(char, &str); 5] = [
    ('R', "red"),
    ('Y', "yellow"),
    ('G', "green"),
    ('B', "blue"),
    ('W', "wild"),
];

fn single_token(token: &str) -> Option<String> {
    let (letter, word) = COLOR_WORDS.iter().copied().find(|(letter, word)| {
        if *letter == 'R' {
            token.contains(word)
        } else {
            token.contains(letter.to_ascii_lowercase())
        }
    })?;

    let rest = if token.contains(word) {
        token.replacen(word, "", 1)
    } else {
        token.replacen(letter.to_ascii_lowercase(), "", 1)
    };

    let mut card = letter.to_string();
    if rest.contains("rev") {
        card.push('r');
    } else if rest.contains('s') {
        card.push('S');
    } else if rest.contains('d') && rest.contains('2') {
        card.push_str("D2");
    } else if rest.contains('d') && rest.contains('4') {
        card.push_str("D4");
    } else if let Some(digit) = rest.chars().find(char::is_ascii_digit) {
        card.push(digit);
    }
    Some(card)
}

fn two_tokens(first: &str, second: &str) -> Option<String> {
    let (letter, _) = COLOR_WORDS
        .iter()
        .copied()
        .find(|(letter, _)| first.starts_with(letter.to_ascii_lowercase()))?;

    let mut card = letter.to_string();
    if second.starts_with('r') {
        card.push('r');
    } else if second.starts_with('s') {
        card.push('S');
    } else if second.contains('d') && second.contains('2') {
        card.push_str("D2");
    } else if second.contains('d') && second.contains('4') {
        card.push_str("D4");
    } else if !second.is_empty() && second.chars().all(|c| c.is_ascii_digit()) {
        card.push_str(second);
    }
    Some(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    #[test]
    fn parses_every_token_shape() {
        assert_eq!(card("R5"), Card::colored(Color::Red, Face::Number(5)));
        assert_eq!(card("Gr"), Card::colored(Color::Green, Face::Reverse));
        assert_eq!(card("YS"), Card::colored(Color::Yellow, Face::Skip));
        assert_eq!(card("BD2"), Card::colored(Color::Blue, Face::DrawTwo));
        assert_eq!(card("W"), Card::wild());
        assert_eq!(card("WD4"), Card::wild_draw_four());
        assert_eq!(card("R"), Card::colored(Color::Red, Face::Wild));
        assert_eq!(card("BD4"), Card::colored(Color::Blue, Face::WildDrawFour));
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in ["", "X1", "R10", "W5", "WD2", "RR", "r5", "RD3"] {
            assert!(bad.parse::<Card>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn lookup_exact_tokens_ignore_case() {
        assert_eq!(lookup_card("rr"), Some(card("Rr")));
        assert_eq!(lookup_card("wd4"), Some(card("WD4")));
        assert_eq!(lookup_card("g7"), Some(card("G7")));
        assert_eq!(lookup_card(" bs "), Some(card("BS")));
    }

    #[test]
    fn lookup_single_word_phrases() {
        assert_eq!(lookup_card("red5"), Some(card("R5")));
        assert_eq!(lookup_card("red4"), Some(card("R4")));
        assert_eq!(lookup_card("greenreverse"), Some(card("Gr")));
        assert_eq!(lookup_card("blueskip"), Some(card("BS")));
        assert_eq!(lookup_card("yellowd2"), Some(card("YD2")));
        assert_eq!(lookup_card("wild"), Some(Card::wild()));
        assert_eq!(lookup_card("wilddraw4"), Some(Card::wild_draw_four()));
    }

    #[test]
    fn lookup_two_word_phrases() {
        assert_eq!(lookup_card("red 5"), Some(card("R5")));
        assert_eq!(lookup_card("green reverse"), Some(card("Gr")));
        assert_eq!(lookup_card("blue;skip"), Some(card("BS")));
        assert_eq!(lookup_card("yellow, draw2"), Some(card("YD2")));
        assert_eq!(lookup_card("wild draw4"), Some(Card::wild_draw_four()));
        assert_eq!(lookup_card("\"blue\" \"9\""), Some(card("B9")));
    }

    #[test]
    fn lookup_rejects_cards_not_in_a_deck() {
        assert_eq!(lookup_card("red"), None);
        assert_eq!(lookup_card("purple 5"), None);
        assert_eq!(lookup_card("red 12"), None);
        assert_eq!(lookup_card("wild 4"), None);
        assert_eq!(lookup_card("   "), None);
    }

    #[test]
    fn lookup_color_uses_leading_letter() {
        assert_eq!(lookup_color("Red"), Some(Color::Red));
        assert_eq!(lookup_color("y"), Some(Color::Yellow));
        assert_eq!(lookup_color("green"), Some(Color::Green));
        assert_eq!(lookup_color(" blue"), Some(Color::Blue));
        assert_eq!(lookup_color("wild"), None);
        assert_eq!(lookup_color(""), None);
    }
}
