//! Chat command text: `<option> [params]`.
//!
//! Options match by prefix (`j`, `jo`, `joi` all mean `join`) plus a few
//! dash aliases. Prefixes are tried in a fixed order, so `p` is `play` and
//! `pe` is `peek`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join,
    Leave,
    Play(String),
    Color(String),
    Draw,
    Keep,
    Peek,
    Top,
    Hand,
    /// Own declaration, or a callout when a mention is given.
    Uno(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
}

fn abbreviates(word: &str, option: &str) -> bool {
    word.starts_with(option)
}

impl Command {
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let text = text.trim();
        let (option, params) = match text.split_once(char::is_whitespace) {
            Some((option, params)) => (option, params.trim()),
            None => (text, ""),
        };
        if option.is_empty() {
            return Err(CommandError::Empty);
        }
        let option = option.to_lowercase();
        let opt = option.as_str();
        let params = params.to_string();

        let command = if abbreviates("join", opt) || matches!(opt, "-j" | "jn") {
            Command::Join
        } else if abbreviates("play", opt) || opt == "-p" {
            Command::Play(params)
        } else if abbreviates("color", opt) || opt == "-c" {
            Command::Color(params)
        } else if abbreviates("draw", opt) || opt == "-d" {
            Command::Draw
        } else if abbreviates("keep", opt) || opt == "-k" {
            Command::Keep
        } else if opt.contains('!') {
            Command::Uno((!params.is_empty()).then_some(params))
        } else if abbreviates("leave", opt) || abbreviates("quit", opt) || matches!(opt, "-l" | "-q")
        {
            Command::Leave
        } else if abbreviates("peek", opt) {
            Command::Peek
        } else if abbreviates("top", opt) {
            Command::Top
        } else if abbreviates("hand", opt) || opt == "-h" {
            Command::Hand
        } else {
            return Err(CommandError::Unknown(option));
        };
        Ok(command)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Join => "join",
            Command::Leave => "leave",
            Command::Play(_) => "play",
            Command::Color(_) => "color",
            Command::Draw => "draw",
            Command::Keep => "keep",
            Command::Peek => "peek",
            Command::Top => "top",
            Command::Hand => "hand",
            Command::Uno(_) => "uno",
        }
    }
}
