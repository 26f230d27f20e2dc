//! Core card-related types: Card, Color, Face

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Single-letter code used in card tokens.
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'R' => Some(Color::Red),
            'Y' => Some(Color::Yellow),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Face {
    /// Numbered card, 0 through 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Face {
    pub fn is_wild(self) -> bool {
        matches!(self, Face::Wild | Face::WildDrawFour)
    }
}

/// A single card.
///
/// Colored faces always carry a color. Wild faces carry `None` in a hand or
/// pile and `Some(color)` only while lying on top of the discard pile after a
/// color was chosen for them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub color: Option<Color>,
    pub face: Face,
}

impl Card {
    pub const fn colored(color: Color, face: Face) -> Self {
        Card {
            color: Some(color),
            face,
        }
    }

    pub const fn wild() -> Self {
        Card {
            color: None,
            face: Face::Wild,
        }
    }

    pub const fn wild_draw_four() -> Self {
        Card {
            color: None,
            face: Face::WildDrawFour,
        }
    }

    pub fn is_wild(&self) -> bool {
        self.face.is_wild()
    }

    /// A wild card that is still waiting for its color.
    pub fn is_uncolored_wild(&self) -> bool {
        self.is_wild() && self.color.is_none()
    }

    /// The same card with any chosen wild color removed.
    pub fn reverted(self) -> Self {
        if self.is_wild() {
            Card {
                color: None,
                face: self.face,
            }
        } else {
            self
        }
    }
}

// Note: ordering is only for stable hand sorting in tests and views:
// color order R<Y<G<B with wilds last, then face order.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let key = |c: &Card| (c.color.is_none(), c.color, c.face);
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
