//! Token form and serde for cards.
//!
//! Cards are stored and displayed as short tokens: `R5`, `Gr` (reverse),
//! `BS` (skip), `YD2`, `W`, `WD4`. A wild whose color was chosen replaces the
//! leading `W` with the color letter (`R`, `BD4`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Color, Face};

impl Card {
    pub fn token(&self) -> String {
        let mut token = String::with_capacity(3);
        token.push(self.color.map(Color::letter).unwrap_or('W'));
        match self.face {
            Face::Number(n) => token.push_str(&n.to_string()),
            Face::Skip => token.push('S'),
            Face::Reverse => token.push('r'),
            Face::DrawTwo => token.push_str("D2"),
            Face::Wild => {}
            Face::WildDrawFour => token.push_str("D4"),
        }
        token
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid card token: {s}")))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {s}")))
    }
}
