//! Deck composition and the draw/discard piles.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_types::{Card, Color, Face};

pub const DECK_SIZE: usize = 108;

/// One card of every distinct kind in a standard deck (54 kinds).
pub fn card_kinds() -> Vec<Card> {
    let mut kinds = Vec::with_capacity(54);
    for color in Color::ALL {
        for n in 0..=9 {
            kinds.push(Card::colored(color, Face::Number(n)));
        }
        kinds.push(Card::colored(color, Face::Reverse));
        kinds.push(Card::colored(color, Face::Skip));
        kinds.push(Card::colored(color, Face::DrawTwo));
    }
    kinds.push(Card::wild());
    kinds.push(Card::wild_draw_four());
    kinds
}

/// The 108-card standard deck in a fixed order.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        deck.push(Card::colored(color, Face::Number(0)));
        for _ in 0..2 {
            for n in 1..=9 {
                deck.push(Card::colored(color, Face::Number(n)));
            }
            deck.push(Card::colored(color, Face::Reverse));
            deck.push(Card::colored(color, Face::Skip));
            deck.push(Card::colored(color, Face::DrawTwo));
        }
    }
    for _ in 0..4 {
        deck.push(Card::wild());
        deck.push(Card::wild_draw_four());
    }
    deck
}

/// Draw and discard piles. The last element of each pile is its top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
}

impl Deck {
    /// A full shuffled deck with an empty discard pile.
    pub fn fresh<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck {
            draw_pile: standard_deck(),
            discard_pile: Vec::new(),
        };
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile.shuffle(rng);
    }

    pub fn top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty() && self.discard_pile.is_empty()
    }

    /// Take up to `n` cards off the draw pile.
    ///
    /// When the draw pile runs short, everything under the discard top is
    /// recycled (wild colors cleared) and shuffled in first. If the table
    /// still holds fewer than `n` cards the caller gets what exists.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<Card> {
        if self.draw_pile.len() < n {
            self.recycle_discards(rng);
        }
        let take = n.min(self.draw_pile.len());
        let split_at = self.draw_pile.len() - take;
        let mut drawn = self.draw_pile.split_off(split_at);
        drawn.reverse();
        drawn
    }

    fn recycle_discards<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(top) = self.discard_pile.pop() else {
            return;
        };
        let recycled = std::mem::replace(&mut self.discard_pile, vec![top]);
        if recycled.is_empty() {
            return;
        }
        self.draw_pile
            .extend(recycled.into_iter().map(Card::reverted));
        self.shuffle(rng);
    }

    /// Place a card on the discard pile. A colored wild underneath loses its color.
    pub fn discard(&mut self, card: Card) {
        if let Some(previous) = self.discard_pile.last_mut() {
            *previous = previous.reverted();
        }
        self.discard_pile.push(card);
    }

    /// Flip the top of the draw pile onto the discard pile.
    pub fn flip_starter(&mut self) -> Option<Card> {
        let card = self.draw_pile.pop()?;
        self.discard(card);
        Some(card)
    }

    /// Put the discard top back into the draw pile and reshuffle.
    pub fn return_top<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(card) = self.discard_pile.pop() {
            self.draw_pile.push(card.reverted());
            self.shuffle(rng);
        }
    }

    /// Slide cards under the discard pile, leaving the top untouched.
    pub fn bury(&mut self, cards: Vec<Card>) {
        let mut pile: Vec<Card> = cards.into_iter().map(Card::reverted).collect();
        pile.append(&mut self.discard_pile);
        self.discard_pile = pile;
    }

    /// Give the top wild its chosen color.
    pub fn colorize_top(&mut self, color: Color) {
        if let Some(top) = self.discard_pile.last_mut() {
            if top.is_wild() {
                top.color = Some(color);
            }
        }
    }
}
