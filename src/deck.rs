use std::collections::VecDeque;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, full_deck};

/// Draw pile plus discard pile. The front of the draw pile is the next card drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: VecDeque<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Standard deck, shuffled.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self::from_cards(cards, Vec::new())
    }

    /// Deck with an exact draw order and discard history.
    pub fn from_cards(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile: draw_pile.into(),
            discard_pile,
        }
    }

    /// Takes the next card, recycling the discard pile first when the draw pile
    /// is empty. Returns `None` only when both piles are empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.recycle(rng);
        }
        self.draw_pile.pop_front()
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Cards in the draw and discard piles together.
    pub fn count(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> + '_ {
        self.draw_pile.iter()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.discard_pile.is_empty() {
            return;
        }
        debug!("recycling {} discarded cards", self.discard_pile.len());
        self.draw_pile
            .extend(self.discard_pile.drain(..).map(|mut card| {
                card.clear_wild_color();
                card
            }));
        self.draw_pile.make_contiguous().shuffle(rng);
    }
}
