use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::InvalidAction;

/// Cards held by one seat, in the order they were received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the card at `index`, shifting later cards down.
    pub fn take(&mut self, index: usize) -> Result<Card, InvalidAction> {
        if index >= self.cards.len() {
            return Err(InvalidAction::HandIndex(index));
        }
        Ok(self.cards.remove(index))
    }

    /// Indices of every card that may be played on `table`, ascending.
    pub fn playable_indices(&self, table: &Card) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_compatible(table))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_playable(&self, table: &Card) -> bool {
        self.cards.iter().any(|card| card.is_compatible(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardKind, Color};

    fn hand() -> Hand {
        Hand::from_cards(vec![
            Card::number(Color::Blue, 3).unwrap(),
            Card::number(Color::Red, 7).unwrap(),
            Card::special(Color::Yellow, CardKind::Skip).unwrap(),
            Card::wild(CardKind::DrawFour).unwrap(),
        ])
    }

    #[test]
    fn finds_playable_cards_in_order() {
        let table = Card::number(Color::Red, 3).unwrap();
        let hand = hand();
        assert_eq!(hand.playable_indices(&table), vec![0, 1, 3]);
        assert!(hand.has_playable(&table));
    }

    #[test]
    fn no_playable_card() {
        let table = Card::number(Color::Green, 5).unwrap();
        let hand = Hand::from_cards(vec![Card::number(Color::Red, 1).unwrap()]);
        assert!(!hand.has_playable(&table));
        assert!(hand.playable_indices(&table).is_empty());
    }

    #[test]
    fn take_keeps_remaining_order() {
        let mut hand = hand();
        let taken = hand.take(1).unwrap();
        assert_eq!(taken, Card::number(Color::Red, 7).unwrap());
        assert_eq!(hand.len(), 3);
        assert_eq!(hand.get(1).map(Card::kind), Some(CardKind::Skip));
        assert_eq!(hand.take(3), Err(InvalidAction::HandIndex(3)));
    }
}
