use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

pub const MAX_DIGIT: u8 = 9;
pub const SPECIAL_COPIES_PER_COLOR: usize = 2;
pub const WILD_COPIES: usize = 4;
pub const DECK_SIZE: usize = 72;
pub const HAND_SIZE: usize = 7;
pub const DRAW_TWO_PENALTY: usize = 2;
pub const DRAW_FOUR_PENALTY: usize = 4;

/// Card color. `Black` marks wild cards until their player names a color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Black,
    /// No color at all; never printed on a card.
    None,
}

impl Color {
    /// The four colors a player can name for a wild card.
    pub const PLAYABLE: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    #[inline]
    pub fn is_playable(self) -> bool {
        Self::PLAYABLE.contains(&self)
    }

    pub fn code(self) -> &'static str {
        match self {
            Color::Red => "R",
            Color::Yellow => "Y",
            Color::Green => "G",
            Color::Blue => "B",
            Color::Black => "W",
            Color::None => "",
        }
    }

    /// Parses a color letter or name as typed at the console.
    pub fn parse_playable(input: &str) -> Option<Color> {
        match input.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Some(Color::Red),
            "y" | "yellow" => Some(Color::Yellow),
            "g" | "green" => Some(Color::Green),
            "b" | "blue" => Some(Color::Blue),
            _ => None,
        }
    }
}

/// What a card does when played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number,
    Reverse,
    Skip,
    DrawTwo,
    DrawFour,
    WildColorChange,
}

impl CardKind {
    pub const SPECIALS: [CardKind; 3] = [CardKind::Reverse, CardKind::Skip, CardKind::DrawTwo];

    /// Wild kinds are dealt Black and recolored when played.
    #[inline]
    pub fn is_wild(self) -> bool {
        matches!(self, CardKind::DrawFour | CardKind::WildColorChange)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CardKind::Number => "",
            CardKind::Reverse => "^",
            CardKind::Skip => "&",
            CardKind::DrawTwo => "+2",
            CardKind::DrawFour => "+4",
            CardKind::WildColorChange => "%",
        }
    }

    /// Cards the opponent must take when this kind is played.
    pub fn penalty(self) -> usize {
        match self {
            CardKind::DrawTwo => DRAW_TWO_PENALTY,
            CardKind::DrawFour => DRAW_FOUR_PENALTY,
            _ => 0,
        }
    }

    /// Whether playing this kind forfeits the opponent's next turn.
    ///
    /// With only two seats a reverse hands the turn straight back, so it acts
    /// as a skip.
    pub fn skips_opponent(self) -> bool {
        matches!(
            self,
            CardKind::Skip | CardKind::Reverse | CardKind::DrawTwo | CardKind::DrawFour
        )
    }
}

/// A single card. Number cards carry a digit, every other kind is `Special`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Card {
    Number { color: Color, digit: u8 },
    Special { color: Color, kind: CardKind },
}

impl Card {
    pub fn number(color: Color, digit: u8) -> Result<Self, CardError> {
        if digit > MAX_DIGIT {
            return Err(CardError::DigitOutOfRange(digit));
        }
        if !color.is_playable() {
            return Err(CardError::NumberColor(color));
        }
        Ok(Card::Number { color, digit })
    }

    pub fn special(color: Color, kind: CardKind) -> Result<Self, CardError> {
        if kind == CardKind::Number {
            return Err(CardError::NumberKindForSpecial);
        }
        Ok(Card::Special { color, kind })
    }

    /// Uncolored wild card of the given kind.
    pub fn wild(kind: CardKind) -> Result<Self, CardError> {
        if !kind.is_wild() {
            return Err(CardError::NotWild);
        }
        Ok(Card::Special {
            color: Color::Black,
            kind,
        })
    }

    /// Re-checks the construction rules, for cards that did not come through
    /// the constructors.
    pub fn validate(&self) -> Result<(), CardError> {
        match *self {
            Card::Number { color, digit } => Card::number(color, digit).map(|_| ()),
            Card::Special { kind, .. } if kind == CardKind::Number => {
                Err(CardError::NumberKindForSpecial)
            }
            Card::Special { color, kind } => {
                if color.is_playable() || (kind.is_wild() && color == Color::Black) {
                    Ok(())
                } else {
                    Err(CardError::SpecialColor { kind, color })
                }
            }
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        match self {
            Card::Number { color, .. } | Card::Special { color, .. } => *color,
        }
    }

    #[inline]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Number { .. } => CardKind::Number,
            Card::Special { kind, .. } => *kind,
        }
    }

    #[inline]
    pub fn digit(&self) -> Option<u8> {
        match self {
            Card::Number { digit, .. } => Some(*digit),
            Card::Special { .. } => None,
        }
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.kind().is_wild()
    }

    /// Names the color of a wild card after it has been played.
    pub fn set_color(&mut self, new_color: Color) -> Result<(), CardError> {
        if !new_color.is_playable() {
            return Err(CardError::InvalidWildColor(new_color));
        }
        match self {
            Card::Special { color, kind } if kind.is_wild() => {
                *color = new_color;
                Ok(())
            }
            _ => Err(CardError::NotWild),
        }
    }

    /// Returns a wild card to Black; other cards are left alone.
    pub fn clear_wild_color(&mut self) {
        if let Card::Special { color, kind } = self {
            if kind.is_wild() {
                *color = Color::Black;
            }
        }
    }

    /// Whether this card may be played on top of `table`.
    pub fn is_compatible(&self, table: &Card) -> bool {
        match self {
            Card::Number { digit, .. } => {
                self.matches_color(table) || table.digit() == Some(*digit)
            }
            Card::Special { color, kind } => {
                if *kind == table.kind() {
                    true
                } else if table.is_wild() {
                    *color == table.color()
                } else {
                    self.matches_color(table)
                }
            }
        }
    }

    fn matches_color(&self, table: &Card) -> bool {
        let color = self.color();
        color == Color::Black || color == table.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number { color, digit } => write!(f, "{} {}", color.code(), digit),
            Card::Special { color, kind } => write!(f, "{} {}", kind.symbol(), color.code()),
        }
    }
}

/// Builds the full 72-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::PLAYABLE {
        for digit in 0..=MAX_DIGIT {
            deck.push(Card::Number { color, digit });
        }
    }
    for color in Color::PLAYABLE {
        for _ in 0..SPECIAL_COPIES_PER_COLOR {
            for kind in CardKind::SPECIALS {
                deck.push(Card::Special { color, kind });
            }
        }
    }
    for _ in 0..WILD_COPIES {
        for kind in [CardKind::DrawFour, CardKind::WildColorChange] {
            deck.push(Card::Special {
                color: Color::Black,
                kind,
            });
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(color: Color, digit: u8) -> Card {
        Card::number(color, digit).unwrap()
    }

    fn special(color: Color, kind: CardKind) -> Card {
        Card::special(color, kind).unwrap()
    }

    #[test]
    fn number_construction_is_validated() {
        assert_eq!(
            Card::number(Color::Red, 10),
            Err(CardError::DigitOutOfRange(10))
        );
        assert_eq!(
            Card::number(Color::Black, 3),
            Err(CardError::NumberColor(Color::Black))
        );
        assert_eq!(
            Card::special(Color::Red, CardKind::Number),
            Err(CardError::NumberKindForSpecial)
        );
        assert_eq!(num(Color::Blue, 9).digit(), Some(9));
    }

    #[test]
    fn validate_catches_cards_built_by_hand() {
        for card in full_deck() {
            assert_eq!(card.validate(), Ok(()));
        }
        let mut colored = Card::wild(CardKind::DrawFour).unwrap();
        colored.set_color(Color::Yellow).unwrap();
        assert_eq!(colored.validate(), Ok(()));

        let bad_digit = Card::Number {
            color: Color::Red,
            digit: 42,
        };
        assert_eq!(bad_digit.validate(), Err(CardError::DigitOutOfRange(42)));
        let black_number = Card::Number {
            color: Color::Black,
            digit: 4,
        };
        assert_eq!(
            black_number.validate(),
            Err(CardError::NumberColor(Color::Black))
        );
        let black_skip = Card::Special {
            color: Color::Black,
            kind: CardKind::Skip,
        };
        assert_eq!(
            black_skip.validate(),
            Err(CardError::SpecialColor {
                kind: CardKind::Skip,
                color: Color::Black
            })
        );
        let colorless_wild = Card::Special {
            color: Color::None,
            kind: CardKind::WildColorChange,
        };
        assert!(colorless_wild.validate().is_err());
        let number_special = Card::Special {
            color: Color::Red,
            kind: CardKind::Number,
        };
        assert_eq!(
            number_special.validate(),
            Err(CardError::NumberKindForSpecial)
        );
    }

    #[test]
    fn only_draw_four_and_color_change_are_wild() {
        let wild: Vec<CardKind> = [
            CardKind::Number,
            CardKind::Reverse,
            CardKind::Skip,
            CardKind::DrawTwo,
            CardKind::DrawFour,
            CardKind::WildColorChange,
        ]
        .into_iter()
        .filter(|kind| kind.is_wild())
        .collect();
        assert_eq!(wild, vec![CardKind::DrawFour, CardKind::WildColorChange]);
    }

    #[test]
    fn same_color_numbers_are_compatible() {
        for color in Color::PLAYABLE {
            for a in 0..=MAX_DIGIT {
                for b in 0..=MAX_DIGIT {
                    assert!(num(color, a).is_compatible(&num(color, b)));
                }
            }
        }
    }

    #[test]
    fn numbers_match_across_colors_by_digit() {
        let table = num(Color::Red, 5);
        assert!(num(Color::Blue, 5).is_compatible(&table));
        assert!(!num(Color::Blue, 3).is_compatible(&table));
    }

    #[test]
    fn same_kind_specials_match_regardless_of_color() {
        let table = special(Color::Green, CardKind::Skip);
        assert!(special(Color::Yellow, CardKind::Skip).is_compatible(&table));
        assert!(!special(Color::Yellow, CardKind::Reverse).is_compatible(&table));
        assert!(special(Color::Green, CardKind::Reverse).is_compatible(&table));
    }

    #[test]
    fn black_cards_play_on_any_non_wild_table_card() {
        let mut tables: Vec<Card> = full_deck().into_iter().filter(|c| !c.is_wild()).collect();
        tables.push(special(Color::Red, CardKind::DrawTwo));
        for kind in [CardKind::DrawFour, CardKind::WildColorChange] {
            let candidate = Card::wild(kind).unwrap();
            for table in &tables {
                assert!(candidate.is_compatible(table), "{candidate} on {table}");
            }
        }
    }

    #[test]
    fn resolved_wild_table_requires_matching_color() {
        let mut table = Card::wild(CardKind::WildColorChange).unwrap();
        table.set_color(Color::Blue).unwrap();

        assert!(special(Color::Blue, CardKind::Skip).is_compatible(&table));
        assert!(!special(Color::Red, CardKind::Skip).is_compatible(&table));
        assert!(num(Color::Blue, 1).is_compatible(&table));
        assert!(!num(Color::Red, 1).is_compatible(&table));
        // Same wild kind always matches, an uncolored wild of another kind does not.
        assert!(Card::wild(CardKind::WildColorChange).unwrap().is_compatible(&table));
        assert!(!Card::wild(CardKind::DrawFour).unwrap().is_compatible(&table));
    }

    #[test]
    fn set_color_only_recolors_wild_cards() {
        let mut wild = Card::wild(CardKind::DrawFour).unwrap();
        assert_eq!(
            wild.set_color(Color::Black),
            Err(CardError::InvalidWildColor(Color::Black))
        );
        wild.set_color(Color::Green).unwrap();
        assert_eq!(wild.color(), Color::Green);
        assert!(wild.is_wild());

        let mut skip = special(Color::Red, CardKind::Skip);
        assert_eq!(skip.set_color(Color::Blue), Err(CardError::NotWild));
        assert_eq!(skip.color(), Color::Red);
    }

    #[test]
    fn full_deck_composition() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        for color in Color::PLAYABLE {
            let numbers = deck
                .iter()
                .filter(|c| c.kind() == CardKind::Number && c.color() == color)
                .count();
            assert_eq!(numbers, 10);
            for kind in CardKind::SPECIALS {
                let copies = deck
                    .iter()
                    .filter(|c| c.kind() == kind && c.color() == color)
                    .count();
                assert_eq!(copies, SPECIAL_COPIES_PER_COLOR);
            }
        }
        for kind in [CardKind::DrawFour, CardKind::WildColorChange] {
            let copies = deck
                .iter()
                .filter(|c| c.kind() == kind && c.color() == Color::Black)
                .count();
            assert_eq!(copies, WILD_COPIES);
        }
    }

    #[test]
    fn display_uses_codes_and_symbols() {
        assert_eq!(num(Color::Red, 5).to_string(), "R 5");
        assert_eq!(special(Color::Green, CardKind::DrawTwo).to_string(), "+2 G");
        assert_eq!(Card::wild(CardKind::WildColorChange).unwrap().to_string(), "% W");
    }
}
