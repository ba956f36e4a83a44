use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// One of the two seats at the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Human,
    Machine,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::Human, Seat::Machine];

    #[inline]
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Human => Seat::Machine,
            Seat::Machine => Seat::Human,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Seat::Human => 0,
            Seat::Machine => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human => f.write_str("Player"),
            Seat::Machine => f.write_str("Machine"),
        }
    }
}

/// Answer of a controller asked which card to play.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CardChoice {
    /// Play the card at this hand index.
    Play(usize),
    /// Save and leave the match.
    Quit,
}

/// Result of a single half-turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    HumanQuit,
    RoundOver { winner: Seat },
}

/// Something that happened during a half-turn, in order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    Skipped(Seat),
    Drew { seat: Seat, card: Card },
    DeckExhausted(Seat),
    Played { seat: Seat, card: Card },
    ColorChosen { seat: Seat, color: Color },
    Penalty { seat: Seat, drawn: usize },
    Uno(Seat),
    Won(Seat),
}

/// Everything the caller needs to render one half-turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TurnReport {
    pub seat: Seat,
    pub events: Vec<TurnEvent>,
    pub outcome: TurnOutcome,
}
