use serde::{Deserialize, Serialize};

use crate::action::Seat;
use crate::card::Card;

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: Seat },
}

/// Who the engine is waiting on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingHumanMove,
    AwaitingMachineMove,
    RoundOver,
}

/// Game state as seen from one seat: its own hand, only the size of the other.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub status: GameStatus,
    pub phase: TurnPhase,
    pub self_seat: Seat,
    pub current_seat: Seat,
    pub table_card: Card,
    pub hand: Vec<Card>,
    pub opponent_hand_size: usize,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub skip_next: bool,
}
