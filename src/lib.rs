//! Two-seat Uno engine: a human against a scripted machine, with saved games.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod persist;
pub mod state;
pub mod visualize;

pub use crate::action::{CardChoice, Seat, TurnEvent, TurnOutcome, TurnReport};
pub use crate::bot::{Bot, HumanBot, MachineBot};
pub use crate::card::{Card, CardKind, Color};
pub use crate::deck::Deck;
pub use crate::error::{CardError, GameError, InvalidAction, SaveError};
pub use crate::game::{Game, GameBuilder, GameConfig, play_match};
pub use crate::hand::Hand;
pub use crate::persist::{GameSnapshot, SaveStore};
pub use crate::state::{GameStateView, GameStatus, TurnPhase};
pub use crate::visualize::{describe_event, describe_report, render_state};
