use crate::action::CardChoice;
use crate::card::Color;
use crate::state::GameStateView;

pub use crate::bots::{HumanBot, MachineBot};

/// Controller for one seat. The engine only asks when a choice exists.
pub trait Bot {
    /// Pick one of the `playable` hand indices, or quit.
    fn choose_card(&mut self, state: &GameStateView, playable: &[usize]) -> CardChoice;

    /// Name the color of a wild card that was just played.
    fn choose_color(&mut self, state: &GameStateView) -> Color;
}
