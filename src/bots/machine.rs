use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::CardChoice;
use crate::bot::Bot;
use crate::card::Color;
use crate::state::GameStateView;

/// Scripted opponent: plays the first legal card and names a random color.
pub struct MachineBot<R: Rng> {
    rng: R,
}

impl<R: Rng> MachineBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for MachineBot<R> {
    fn choose_card(&mut self, _state: &GameStateView, playable: &[usize]) -> CardChoice {
        match playable.first() {
            Some(index) => CardChoice::Play(*index),
            // Unreachable from the engine, which rejects a machine quit.
            None => CardChoice::Quit,
        }
    }

    fn choose_color(&mut self, _state: &GameStateView) -> Color {
        *Color::PLAYABLE
            .choose(&mut self.rng)
            .unwrap_or(&Color::Red)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::action::Seat;
    use crate::card::Card;
    use crate::state::{GameStatus, TurnPhase};

    fn view() -> GameStateView {
        GameStateView {
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingMachineMove,
            self_seat: Seat::Machine,
            current_seat: Seat::Machine,
            table_card: Card::number(Color::Red, 1).unwrap(),
            hand: Vec::new(),
            opponent_hand_size: 7,
            draw_pile_count: 10,
            discard_pile_count: 0,
            skip_next: false,
        }
    }

    #[test]
    fn plays_first_legal_index() {
        let mut bot = MachineBot::new(StdRng::seed_from_u64(0));
        assert_eq!(bot.choose_card(&view(), &[2, 4, 5]), CardChoice::Play(2));
    }

    #[test]
    fn names_every_real_color_and_never_black() {
        let mut bot = MachineBot::new(StdRng::seed_from_u64(11));
        let state = view();
        let mut seen = Vec::new();
        for _ in 0..200 {
            let color = bot.choose_color(&state);
            assert!(color.is_playable());
            if !seen.contains(&color) {
                seen.push(color);
            }
        }
        assert_eq!(seen.len(), 4);
    }
}
