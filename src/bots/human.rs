use std::io::{self, BufRead, StdinLock, Stdout, Write};

use log::warn;

use crate::action::CardChoice;
use crate::bot::Bot;
use crate::card::Color;
use crate::state::GameStateView;
use crate::visualize::render_state;

/// Interactive seat that reads choices from a console.
pub struct HumanBot<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanBot<StdinLock<'static>, Stdout> {
    /// Human reading standard input and writing standard output.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanBot<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed line, or `None` on end of input.
    fn read_line(&mut self) -> Option<String> {
        if self.output.flush().is_err() {
            warn!("failed to flush console output");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                warn!("failed to read console input: {err}");
                None
            }
        }
    }
}

fn is_quit(input: &str) -> bool {
    ["g", "s", "save", "q", "quit"]
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}

impl<R: BufRead, W: Write> Bot for HumanBot<R, W> {
    fn choose_card(&mut self, state: &GameStateView, playable: &[usize]) -> CardChoice {
        let _ = writeln!(self.output, "\n=== {}'s turn ===", self.name);
        let _ = write!(self.output, "{}", render_state(state));
        loop {
            let _ = write!(
                self.output,
                "Choose a card index (or 'g' to save and quit): "
            );
            let Some(input) = self.read_line() else {
                let _ = writeln!(self.output);
                return CardChoice::Quit;
            };
            if is_quit(&input) {
                return CardChoice::Quit;
            }
            let Ok(index) = input.parse::<usize>() else {
                let _ = writeln!(self.output, "Invalid input: '{input}'.");
                continue;
            };
            if index >= state.hand.len() {
                let _ = writeln!(self.output, "Index out of range.");
                continue;
            }
            if !playable.contains(&index) {
                let _ = writeln!(self.output, "That card cannot be played.");
                continue;
            }
            return CardChoice::Play(index);
        }
    }

    fn choose_color(&mut self, _state: &GameStateView) -> Color {
        loop {
            let _ = write!(self.output, "Choose a color (R, Y, G, B): ");
            let Some(input) = self.read_line() else {
                warn!("input closed while choosing a color, defaulting to red");
                return Color::Red;
            };
            match Color::parse_playable(&input) {
                Some(color) => return color,
                None => {
                    let _ = writeln!(self.output, "Invalid color.");
                }
            }
        }
    }
}
