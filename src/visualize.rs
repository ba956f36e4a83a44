use std::fmt::Write;

use crate::action::{Seat, TurnEvent, TurnOutcome, TurnReport};
use crate::state::{GameStateView, GameStatus};

pub fn render_state(state: &GameStateView) -> String {
    let mut out = String::new();
    if let GameStatus::Finished { winner } = state.status {
        let _ = writeln!(out, "Round over (winner: {winner})");
    }
    let _ = writeln!(out, "Table card: {}", state.table_card);
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Discard pile: {}",
        state.draw_pile_count, state.discard_pile_count
    );
    let _ = writeln!(
        out,
        "{} holds {} card(s).",
        state.self_seat.opponent(),
        state.opponent_hand_size
    );
    let _ = writeln!(out, "Hand of {}:", state.self_seat);
    for (index, card) in state.hand.iter().enumerate() {
        let marker = if card.is_compatible(&state.table_card) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, " {marker}[{index}] {card}");
    }
    out
}

pub fn describe_event(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Skipped(Seat::Human) => String::from("Your turn was skipped!"),
        TurnEvent::Skipped(seat) => format!("{seat}'s turn was skipped!"),
        TurnEvent::Drew { seat, card } => match seat {
            Seat::Human => format!("No playable card. You drew: {card}"),
            Seat::Machine => format!("{seat} has no playable card and draws one."),
        },
        TurnEvent::DeckExhausted(seat) => {
            format!("{seat} has no playable card, but no card is left to draw.")
        }
        TurnEvent::Played { seat, card } => format!("{seat} played: {card}"),
        TurnEvent::ColorChosen { color, .. } => format!("Color changed to: {}", color.code()),
        TurnEvent::Penalty { seat, drawn } => format!("{seat} draws {drawn} cards!"),
        TurnEvent::Uno(seat) => format!("{seat}: UNO!"),
        TurnEvent::Won(seat) => format!("{seat} HAS WON!"),
    }
}

pub fn describe_report(report: &TurnReport) -> String {
    let mut out = String::new();
    for event in &report.events {
        let _ = writeln!(out, "{}", describe_event(event));
    }
    if report.outcome == TurnOutcome::HumanQuit {
        let _ = writeln!(out, "{} left the table.", report.seat);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardKind, Color};
    use crate::state::TurnPhase;

    #[test]
    fn marks_playable_cards() {
        let state = GameStateView {
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingHumanMove,
            self_seat: Seat::Human,
            current_seat: Seat::Human,
            table_card: Card::number(Color::Red, 5).unwrap(),
            hand: vec![
                Card::number(Color::Blue, 5).unwrap(),
                Card::special(Color::Green, CardKind::Skip).unwrap(),
            ],
            opponent_hand_size: 3,
            draw_pile_count: 20,
            discard_pile_count: 4,
            skip_next: false,
        };
        let text = render_state(&state);
        assert!(text.contains("Table card: R 5"));
        assert!(text.contains(" *[0] B 5"));
        assert!(text.contains("  [1] & G"));
        assert!(text.contains("Machine holds 3 card(s)."));
    }

    #[test]
    fn describes_penalties() {
        let event = TurnEvent::Penalty {
            seat: Seat::Machine,
            drawn: 4,
        };
        assert_eq!(describe_event(&event), "Machine draws 4 cards!");
    }
}
