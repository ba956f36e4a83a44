use std::collections::HashMap;
use std::mem;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{CardChoice, Seat, TurnEvent, TurnOutcome, TurnReport};
use crate::bot::Bot;
use crate::card::{Card, Color, HAND_SIZE, full_deck};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction};
use crate::hand::Hand;
use crate::persist::{GameSnapshot, SNAPSHOT_VERSION};
use crate::state::{GameStateView, GameStatus, TurnPhase};

pub const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u64,
    pub hand_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hand_size: HAND_SIZE,
        }
    }
}

/// Builder that enables deterministic deck injection for tests.
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `cards` as the draw pile in this exact order instead of a shuffled deck.
    pub fn with_deck(mut self, cards: Vec<Card>) -> Self {
        self.deck = Some(cards);
        self
    }

    /// Override the opening hand size (7 by default).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Two-seat Uno engine: human against machine, human first.
pub struct Game {
    seed: u64,
    turn: u64,
    status: GameStatus,
    current: Seat,
    deck: Deck,
    hands: [Hand; 2],
    table_card: Card,
    skip_next: bool,
    rng: StdRng,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn phase(&self) -> TurnPhase {
        match (self.status, self.current) {
            (GameStatus::Finished { .. }, _) => TurnPhase::RoundOver,
            (GameStatus::Ongoing, Seat::Human) => TurnPhase::AwaitingHumanMove,
            (GameStatus::Ongoing, Seat::Machine) => TurnPhase::AwaitingMachineMove,
        }
    }

    pub fn table_card(&self) -> Card {
        self.table_card
    }

    pub fn skip_next(&self) -> bool {
        self.skip_next
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Half-turns played so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    /// Cards in the deck, both hands and on the table.
    pub fn total_cards(&self) -> usize {
        self.deck.count() + self.hands.iter().map(Hand::len).sum::<usize>() + 1
    }

    /// Hand indices `seat` could play on the current table card.
    pub fn legal_plays(&self, seat: Seat) -> Vec<usize> {
        self.hand(seat).playable_indices(&self.table_card)
    }

    pub fn state_view(&self, perspective: Seat) -> GameStateView {
        GameStateView {
            status: self.status,
            phase: self.phase(),
            self_seat: perspective,
            current_seat: self.current,
            table_card: self.table_card,
            hand: self.hand(perspective).cards().to_vec(),
            opponent_hand_size: self.hand(perspective.opponent()).len(),
            draw_pile_count: self.deck.draw_len(),
            discard_pile_count: self.deck.discard_len(),
            skip_next: self.skip_next,
        }
    }

    /// Plays one half-turn for the seat to act, asking `controller` for any
    /// choice that has to be made.
    pub fn play_turn(&mut self, controller: &mut dyn Bot) -> Result<TurnReport, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        let seat = self.current;
        let mut events = Vec::new();

        if self.skip_next {
            self.skip_next = false;
            debug!("{seat} loses the turn");
            events.push(TurnEvent::Skipped(seat));
            self.advance();
            return Ok(TurnReport {
                seat,
                events,
                outcome: TurnOutcome::Continue,
            });
        }

        if !self.hand(seat).has_playable(&self.table_card) {
            match self.deck.draw(&mut self.rng) {
                Some(card) => {
                    debug!("{seat} cannot play and draws {card}");
                    self.hands[seat.index()].push(card);
                    events.push(TurnEvent::Drew { seat, card });
                }
                None => {
                    debug!("{seat} cannot play and the deck is exhausted");
                    events.push(TurnEvent::DeckExhausted(seat));
                }
            }
            self.advance();
            return Ok(TurnReport {
                seat,
                events,
                outcome: TurnOutcome::Continue,
            });
        }

        let playable = self.legal_plays(seat);
        let index = match controller.choose_card(&self.state_view(seat), &playable) {
            CardChoice::Play(index) => index,
            CardChoice::Quit if seat == Seat::Machine => {
                return Err(InvalidAction::MachineQuit.into());
            }
            CardChoice::Quit => {
                info!("{seat} left the table on turn {}", self.turn);
                return Ok(TurnReport {
                    seat,
                    events,
                    outcome: TurnOutcome::HumanQuit,
                });
            }
        };
        self.play_card(seat, index, controller, &mut events)?;

        let outcome = self.check_winner(seat, &mut events);
        self.advance();
        Ok(TurnReport {
            seat,
            events,
            outcome,
        })
    }

    fn play_card(
        &mut self,
        seat: Seat,
        index: usize,
        controller: &mut dyn Bot,
        events: &mut Vec<TurnEvent>,
    ) -> Result<(), GameError> {
        let candidate = *self
            .hand(seat)
            .get(index)
            .ok_or(InvalidAction::HandIndex(index))?;
        if !candidate.is_compatible(&self.table_card) {
            return Err(InvalidAction::Incompatible {
                card: candidate,
                table: self.table_card,
            }
            .into());
        }

        // Color is settled while the card is still in hand.
        let mut card = candidate;
        let chosen = if card.color() == Color::Black {
            let color = controller.choose_color(&self.state_view(seat));
            card.set_color(color)?;
            Some(color)
        } else {
            None
        };

        self.hands[seat.index()].take(index)?;
        events.push(TurnEvent::Played {
            seat,
            card: candidate,
        });
        if let Some(color) = chosen {
            events.push(TurnEvent::ColorChosen { seat, color });
        }
        let previous = mem::replace(&mut self.table_card, card);
        self.deck.discard(previous);
        debug!("{seat} played {card} over {previous}");

        self.apply_effects(seat, card, events);
        Ok(())
    }

    fn apply_effects(&mut self, seat: Seat, card: Card, events: &mut Vec<TurnEvent>) {
        let kind = card.kind();
        let opponent = seat.opponent();
        let penalty = kind.penalty();
        if penalty > 0 {
            let drawn = self.deal(opponent, penalty);
            events.push(TurnEvent::Penalty {
                seat: opponent,
                drawn,
            });
        }
        if kind.skips_opponent() {
            self.skip_next = true;
        }
    }

    fn check_winner(&mut self, seat: Seat, events: &mut Vec<TurnEvent>) -> TurnOutcome {
        match self.hand(seat).len() {
            0 => {
                info!("{seat} wins after {} half-turns", self.turn + 1);
                self.status = GameStatus::Finished { winner: seat };
                events.push(TurnEvent::Won(seat));
                TurnOutcome::RoundOver { winner: seat }
            }
            1 => {
                events.push(TurnEvent::Uno(seat));
                TurnOutcome::Continue
            }
            _ => TurnOutcome::Continue,
        }
    }

    fn advance(&mut self) {
        self.turn += 1;
        if !self.is_finished() {
            self.current = self.current.opponent();
        }
    }

    /// Moves up to `count` cards from the deck into `seat`'s hand and returns
    /// how many were actually available.
    fn deal(&mut self, seat: Seat, count: usize) -> usize {
        let mut dealt = 0;
        for _ in 0..count {
            match self.deck.draw(&mut self.rng) {
                Some(card) => {
                    self.hands[seat.index()].push(card);
                    dealt += 1;
                }
                None => break,
            }
        }
        dealt
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = match deck {
            Some(cards) => Deck::from_cards(cards, Vec::new()),
            None => Deck::shuffled(&mut rng),
        };
        let opening_cards = deck.count();

        let mut game = Game {
            seed: config.seed,
            turn: 0,
            status: GameStatus::Ongoing,
            current: Seat::Human,
            deck,
            hands: [Hand::new(), Hand::new()],
            // Replaced below before the game is handed out.
            table_card: Card::Number {
                color: Color::Red,
                digit: 0,
            },
            skip_next: false,
            rng,
        };
        for seat in Seat::ALL {
            if game.deal(seat, config.hand_size) < config.hand_size {
                return Err(GameError::InvalidConfiguration(
                    "deck exhausted while dealing hands",
                ));
            }
        }
        game.table_card = game.draw_opening_card(opening_cards)?;
        debug!("round opens on {}", game.table_card);
        Ok(game)
    }

    /// Draws until a non-wild card turns up, discarding wild cards on the way.
    fn draw_opening_card(&mut self, attempts: usize) -> Result<Card, GameError> {
        for _ in 0..attempts {
            let Some(card) = self.deck.draw(&mut self.rng) else {
                break;
            };
            if !card.is_wild() {
                return Ok(card);
            }
            self.deck.discard(card);
        }
        Err(GameError::InvalidConfiguration(
            "deck has no card that can open the round",
        ))
    }

    /// Plain-data copy of the whole game for saving.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            seed: self.seed,
            turn: self.turn,
            status: self.status,
            current: self.current,
            skip_next: self.skip_next,
            table_card: self.table_card,
            deck: self.deck.clone(),
            human_hand: self.hands[Seat::Human.index()].clone(),
            machine_hand: self.hands[Seat::Machine.index()].clone(),
        }
    }

    /// Rebuilds a game from a snapshot. The random source is reseeded from the
    /// stored seed and turn counter.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GameError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GameError::SnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if snapshot.table_card.color() == Color::Black {
            return Err(GameError::InvalidConfiguration(
                "table card has no color assigned",
            ));
        }
        check_saved_cards(&snapshot)?;
        if let GameStatus::Finished { winner } = snapshot.status {
            let winner_hand = match winner {
                Seat::Human => &snapshot.human_hand,
                Seat::Machine => &snapshot.machine_hand,
            };
            if !winner_hand.is_empty() {
                return Err(GameError::InvalidConfiguration(
                    "winner still holds cards",
                ));
            }
        }
        let rng = StdRng::seed_from_u64(snapshot.seed ^ snapshot.turn.rotate_left(32));
        Ok(Game {
            seed: snapshot.seed,
            turn: snapshot.turn,
            status: snapshot.status,
            current: snapshot.current,
            deck: snapshot.deck,
            hands: [snapshot.human_hand, snapshot.machine_hand],
            table_card: snapshot.table_card,
            skip_next: snapshot.skip_next,
            rng,
        })
    }
}

/// Every saved card must be well formed and together they must make up exactly
/// one standard deck.
fn check_saved_cards(snapshot: &GameSnapshot) -> Result<(), GameError> {
    let saved = std::iter::once(&snapshot.table_card)
        .chain(snapshot.deck.draw_pile())
        .chain(snapshot.deck.discard_pile())
        .chain(snapshot.human_hand.cards())
        .chain(snapshot.machine_hand.cards());

    let mut counts: HashMap<Card, usize> = HashMap::new();
    for card in saved {
        card.validate()?;
        let mut card = *card;
        card.clear_wild_color();
        *counts.entry(card).or_default() += 1;
    }
    let mut expected: HashMap<Card, usize> = HashMap::new();
    for card in full_deck() {
        *expected.entry(card).or_default() += 1;
    }
    if counts != expected {
        return Err(GameError::InvalidConfiguration(
            "saved cards do not make up a standard deck",
        ));
    }
    Ok(())
}

/// Alternates half-turns until the round ends or the human quits. Every
/// report is handed to `observer` before the next half-turn starts.
pub fn play_match(
    game: &mut Game,
    human: &mut dyn Bot,
    machine: &mut dyn Bot,
    mut observer: impl FnMut(&Game, &TurnReport),
) -> Result<TurnOutcome, GameError> {
    loop {
        let controller: &mut dyn Bot = match game.current_seat() {
            Seat::Human => &mut *human,
            Seat::Machine => &mut *machine,
        };
        let report = game.play_turn(controller)?;
        observer(game, &report);
        match report.outcome {
            TurnOutcome::Continue => continue,
            outcome => return Ok(outcome),
        }
    }
}
