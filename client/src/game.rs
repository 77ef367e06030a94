//! Session state machine
//!
//! A `Session` owns everything one client knows about the duel: its identity,
//! the board, both scores, the pending selection and the game phase. It is
//! mutated only through `on_tile_click` (local play) and `on_message`
//! (server traffic). After every entry point that changed something a fresh
//! `SessionSnapshot` is published for the presentation layer.

use crate::network::Transport;
use log::{debug, info, warn};
use shared::{
    match_points, Board, ClientMessage, MovesLeft, PlayerId, Position, Selection, ServerMessage,
    ToggleOutcome, CLEAR_BONUS,
};
use std::fmt;
use std::time::Instant;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingOpponent,
    Playing,
    /// Tiles remain on this player's board but no pair is free
    DeadEnd,
    /// This player removed every tile
    Cleared,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::AwaitingOpponent => "awaitingOpponent",
            GamePhase::Playing => "playing",
            GamePhase::DeadEnd => "deadEnd",
            GamePhase::Cleared => "cleared",
            GamePhase::GameOver => "gameOver",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won => f.write_str("**** YOU WON! ****"),
            Outcome::Lost => f.write_str("Tough luck, you lost :("),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub player: u32,
    /// Last value reported by the server
    pub opponent: u32,
}

/// Read-only copy of the session handed to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub pid: Option<PlayerId>,
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    pub board: Board,
    pub scores: Scores,
    pub selection: Selection,
}

pub struct Session<T> {
    transport: T,
    pid: Option<PlayerId>,
    phase: GamePhase,
    outcome: Option<Outcome>,
    last_match: Option<Instant>,
    board: Board,
    scores: Scores,
    selection: Selection,
    revision: u64,
    changes: watch::Sender<SessionSnapshot>,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        let initial = SessionSnapshot {
            revision: 0,
            pid: None,
            phase: GamePhase::AwaitingOpponent,
            outcome: None,
            board: Board::default(),
            scores: Scores::default(),
            selection: Selection::new(),
        };
        let (changes, _) = watch::channel(initial);

        Self {
            transport,
            pid: None,
            phase: GamePhase::AwaitingOpponent,
            outcome: None,
            last_match: None,
            board: Board::default(),
            scores: Scores::default(),
            selection: Selection::new(),
            revision: 0,
            changes,
        }
    }

    pub fn pid(&self) -> Option<&PlayerId> {
        self.pid.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Time of the latest successful match, or of the start signal
    pub fn last_match(&self) -> Option<Instant> {
        self.last_match
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            pid: self.pid.clone(),
            phase: self.phase,
            outcome: self.outcome,
            board: self.board.clone(),
            scores: self.scores,
            selection: self.selection.clone(),
        }
    }

    /// Receives a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    pub fn on_message(&mut self, raw: &str) {
        self.on_message_at(raw, Instant::now());
    }

    pub fn on_message_at(&mut self, raw: &str, now: Instant) {
        debug!("received: {}", raw);

        match raw.parse::<ServerMessage>() {
            Ok(message) => {
                if self.handle_message(message, now) {
                    self.publish();
                }
            }
            Err(e) if e.is_unknown_kind() => debug!("Ignoring message: {}", e),
            Err(e) => warn!("Dropping malformed message {:?}: {}", raw, e),
        }
    }

    /// Applies a decoded message; returns whether anything changed
    fn handle_message(&mut self, message: ServerMessage, now: Instant) -> bool {
        if self.phase == GamePhase::GameOver {
            debug!("Game is over, ignoring {:?}", message);
            return false;
        }

        match message {
            ServerMessage::Connected { pid } => {
                if let Some(own) = &self.pid {
                    warn!("Already connected as {}, ignoring new id {}", own, pid);
                    return false;
                }
                info!("Connected as {}", pid);
                self.pid = Some(pid);
                true
            }

            ServerMessage::Start { layout } => {
                if self.phase != GamePhase::AwaitingOpponent {
                    warn!("Ignoring start while {}", self.phase);
                    return false;
                }
                info!(
                    "Game started: {} rows, {} tiles",
                    layout.row_count(),
                    layout.occupied_count()
                );
                self.board = layout;
                self.selection = Selection::new();
                self.last_match = Some(now);
                self.phase = GamePhase::Playing;
                true
            }

            ServerMessage::Update { pid, score } => {
                // Our own score is always computed locally.
                if self.pid.as_ref() == Some(&pid) {
                    return false;
                }
                self.scores.opponent = score;
                true
            }

            ServerMessage::GameOver { winner } => {
                let outcome = if self.pid.as_ref() == Some(&winner) {
                    Outcome::Won
                } else {
                    Outcome::Lost
                };
                info!("Game over, winner {}: {}", winner, outcome);
                self.phase = GamePhase::GameOver;
                self.outcome = Some(outcome);
                true
            }
        }
    }

    pub fn on_tile_click(&mut self, position: Position) {
        self.on_tile_click_at(position, Instant::now());
    }

    pub fn on_tile_click_at(&mut self, position: Position, now: Instant) {
        if self.phase != GamePhase::Playing {
            debug!("Ignoring click at {:?} while {}", position, self.phase);
            return;
        }

        match self.board.toggle(&mut self.selection, position) {
            ToggleOutcome::Ignored => {
                debug!("Ignoring click on unavailable tile {:?}", position);
                return;
            }
            ToggleOutcome::Matched { first, second } => {
                debug!("Matched {:?} with {:?}", first, second);
                self.record_match(now);
            }
            ToggleOutcome::Mismatched { first, second } => {
                debug!("{:?} does not match {:?}", first, second);
            }
            ToggleOutcome::Selected(_) | ToggleOutcome::Deselected(_) => {}
        }

        self.publish();
    }

    fn record_match(&mut self, now: Instant) {
        let since = self.last_match.unwrap_or(now);
        let points = match_points(now.saturating_duration_since(since));
        self.scores.player = self.scores.player.saturating_add(points);
        self.last_match = Some(now);
        self.report_match(points);

        match self.board.scan_moves() {
            MovesLeft::Yes => {}
            MovesLeft::No => {
                info!("No moves left, final score {}", self.scores.player);
                self.phase = GamePhase::DeadEnd;
                self.report_done();
            }
            MovesLeft::Cleared => {
                self.scores.player = self.scores.player.saturating_add(CLEAR_BONUS);
                info!("Board cleared, final score {}", self.scores.player);
                self.phase = GamePhase::Cleared;
                self.report_match(CLEAR_BONUS);
                self.report_done();
            }
        }
    }

    fn report_match(&mut self, points: u32) {
        match self.pid.clone() {
            Some(pid) => self.send(&ClientMessage::Match { pid, points }),
            None => warn!("No player id yet, not reporting {} points", points),
        }
    }

    fn report_done(&mut self) {
        match self.pid.clone() {
            Some(pid) => self.send(&ClientMessage::Done { pid }),
            None => warn!("No player id yet, not reporting finished board"),
        }
    }

    fn send(&mut self, message: &ClientMessage) {
        self.transport.send(&message.to_string());
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.changes.send_replace(self.snapshot());
    }
}
