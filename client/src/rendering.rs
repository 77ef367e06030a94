use crate::game::{GamePhase, SessionSnapshot};
use shared::{Board, Cell, Position};
use std::fmt::Write;

/// Text presentation of a session; redraws on every published snapshot
pub struct Renderer {
    show_board: bool,
}

impl Renderer {
    pub fn new(show_board: bool) -> Self {
        Renderer { show_board }
    }

    pub fn render(&mut self, snapshot: &SessionSnapshot) {
        println!("{}", self.frame(snapshot));
    }

    pub fn frame(&self, snapshot: &SessionSnapshot) -> String {
        let mut out = status_line(snapshot);

        if self.show_board && snapshot.phase != GamePhase::AwaitingOpponent {
            out.push('\n');
            out.push_str(&board_text(&snapshot.board));
        }

        out
    }
}

pub fn status_line(snapshot: &SessionSnapshot) -> String {
    let mut line = format!(
        "[{}] you: {}  opponent: {}",
        snapshot.phase, snapshot.scores.player, snapshot.scores.opponent
    );

    match (snapshot.phase, snapshot.outcome) {
        (GamePhase::AwaitingOpponent, _) => line.push_str("  (waiting for an opponent)"),
        (GamePhase::DeadEnd, _) => line.push_str("  (no moves left)"),
        (GamePhase::Cleared, _) => line.push_str("  (board cleared)"),
        (GamePhase::GameOver, Some(outcome)) => {
            let _ = write!(line, "  {}", outcome);
        }
        _ => {}
    }

    line
}

/// One block per layer; `.` never held a tile, `x` was matched away, `[n]` is highlighted
pub fn board_text(board: &Board) -> String {
    let mut out = String::new();

    for layer in 0..board.layer_count() {
        let _ = writeln!(out, "layer {}", layer);
        for row in 0..board.row_count() {
            for column in 0..board.column_count() {
                let cell = board
                    .cell(Position::new(layer, row, column))
                    .unwrap_or(Cell::Empty);
                let _ = write!(out, "{:>6}", cell_text(cell));
            }
            out.push('\n');
        }
    }

    out
}

fn cell_text(cell: Cell) -> String {
    match cell {
        Cell::Empty => ".".to_string(),
        Cell::Cleared => "x".to_string(),
        Cell::Tile(kind) if kind.is_wildcard() => "*".to_string(),
        Cell::Tile(kind) => kind.value().to_string(),
        Cell::Selected(kind) if kind.is_wildcard() => "[*]".to_string(),
        Cell::Selected(kind) => format!("[{}]", kind.value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Outcome, Scores};
    use shared::{Selection, BOARD_COLUMNS, BOARD_LAYERS};

    fn snapshot(phase: GamePhase, board: Board) -> SessionSnapshot {
        SessionSnapshot {
            revision: 3,
            pid: None,
            phase,
            outcome: None,
            board,
            scores: Scores {
                player: 18,
                opponent: 7,
            },
            selection: Selection::new(),
        }
    }

    fn one_row_board() -> Board {
        let mut codes = vec![vec![vec![0; BOARD_COLUMNS]; 1]; BOARD_LAYERS];
        codes[0][0][0] = 12;
        codes[0][0][1] = -1;
        codes[0][0][2] = 1005;
        codes[0][0][3] = 101;
        Board::from_codes(codes).unwrap()
    }

    #[test]
    fn test_status_line() {
        let snap = snapshot(GamePhase::Playing, Board::default());
        assert_eq!(status_line(&snap), "[playing] you: 18  opponent: 7");

        let mut over = snapshot(GamePhase::GameOver, Board::default());
        over.outcome = Some(Outcome::Lost);
        assert_eq!(
            status_line(&over),
            "[gameOver] you: 18  opponent: 7  Tough luck, you lost :("
        );
    }

    #[test]
    fn test_board_text() {
        let text = board_text(&one_row_board());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), BOARD_LAYERS * 2);
        assert_eq!(lines[0], "layer 0");
        assert!(lines[1].starts_with("    12     x   [5]     *     ."));
        assert_eq!(lines[1].len(), BOARD_COLUMNS * 6);
    }

    #[test]
    fn test_frame_hides_board_while_waiting() {
        let renderer = Renderer::new(true);
        let waiting = snapshot(GamePhase::AwaitingOpponent, one_row_board());
        assert!(!renderer.frame(&waiting).contains("layer 0"));

        let playing = snapshot(GamePhase::Playing, one_row_board());
        assert!(renderer.frame(&playing).contains("layer 0"));

        let plain = Renderer::new(false);
        assert!(!plain.frame(&playing).contains("layer 0"));
    }
}
