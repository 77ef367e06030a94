//! Rules and wire format shared by every participant of a tile duel.
//!
//! The `board` module holds the pure rule engine (accessibility, selection,
//! pair resolution, scoring and the end-of-board scan). The `protocol` module
//! holds the typed messages exchanged between a client and the relay server
//! together with their `_`-delimited text encoding.

use std::time::Duration;

pub mod board;
pub mod protocol;

pub use board::{
    match_points, Board, BoardError, Cell, MovesLeft, Position, SelectedTile, Selection,
    TileKind, ToggleOutcome,
};
pub use protocol::{ClientMessage, PlayerId, ProtocolError, ServerMessage};

pub const BOARD_LAYERS: usize = 5;
pub const BOARD_COLUMNS: usize = 15;

pub const EMPTY_CODE: i32 = 0;
pub const CLEARED_CODE: i32 = -1;
/// Wildcard tile type; matches any other occupied tile, itself included.
pub const WILDCARD: u8 = 101;
pub const MAX_TILE_TYPE: u8 = WILDCARD;
/// Added to a tile's code while it is highlighted. Must stay above `MAX_TILE_TYPE`.
pub const SELECTED_OFFSET: i32 = 1000;

pub const MATCH_BASE_POINTS: u32 = 10;
pub const MIN_MATCH_POINTS: u32 = 1;
pub const SCORE_DECAY_UNIT: Duration = Duration::from_millis(500);
pub const CLEAR_BONUS: u32 = 100;

pub const FIELD_DELIMITER: char = '_';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_offset_never_collides_with_tile_types() {
        assert!(SELECTED_OFFSET > MAX_TILE_TYPE as i32);
        assert!(SELECTED_OFFSET + (MAX_TILE_TYPE as i32) < 2 * SELECTED_OFFSET);
    }

    #[test]
    fn test_board_dimensions() {
        assert_eq!(BOARD_LAYERS, 5);
        assert_eq!(BOARD_COLUMNS, 15);
    }

    #[test]
    fn test_score_constants() {
        assert!(MIN_MATCH_POINTS <= MATCH_BASE_POINTS);
        assert_eq!(SCORE_DECAY_UNIT.as_millis(), 500);
        assert_eq!(CLEAR_BONUS, 100);
    }
}
