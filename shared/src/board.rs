//! Board rule engine
//!
//! Pure, deterministic functions over a layered tile board:
//! - accessibility of a tile (`Board::is_selectable`)
//! - the two-phase select/match cycle (`Board::toggle`)
//! - time-decayed match scoring (`match_points`)
//! - the end-of-board scan that tells a live board from a dead end or a clear (`Board::scan_moves`)
//!
//! Nothing in here performs I/O or reads a clock; callers supply elapsed time.

use crate::{
    BOARD_COLUMNS, BOARD_LAYERS, CLEARED_CODE, EMPTY_CODE, MATCH_BASE_POINTS, MAX_TILE_TYPE,
    MIN_MATCH_POINTS, SCORE_DECAY_UNIT, SELECTED_OFFSET, WILDCARD,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Reasons a layout is rejected when it is turned into a `Board`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} layers, found {found}")]
    LayerCount { expected: usize, found: usize },

    #[error("layer {layer} row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        layer: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("layer {layer} has {found} rows, expected {expected}")]
    RaggedLayer {
        layer: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile code {0}")]
    InvalidCode(i64),
}

/// A tile type in `1..=MAX_TILE_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(u8);

impl TileKind {
    pub const WILDCARD: TileKind = TileKind(WILDCARD);

    pub fn new(value: u8) -> Option<Self> {
        (1..=MAX_TILE_TYPE).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_wildcard(self) -> bool {
        self.0 == WILDCARD
    }

    /// Two kinds pair off when they are equal or when either one is the wildcard
    pub fn matches(self, other: TileKind) -> bool {
        self == other || self.is_wildcard() || other.is_wildcard()
    }
}

/// Contents of a single board cell
///
/// On the wire every cell is an integer code: `0` for a cell that never held a
/// tile, `-1` for a tile that has been matched away, `t` for a tile of type `t`
/// and `t + SELECTED_OFFSET` for the same tile while it is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub enum Cell {
    Empty,
    Cleared,
    Tile(TileKind),
    Selected(TileKind),
}

impl Cell {
    pub fn from_code(code: i64) -> Result<Self, BoardError> {
        let invalid = || BoardError::InvalidCode(code);
        match code {
            c if c == EMPTY_CODE as i64 => Ok(Cell::Empty),
            c if c == CLEARED_CODE as i64 => Ok(Cell::Cleared),
            c if c > SELECTED_OFFSET as i64 => {
                let value = u8::try_from(c - SELECTED_OFFSET as i64).map_err(|_| invalid())?;
                TileKind::new(value).map(Cell::Selected).ok_or_else(invalid)
            }
            c => {
                let value = u8::try_from(c).map_err(|_| invalid())?;
                TileKind::new(value).map(Cell::Tile).ok_or_else(invalid)
            }
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Cell::Empty => EMPTY_CODE,
            Cell::Cleared => CLEARED_CODE,
            Cell::Tile(kind) => kind.value() as i32,
            Cell::Selected(kind) => kind.value() as i32 + SELECTED_OFFSET,
        }
    }

    /// Tile type with the selection highlight stripped
    pub fn kind(self) -> Option<TileKind> {
        match self {
            Cell::Tile(kind) | Cell::Selected(kind) => Some(kind),
            Cell::Empty | Cell::Cleared => None,
        }
    }

    pub fn is_occupied(self) -> bool {
        self.kind().is_some()
    }

    /// Equivalent to `code <= 0`
    pub fn is_vacant(self) -> bool {
        !self.is_occupied()
    }

    pub fn is_selected(self) -> bool {
        matches!(self, Cell::Selected(_))
    }
}

impl TryFrom<i64> for Cell {
    type Error = BoardError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Cell::from_code(code)
    }
}

impl From<Cell> for i32 {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub layer: usize,
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(layer: usize, row: usize, column: usize) -> Self {
        Self { layer, row, column }
    }
}

/// A tile recorded at the moment it was highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedTile {
    pub position: Position,
    pub kind: TileKind,
}

/// The pending selection; holds at most two tiles and empties after every pair evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    tiles: Vec<SelectedTile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[SelectedTile] {
        &self.tiles
    }

    pub fn contains(&self, position: Position) -> bool {
        self.tiles.iter().any(|tile| tile.position == position)
    }

    fn push(&mut self, tile: SelectedTile) {
        self.tiles.push(tile);
    }

    fn remove(&mut self, position: Position) {
        if let Some(index) = self.tiles.iter().position(|t| t.position == position) {
            self.tiles.remove(index);
        }
    }

    fn take_pair(&mut self) -> Option<(SelectedTile, SelectedTile)> {
        match self.tiles.as_slice() {
            [first, second] => {
                let pair = (*first, *second);
                self.tiles.clear();
                Some(pair)
            }
            _ => None,
        }
    }
}

/// What a single click did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Empty, cleared, out-of-range or blocked cell; nothing changed
    Ignored,
    Selected(SelectedTile),
    Deselected(Position),
    /// Both tiles are now cleared
    Matched {
        first: SelectedTile,
        second: SelectedTile,
    },
    /// Both tiles were restored to their unselected codes
    Mismatched {
        first: SelectedTile,
        second: SelectedTile,
    },
}

/// Result of scanning a freshly matched board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovesLeft {
    Yes,
    /// Tiles remain but no free pair exists
    No,
    Cleared,
}

/// Layered tile board indexed by (layer, row, column)
///
/// Every layer has the same number of rows and every row has `BOARD_COLUMNS`
/// cells. The board is mutated in place; owners are responsible for
/// announcing the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Vec<Cell>>>", into = "Vec<Vec<Vec<Cell>>>")]
pub struct Board {
    layers: Vec<Vec<Vec<Cell>>>,
}

impl Default for Board {
    /// A board with every layer present but no rows
    fn default() -> Self {
        Self {
            layers: vec![Vec::new(); BOARD_LAYERS],
        }
    }
}

impl TryFrom<Vec<Vec<Vec<Cell>>>> for Board {
    type Error = BoardError;

    fn try_from(layers: Vec<Vec<Vec<Cell>>>) -> Result<Self, Self::Error> {
        if layers.len() != BOARD_LAYERS {
            return Err(BoardError::LayerCount {
                expected: BOARD_LAYERS,
                found: layers.len(),
            });
        }

        let rows = layers[0].len();
        for (layer_index, layer) in layers.iter().enumerate() {
            if layer.len() != rows {
                return Err(BoardError::RaggedLayer {
                    layer: layer_index,
                    expected: rows,
                    found: layer.len(),
                });
            }
            for (row_index, row) in layer.iter().enumerate() {
                if row.len() != BOARD_COLUMNS {
                    return Err(BoardError::ColumnCount {
                        layer: layer_index,
                        row: row_index,
                        expected: BOARD_COLUMNS,
                        found: row.len(),
                    });
                }
            }
        }

        Ok(Self { layers })
    }
}

impl From<Board> for Vec<Vec<Vec<Cell>>> {
    fn from(board: Board) -> Self {
        board.layers
    }
}

impl Board {
    /// Builds a board from raw integer codes, validating shape and every code
    pub fn from_codes(codes: Vec<Vec<Vec<i32>>>) -> Result<Self, BoardError> {
        let layers = codes
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|code| Cell::from_code(code as i64))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Board::try_from(layers)
    }

    pub fn to_codes(&self) -> Vec<Vec<Vec<i32>>> {
        self.layers
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|row| row.iter().map(|cell| cell.code()).collect())
                    .collect()
            })
            .collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn row_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    pub fn column_count(&self) -> usize {
        BOARD_COLUMNS
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.layers
            .get(position.layer)?
            .get(position.row)?
            .get(position.column)
            .copied()
    }

    fn set(&mut self, position: Position, cell: Cell) {
        if let Some(slot) = self
            .layers
            .get_mut(position.layer)
            .and_then(|layer| layer.get_mut(position.row))
            .and_then(|row| row.get_mut(position.column))
        {
            *slot = cell;
        }
    }

    fn is_vacant_at(&self, position: Position) -> bool {
        self.cell(position).map_or(true, Cell::is_vacant)
    }

    /// Iterates every cell in layer, row, column order
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.layers.iter().enumerate().flat_map(|(l, layer)| {
            layer.iter().enumerate().flat_map(move |(r, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(c, cell)| (Position::new(l, r, c), *cell))
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.is_occupied()).count()
    }

    /// Whether the tile at `position` may be picked.
    ///
    /// A tile is free when nothing sits directly above it (or it is on the top
    /// layer) and at least one of its column-axis neighbours is vacant (or it is
    /// in the first or last column). Neighbours along the row axis are not
    /// considered.
    pub fn is_selectable(&self, position: Position) -> bool {
        if self.cell(position).is_none() {
            return false;
        }

        let top_layer = self.layers.len() - 1;
        let vertically_free = position.layer == top_layer
            || self.is_vacant_at(Position {
                layer: position.layer + 1,
                ..position
            });

        let last_column = BOARD_COLUMNS - 1;
        let horizontally_free = position.column == 0
            || position.column == last_column
            || self.is_vacant_at(Position {
                column: position.column - 1,
                ..position
            })
            || self.is_vacant_at(Position {
                column: position.column + 1,
                ..position
            });

        vertically_free && horizontally_free
    }

    /// Applies one click to the board and the pending selection.
    ///
    /// Clicking a highlighted tile removes the highlight; clicking a free tile
    /// highlights it. When the second tile is highlighted the pair is
    /// evaluated and the selection always ends up empty.
    pub fn toggle(&mut self, selection: &mut Selection, position: Position) -> ToggleOutcome {
        let Some(cell) = self.cell(position) else {
            return ToggleOutcome::Ignored;
        };

        if cell.is_vacant() || !self.is_selectable(position) {
            return ToggleOutcome::Ignored;
        }

        let selected = match cell {
            Cell::Selected(kind) => {
                self.set(position, Cell::Tile(kind));
                selection.remove(position);
                return ToggleOutcome::Deselected(position);
            }
            Cell::Tile(kind) => {
                self.set(position, Cell::Selected(kind));
                let tile = SelectedTile { position, kind };
                selection.push(tile);
                tile
            }
            Cell::Empty | Cell::Cleared => return ToggleOutcome::Ignored,
        };

        match selection.take_pair() {
            Some((first, second)) => self.resolve_pair(first, second),
            None => ToggleOutcome::Selected(selected),
        }
    }

    fn resolve_pair(&mut self, first: SelectedTile, second: SelectedTile) -> ToggleOutcome {
        if first.kind.matches(second.kind) {
            self.set(first.position, Cell::Cleared);
            self.set(second.position, Cell::Cleared);
            ToggleOutcome::Matched { first, second }
        } else {
            self.set(first.position, Cell::Tile(first.kind));
            self.set(second.position, Cell::Tile(second.kind));
            ToggleOutcome::Mismatched { first, second }
        }
    }

    /// Visits every cell once and reports whether a legal pair remains among free tiles
    pub fn scan_moves(&self) -> MovesLeft {
        let mut occupied = 0usize;
        let mut free_by_kind: HashMap<TileKind, usize> = HashMap::new();

        for (position, cell) in self.cells() {
            let Some(kind) = cell.kind() else {
                continue;
            };
            occupied += 1;

            if !self.is_selectable(position) {
                continue;
            }
            if kind.is_wildcard() {
                return MovesLeft::Yes;
            }
            *free_by_kind.entry(kind).or_insert(0) += 1;
        }

        if occupied == 0 {
            MovesLeft::Cleared
        } else if free_by_kind.values().any(|&count| count >= 2) {
            MovesLeft::Yes
        } else {
            MovesLeft::No
        }
    }
}

/// Points for a match made `elapsed` after the previous one.
///
/// Starts at `MATCH_BASE_POINTS`, loses one point per whole `SCORE_DECAY_UNIT`
/// and never drops below `MIN_MATCH_POINTS`.
pub fn match_points(elapsed: Duration) -> u32 {
    let decay = elapsed.as_millis() / SCORE_DECAY_UNIT.as_millis();
    let points = u128::from(MATCH_BASE_POINTS).saturating_sub(decay);
    u32::try_from(points)
        .unwrap_or(MIN_MATCH_POINTS)
        .max(MIN_MATCH_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: usize = 3;

    fn board_with(tiles: &[(usize, usize, usize, i32)]) -> Board {
        let mut codes = vec![vec![vec![0; BOARD_COLUMNS]; ROWS]; BOARD_LAYERS];
        for &(layer, row, column, code) in tiles {
            codes[layer][row][column] = code;
        }
        Board::from_codes(codes).unwrap()
    }

    fn pos(layer: usize, row: usize, column: usize) -> Position {
        Position::new(layer, row, column)
    }

    #[test]
    fn test_cell_codes() {
        assert_eq!(Cell::from_code(0).unwrap(), Cell::Empty);
        assert_eq!(Cell::from_code(-1).unwrap(), Cell::Cleared);
        assert_eq!(
            Cell::from_code(7).unwrap(),
            Cell::Tile(TileKind::new(7).unwrap())
        );
        assert_eq!(
            Cell::from_code(1101).unwrap(),
            Cell::Selected(TileKind::WILDCARD)
        );
        assert_eq!(Cell::from_code(1007).unwrap().code(), 1007);
    }

    #[test]
    fn test_invalid_cell_codes() {
        for code in [-2, 102, 1000, 1102, 5000, i64::MIN] {
            assert_eq!(Cell::from_code(code), Err(BoardError::InvalidCode(code)));
        }
    }

    #[test]
    fn test_tile_kind_matching() {
        let a = TileKind::new(3).unwrap();
        let b = TileKind::new(4).unwrap();
        assert!(a.matches(a));
        assert!(!a.matches(b));
        assert!(a.matches(TileKind::WILDCARD));
        assert!(TileKind::WILDCARD.matches(b));
        assert!(TileKind::WILDCARD.matches(TileKind::WILDCARD));
        assert!(TileKind::new(0).is_none());
        assert!(TileKind::new(102).is_none());
    }

    #[test]
    fn test_board_shape_validation() {
        let wrong_layers = vec![vec![vec![0; BOARD_COLUMNS]; ROWS]; 4];
        assert_eq!(
            Board::from_codes(wrong_layers),
            Err(BoardError::LayerCount {
                expected: 5,
                found: 4
            })
        );

        let mut ragged = vec![vec![vec![0; BOARD_COLUMNS]; ROWS]; BOARD_LAYERS];
        ragged[2].pop();
        assert!(matches!(
            Board::from_codes(ragged),
            Err(BoardError::RaggedLayer { layer: 2, .. })
        ));

        let mut short_row = vec![vec![vec![0; BOARD_COLUMNS]; ROWS]; BOARD_LAYERS];
        short_row[1][1].pop();
        assert!(matches!(
            Board::from_codes(short_row),
            Err(BoardError::ColumnCount {
                layer: 1,
                row: 1,
                found: 14,
                ..
            })
        ));
    }

    #[test]
    fn test_board_from_json() {
        let mut codes = vec![vec![vec![0; BOARD_COLUMNS]; 1]; BOARD_LAYERS];
        codes[0][0][0] = 12;
        codes[0][0][1] = -1;
        let json = serde_json::to_string(&codes).unwrap();

        let board: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board.row_count(), 1);
        assert_eq!(board.cell(pos(0, 0, 0)).map(Cell::code), Some(12));
        assert_eq!(board.cell(pos(0, 0, 1)), Some(Cell::Cleared));
        assert_eq!(serde_json::to_string(&board).unwrap(), json);
    }

    #[test]
    fn test_top_layer_with_open_side_is_selectable() {
        let board = board_with(&[(4, 1, 5, 9), (4, 1, 6, 9)]);
        assert!(board.is_selectable(pos(4, 1, 5)));
        assert!(board.is_selectable(pos(4, 1, 6)));
    }

    #[test]
    fn test_covered_and_boxed_tile_is_blocked() {
        let board = board_with(&[(0, 1, 5, 1), (0, 1, 4, 2), (0, 1, 6, 3), (1, 1, 5, 4)]);
        assert!(!board.is_selectable(pos(0, 1, 5)));
    }

    #[test]
    fn test_covered_tile_with_open_side_is_blocked() {
        let board = board_with(&[(0, 1, 5, 1), (1, 1, 5, 4)]);
        assert!(!board.is_selectable(pos(0, 1, 5)));
    }

    #[test]
    fn test_uncovered_tile_boxed_on_both_sides_is_blocked() {
        let board = board_with(&[(0, 1, 5, 1), (0, 1, 4, 2), (0, 1, 6, 3)]);
        assert!(!board.is_selectable(pos(0, 1, 5)));
        assert!(board.is_selectable(pos(0, 1, 4)));
    }

    #[test]
    fn test_cleared_neighbour_frees_tile() {
        let board = board_with(&[(0, 1, 5, 1), (0, 1, 4, -1), (0, 1, 6, 3), (1, 1, 5, -1)]);
        assert!(board.is_selectable(pos(0, 1, 5)));
    }

    #[test]
    fn test_edge_columns_are_horizontally_free() {
        let board = board_with(&[(0, 0, 0, 1), (0, 0, 1, 2), (0, 0, 13, 3), (0, 0, 14, 4)]);
        assert!(board.is_selectable(pos(0, 0, 0)));
        assert!(board.is_selectable(pos(0, 0, 14)));
    }

    #[test]
    fn test_row_neighbours_are_not_considered() {
        let board = board_with(&[(0, 1, 5, 1), (0, 0, 5, 2), (0, 2, 5, 3), (0, 1, 6, 4)]);
        assert!(board.is_selectable(pos(0, 1, 5)));
    }

    #[test]
    fn test_out_of_range_is_not_selectable() {
        let board = board_with(&[]);
        assert!(!board.is_selectable(pos(5, 0, 0)));
        assert!(!board.is_selectable(pos(0, ROWS, 0)));
        assert!(!board.is_selectable(pos(0, 0, BOARD_COLUMNS)));
    }

    #[test]
    fn test_toggle_twice_restores_code() {
        let mut board = board_with(&[(4, 0, 3, 17)]);
        let mut selection = Selection::new();
        let before = board.clone();

        let first = board.toggle(&mut selection, pos(4, 0, 3));
        assert!(matches!(first, ToggleOutcome::Selected(_)));
        assert_eq!(board.cell(pos(4, 0, 3)).map(Cell::code), Some(1017));
        assert_eq!(selection.len(), 1);

        let second = board.toggle(&mut selection, pos(4, 0, 3));
        assert_eq!(second, ToggleOutcome::Deselected(pos(4, 0, 3)));
        assert_eq!(board, before);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_ignores_vacant_and_blocked_cells() {
        let mut board = board_with(&[(0, 1, 5, 1), (0, 1, 4, 2), (0, 1, 6, 3), (0, 2, 0, -1)]);
        let mut selection = Selection::new();
        let before = board.clone();

        assert_eq!(
            board.toggle(&mut selection, pos(0, 1, 5)),
            ToggleOutcome::Ignored
        );
        assert_eq!(
            board.toggle(&mut selection, pos(0, 2, 0)),
            ToggleOutcome::Ignored
        );
        assert_eq!(
            board.toggle(&mut selection, pos(0, 0, 0)),
            ToggleOutcome::Ignored
        );
        assert_eq!(
            board.toggle(&mut selection, pos(9, 9, 99)),
            ToggleOutcome::Ignored
        );
        assert_eq!(board, before);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_matching_pair_is_cleared() {
        let mut board = board_with(&[(0, 0, 0, 8), (0, 2, 14, 8), (0, 1, 7, 9)]);
        let mut selection = Selection::new();

        board.toggle(&mut selection, pos(0, 0, 0));
        let outcome = board.toggle(&mut selection, pos(0, 2, 14));

        assert!(matches!(outcome, ToggleOutcome::Matched { .. }));
        assert_eq!(board.cell(pos(0, 0, 0)), Some(Cell::Cleared));
        assert_eq!(board.cell(pos(0, 2, 14)), Some(Cell::Cleared));
        assert!(selection.is_empty());
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_mismatched_pair_is_restored() {
        let mut board = board_with(&[(0, 0, 0, 8), (0, 2, 14, 9)]);
        let mut selection = Selection::new();
        let before = board.clone();

        board.toggle(&mut selection, pos(0, 0, 0));
        let outcome = board.toggle(&mut selection, pos(0, 2, 14));

        assert!(matches!(outcome, ToggleOutcome::Mismatched { .. }));
        assert_eq!(board, before);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_wildcard_matches_anything() {
        let mut board = board_with(&[(0, 0, 0, 101), (0, 2, 14, 42)]);
        let mut selection = Selection::new();

        board.toggle(&mut selection, pos(0, 2, 14));
        let outcome = board.toggle(&mut selection, pos(0, 0, 0));

        match outcome {
            ToggleOutcome::Matched { first, second } => {
                assert_eq!(first.kind.value(), 42);
                assert!(second.kind.is_wildcard());
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_cleared_board() {
        let board = board_with(&[(0, 0, 0, -1), (2, 1, 3, -1)]);
        assert_eq!(board.scan_moves(), MovesLeft::Cleared);
    }

    #[test]
    fn test_scan_free_pair_yields_yes() {
        let board = board_with(&[(0, 0, 0, 5), (0, 2, 14, 5)]);
        assert_eq!(board.scan_moves(), MovesLeft::Yes);
    }

    #[test]
    fn test_scan_distinct_free_tiles_is_dead_end() {
        let board = board_with(&[(0, 0, 0, 5), (0, 2, 14, 6), (3, 1, 7, 7)]);
        assert_eq!(board.scan_moves(), MovesLeft::No);
    }

    #[test]
    fn test_scan_ignores_blocked_pairs() {
        // The second 5 is covered from above and boxed in on both sides.
        let board = board_with(&[
            (0, 0, 0, 5),
            (0, 1, 5, 5),
            (0, 1, 4, 6),
            (0, 1, 6, 7),
            (1, 1, 5, 8),
        ]);
        assert_eq!(board.scan_moves(), MovesLeft::No);
    }

    #[test]
    fn test_scan_lone_free_wildcard_yields_yes() {
        let board = board_with(&[(4, 1, 7, 101)]);
        assert_eq!(board.scan_moves(), MovesLeft::Yes);
    }

    #[test]
    fn test_match_points_decay() {
        assert_eq!(match_points(Duration::from_millis(0)), 10);
        assert_eq!(match_points(Duration::from_millis(499)), 10);
        assert_eq!(match_points(Duration::from_millis(1200)), 8);
        assert_eq!(match_points(Duration::from_millis(4500)), 1);
        assert_eq!(match_points(Duration::from_millis(5000)), 1);
        assert_eq!(match_points(Duration::from_millis(6000)), 1);
        assert_eq!(match_points(Duration::from_secs(3600)), 1);
    }
}
