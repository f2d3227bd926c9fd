// Piece Values
pub const VAL_MAN: i32 = 100;
pub const VAL_KING: i32 = 160;

// Positional weights
pub const WEIGHT_CENTER: i32 = 1; // Per half-square closer to the center
pub const WEIGHT_ADVANCE: i32 = 5; // Per row advanced, men only

/// Score of a won position. Valid configs keep every material sum below it.
pub const WIN_SCORE: i32 = 100_000;

pub const PIECES_PER_SIDE: i32 = 12;
/// Largest value of [`center_closeness`] on a dark square.
pub const MAX_CENTER_CLOSENESS: i32 = 12;
/// Largest value of [`rows_advanced`] for a man; one more row crowns it.
pub const MAX_ROWS_ADVANCED: i32 = 6;

use crate::logic::board::{Player, BOARD_SIZE};

/// Closeness to the geometric center (3.5, 3.5), in half-squares of Manhattan
/// distance. 12 on the four central dark squares, 0 on the (0,7)/(7,0) corners.
#[must_use]
pub const fn center_closeness(row: i32, col: i32) -> i32 {
    let doubled_distance = (2 * row - (BOARD_SIZE - 1)).abs() + (2 * col - (BOARD_SIZE - 1)).abs();
    2 * (BOARD_SIZE - 1) - doubled_distance
}

/// Rows a man of `player` has advanced from its own back rank: 0 at home,
/// 6 on the row before promotion.
#[must_use]
pub const fn rows_advanced(player: Player, row: i32) -> i32 {
    (row - player.home_row()).abs()
}
