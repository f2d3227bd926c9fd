use crate::engine::{Move, MoveKind};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use thiserror::Error;

pub const BOARD_SIZE: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row delta of a forward step for this player's men.
    #[must_use]
    pub const fn forward(self) -> i32 {
        match self {
            Self::Red => 1,
            Self::Black => -1,
        }
    }

    /// The opponent's back rank, where men are crowned.
    #[must_use]
    pub const fn promotion_row(self) -> i32 {
        match self {
            Self::Red => BOARD_SIZE - 1,
            Self::Black => 0,
        }
    }

    #[must_use]
    pub const fn home_row(self) -> i32 {
        match self {
            Self::Red => 0,
            Self::Black => BOARD_SIZE - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub player: Player,
    pub rank: Rank,
}

impl Piece {
    #[must_use]
    pub const fn man(player: Player) -> Self {
        Self {
            player,
            rank: Rank::Man,
        }
    }

    #[must_use]
    pub const fn king(player: Player) -> Self {
        Self {
            player,
            rank: Rank::King,
        }
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self.rank, Rank::King)
    }

    const fn to_fen_char(self) -> char {
        match (self.player, self.rank) {
            (Player::Red, Rank::Man) => 'r',
            (Player::Red, Rank::King) => 'R',
            (Player::Black, Rank::Man) => 'b',
            (Player::Black, Rank::King) => 'B',
        }
    }

    const fn from_fen_char(ch: char) -> Option<Self> {
        match ch {
            'r' => Some(Self::man(Player::Red)),
            'R' => Some(Self::king(Player::Red)),
            'b' => Some(Self::man(Player::Black)),
            'B' => Some(Self::king(Player::Black)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },
    #[error("unexpected character '{0}' in position")]
    InvalidChar(char),
    #[error("piece placed on light square ({row}, {col})")]
    LightSquare { row: usize, col: usize },
    #[error("missing or invalid side to move")]
    InvalidTurn,
}

/// 8x8 checkers board. Cells are stored row-major; row 0 is Red's back rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position: Red on rows 0-2, Black on rows 5-7.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_pieces(Player::Red, 0..3);
        board.setup_pieces(Player::Black, 5..8);
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { grid: [None; 64] }
    }

    fn setup_pieces(&mut self, player: Player, rows: std::ops::Range<i32>) {
        for row in rows {
            for col in 0..BOARD_SIZE {
                if Self::is_dark_square(row, col) {
                    self.place(row, col, Some(Piece::man(player)));
                }
            }
        }
    }

    #[must_use]
    pub const fn in_bounds(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE && col >= 0 && col < BOARD_SIZE
    }

    #[must_use]
    pub const fn is_dark_square(row: i32, col: i32) -> bool {
        (row + col) % 2 == 1
    }

    #[allow(clippy::cast_sign_loss)]
    const fn square_index(row: i32, col: i32) -> Option<usize> {
        if Self::in_bounds(row, col) {
            Some((row * BOARD_SIZE + col) as usize)
        } else {
            None
        }
    }

    /// Piece on the square, or `None` when the square is empty or off the board.
    #[must_use]
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        Self::square_index(row, col).and_then(|sq| self.grid.get(sq).copied().flatten())
    }

    /// Writes a cell. Off-board coordinates are ignored.
    pub fn place(&mut self, row: i32, col: i32, piece: Option<Piece>) {
        if let Some(cell) = Self::square_index(row, col).and_then(|sq| self.grid.get_mut(sq)) {
            *cell = piece;
        }
    }

    pub fn remove(&mut self, row: i32, col: i32) {
        self.place(row, col, None);
    }

    /// Relocates the piece on the source square and crowns a man that lands on
    /// its promotion row. Captured pieces are not touched here.
    pub fn move_piece(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) {
        let Some(mut piece) = self.piece_at(from_row, from_col) else {
            return;
        };
        if !Self::in_bounds(to_row, to_col) {
            return;
        }
        self.remove(from_row, from_col);
        if piece.rank == Rank::Man && to_row == piece.player.promotion_row() {
            piece.rank = Rank::King;
        }
        self.place(to_row, to_col, Some(piece));
    }

    /// Applies a move produced by the generator for this board, removing the
    /// jumped piece first. Returns the captured piece, if any.
    ///
    /// The move is trusted: a move generated for another board state leaves
    /// this board in an unspecified (but memory-safe) arrangement.
    pub fn apply_move(&mut self, mv: Move) -> Option<Piece> {
        let captured = match mv.kind {
            MoveKind::Jump { over_row, over_col } => {
                let (row, col) = (i32::from(over_row), i32::from(over_col));
                let captured = self.piece_at(row, col);
                self.remove(row, col);
                captured
            }
            MoveKind::Step => None,
        };
        self.move_piece(
            i32::from(mv.from_row),
            i32::from(mv.from_col),
            i32::from(mv.to_row),
            i32::from(mv.to_col),
        );
        captured
    }

    /// Pieces of `player` with their coordinates, in row-major order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pieces_of(&self, player: Player) -> Vec<(Piece, u8, u8)> {
        self.grid
            .iter()
            .enumerate()
            .filter_map(|(sq, cell)| {
                cell.filter(|p| p.player == player)
                    .map(|p| (p, (sq / 8) as u8, (sq % 8) as u8))
            })
            .collect()
    }

    #[must_use]
    pub fn piece_count(&self, player: Player) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|p| p.player == player)
            .count()
    }

    #[must_use]
    pub fn to_fen_string(&self, turn: Player) -> String {
        let mut fen = String::new();
        for row in (0..BOARD_SIZE).rev() {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(row, col) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match turn {
            Player::Red => 'r',
            Player::Black => 'b',
        });
        fen
    }

    /// Parses the notation written by [`Board::to_fen_string`]: ranks from row 7
    /// down to row 0, digits for empty runs, then the side to move.
    ///
    /// # Errors
    ///
    /// [`FenError`] names the first malformed rank, character or turn marker.
    pub fn from_fen(fen: &str) -> Result<(Self, Player), FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().unwrap_or_default();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        for (i, rank) in ranks.iter().enumerate() {
            let row = 7 - i;
            let mut col = 0usize;
            for ch in rank.chars() {
                if let Some(run) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    col += run as usize;
                    continue;
                }
                let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidChar(ch))?;
                if col >= 8 {
                    return Err(FenError::RankWidth { rank: row });
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let (r, c) = (row as i32, col as i32);
                if !Self::is_dark_square(r, c) {
                    return Err(FenError::LightSquare { row, col });
                }
                board.place(r, c, Some(piece));
                col += 1;
            }
            if col != 8 {
                return Err(FenError::RankWidth { rank: row });
            }
        }

        let turn = match parts.next() {
            Some("r") => Player::Red,
            Some("b") => Player::Black,
            _ => return Err(FenError::InvalidTurn),
        };
        Ok((board, turn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "b1b1b1b1/1b1b1b1b/b1b1b1b1/8/8/1r1r1r1r/r1r1r1r1/1r1r1r1r r";

    #[test]
    fn test_initial_setup() {
        let board = Board::new();
        assert_eq!(board.piece_count(Player::Red), 12);
        assert_eq!(board.piece_count(Player::Black), 12);

        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = board.piece_at(row, col) {
                    assert!(Board::is_dark_square(row, col), "piece on light ({row}, {col})");
                    assert_eq!(piece.rank, Rank::Man);
                    let expected = if row < 3 { Player::Red } else { Player::Black };
                    assert_eq!(piece.player, expected);
                }
            }
        }
        for col in 0..8 {
            assert!(board.piece_at(3, col).is_none());
            assert!(board.piece_at(4, col).is_none());
        }
    }

    #[test]
    fn test_out_of_range_reads_are_empty() {
        let board = Board::new();
        for (row, col) in [(-1, 0), (0, -1), (8, 1), (1, 8), (-5, -5), (100, 3), (i32::MIN, i32::MAX)] {
            assert!(board.piece_at(row, col).is_none());
        }
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut board = Board::empty();
        board.place(8, 1, Some(Piece::man(Player::Red)));
        board.place(-1, 2, Some(Piece::king(Player::Black)));
        board.remove(9, 9);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_pieces_of_is_row_major() {
        let board = Board::new();
        let red = board.pieces_of(Player::Red);
        assert_eq!(red.len(), 12);
        assert_eq!((red[0].1, red[0].2), (0, 1));
        assert_eq!((red[11].1, red[11].2), (2, 7));
        assert!(red
            .windows(2)
            .all(|w| (w[0].1, w[0].2) < (w[1].1, w[1].2)));
    }

    #[test]
    fn test_move_piece_promotes_man() {
        let mut board = Board::empty();
        board.place(6, 1, Some(Piece::man(Player::Red)));
        board.move_piece(6, 1, 7, 2);
        assert!(board.piece_at(6, 1).is_none());
        assert_eq!(board.piece_at(7, 2), Some(Piece::king(Player::Red)));

        board.place(1, 2, Some(Piece::man(Player::Black)));
        board.move_piece(1, 2, 0, 1);
        assert_eq!(board.piece_at(0, 1), Some(Piece::king(Player::Black)));
    }

    #[test]
    fn test_move_piece_leaves_kings_and_other_rows_alone() {
        let mut board = Board::empty();
        board.place(2, 1, Some(Piece::man(Player::Red)));
        board.move_piece(2, 1, 3, 2);
        assert_eq!(board.piece_at(3, 2), Some(Piece::man(Player::Red)));

        board.place(6, 5, Some(Piece::king(Player::Black)));
        board.move_piece(6, 5, 7, 6);
        assert_eq!(board.piece_at(7, 6), Some(Piece::king(Player::Black)));

        // Reaching its own back rank never crowns a man.
        board.place(1, 0, Some(Piece::man(Player::Red)));
        board.move_piece(1, 0, 0, 1);
        assert_eq!(board.piece_at(0, 1), Some(Piece::man(Player::Red)));
    }

    #[test]
    fn test_move_from_empty_square_is_noop() {
        let mut board = Board::new();
        let before = board.clone();
        board.move_piece(3, 2, 4, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_jump_removes_captured_piece() {
        let mut board = Board::empty();
        board.place(2, 1, Some(Piece::man(Player::Red)));
        board.place(3, 2, Some(Piece::man(Player::Black)));
        let captured = board.apply_move(Move::jump((2, 1), (3, 2), (4, 3)));
        assert_eq!(captured, Some(Piece::man(Player::Black)));
        assert!(board.piece_at(3, 2).is_none());
        assert!(board.piece_at(2, 1).is_none());
        assert_eq!(board.piece_at(4, 3), Some(Piece::man(Player::Red)));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Board::new();
        let mut copy = original.clone();
        copy.remove(0, 1);
        copy.move_piece(2, 1, 3, 2);
        assert!(original.piece_at(0, 1).is_some());
        assert!(original.piece_at(2, 1).is_some());
        assert!(original.piece_at(3, 2).is_none());
        assert_ne!(original, copy);
    }

    #[test]
    fn test_fen_generation() {
        assert_eq!(Board::new().to_fen_string(Player::Red), START_FEN);
    }

    #[test]
    fn test_fen_parse() {
        let (board, turn) = Board::from_fen(START_FEN).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(turn, Player::Red);

        let (board, turn) = Board::from_fen("8/8/8/3B4/8/8/8/1R6 b").unwrap();
        assert_eq!(turn, Player::Black);
        assert_eq!(board.piece_at(4, 3), Some(Piece::king(Player::Black)));
        assert_eq!(board.piece_at(0, 1), Some(Piece::king(Player::Red)));
        assert_eq!(board.piece_count(Player::Red), 1);
    }

    #[test]
    fn test_fen_errors() {
        assert_eq!(Board::from_fen("8/8/8 r"), Err(FenError::RankCount(3)));
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/7 r"),
            Err(FenError::RankWidth { rank: 0 })
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/1x6 r"),
            Err(FenError::InvalidChar('x'))
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/r7 r"),
            Err(FenError::LightSquare { row: 0, col: 0 })
        );
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8"), Err(FenError::InvalidTurn));
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8 w"), Err(FenError::InvalidTurn));
    }
}
