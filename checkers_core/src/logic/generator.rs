use crate::engine::Move;
use crate::logic::board::{Board, Piece, Player, Rank};

const KING_DIRECTIONS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];
const RED_MAN_DIRECTIONS: [(i32, i32); 2] = [(1, -1), (1, 1)];
const BLACK_MAN_DIRECTIONS: [(i32, i32); 2] = [(-1, -1), (-1, 1)];

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn coord(row: i32, col: i32) -> (u8, u8) {
    (row as u8, col as u8)
}

/// Legal-move generation for checkers. Stateless; every query reads the board
/// it is given and never mutates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Diagonals a piece may step or jump along. Men only go forward.
    const fn directions(piece: Piece) -> &'static [(i32, i32)] {
        match (piece.rank, piece.player) {
            (Rank::King, _) => &KING_DIRECTIONS,
            (Rank::Man, Player::Red) => &RED_MAN_DIRECTIONS,
            (Rank::Man, Player::Black) => &BLACK_MAN_DIRECTIONS,
        }
    }

    /// Single jumps available to the piece on the square.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn captures_for_square(&self, board: &Board, row: i32, col: i32) -> Vec<Move> {
        let Some(piece) = board.piece_at(row, col) else {
            return Vec::new();
        };

        Self::directions(piece)
            .iter()
            .filter_map(|&(dr, dc)| {
                let (over_row, over_col) = (row + dr, col + dc);
                let (land_row, land_col) = (row + 2 * dr, col + 2 * dc);
                let victim = board.piece_at(over_row, over_col)?;
                if victim.player == piece.player
                    || !Board::in_bounds(land_row, land_col)
                    || board.piece_at(land_row, land_col).is_some()
                {
                    return None;
                }
                Some(Move::jump(
                    coord(row, col),
                    coord(over_row, over_col),
                    coord(land_row, land_col),
                ))
            })
            .collect()
    }

    /// Quiet one-square steps available to the piece on the square.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn steps_for_square(&self, board: &Board, row: i32, col: i32) -> Vec<Move> {
        let Some(piece) = board.piece_at(row, col) else {
            return Vec::new();
        };

        Self::directions(piece)
            .iter()
            .filter_map(|&(dr, dc)| {
                let (to_row, to_col) = (row + dr, col + dc);
                if !Board::in_bounds(to_row, to_col) || board.piece_at(to_row, to_col).is_some() {
                    return None;
                }
                Some(Move::step(coord(row, col), coord(to_row, to_col)))
            })
            .collect()
    }

    /// Moves for one piece: its jumps if it has any, otherwise its steps.
    /// This only applies the capture rule locally; use [`Self::all_moves_for`]
    /// for the player-wide forced capture.
    #[must_use]
    pub fn moves_for_square(&self, board: &Board, row: i32, col: i32) -> Vec<Move> {
        let captures = self.captures_for_square(board, row, col);
        if captures.is_empty() {
            self.steps_for_square(board, row, col)
        } else {
            captures
        }
    }

    #[must_use]
    pub fn has_any_capture(&self, board: &Board, player: Player) -> bool {
        board.pieces_of(player).iter().any(|&(_, row, col)| {
            !self
                .captures_for_square(board, i32::from(row), i32::from(col))
                .is_empty()
        })
    }

    /// Every legal move for `player`, in row-major order of the moving piece.
    ///
    /// Capture is forced across the whole side: when any piece can jump, only
    /// jumps are returned, even for pieces that could otherwise step. An empty
    /// result means the player cannot move.
    #[must_use]
    pub fn all_moves_for(&self, board: &Board, player: Player) -> Vec<Move> {
        let capture_available = self.has_any_capture(board, player);

        board
            .pieces_of(player)
            .iter()
            .flat_map(|&(_, row, col)| {
                let (row, col) = (i32::from(row), i32::from(col));
                if capture_available {
                    self.captures_for_square(board, row, col)
                } else {
                    self.steps_for_square(board, row, col)
                }
            })
            .collect()
    }

    /// Checks if the player has at least one legal move, returning as soon as
    /// one is found.
    #[must_use]
    pub fn has_legal_moves(&self, board: &Board, player: Player) -> bool {
        board.pieces_of(player).iter().any(|&(_, row, col)| {
            let (row, col) = (i32::from(row), i32::from(col));
            !self.captures_for_square(board, row, col).is_empty()
                || !self.steps_for_square(board, row, col).is_empty()
        })
    }

    /// Every maximal sequence of jumps the piece on the square can make this
    /// turn. Each jump is explored on its own board copy, so a man crowned
    /// mid-chain continues with king directions.
    #[must_use]
    pub fn capture_chains(&self, board: &Board, row: i32, col: i32) -> Vec<Vec<Move>> {
        let mut chains = Vec::new();
        self.extend_chains(board, row, col, &mut Vec::new(), &mut chains);
        chains
    }

    fn extend_chains(
        &self,
        board: &Board,
        row: i32,
        col: i32,
        prefix: &mut Vec<Move>,
        chains: &mut Vec<Vec<Move>>,
    ) {
        let jumps = self.captures_for_square(board, row, col);
        if jumps.is_empty() {
            if !prefix.is_empty() {
                chains.push(prefix.clone());
            }
            return;
        }

        for jump in jumps {
            let mut next = board.clone();
            next.apply_move(jump);
            prefix.push(jump);
            self.extend_chains(
                &next,
                i32::from(jump.to_row),
                i32::from(jump.to_col),
                prefix,
                chains,
            );
            prefix.pop();
        }
    }
}
