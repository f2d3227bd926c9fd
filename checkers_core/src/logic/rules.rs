use crate::engine::Move;
use crate::logic::board::{Board, Player};
use crate::logic::generator::MoveGenerator;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("square is off the board")]
    OutOfBounds,
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("piece belongs to the other player")]
    NotYourPiece,
    #[error("the jumping piece must continue its capture")]
    MustContinueJump,
    #[error("a capture is available and must be taken")]
    CaptureRequired,
    #[error("move is not legal")]
    IllegalMove,
}

/// Moves `turn` may legally make now. While a multi-jump is in progress only
/// the jumping piece's continuation captures are allowed.
#[must_use]
pub fn legal_moves(board: &Board, turn: Player, pending_jump: Option<(u8, u8)>) -> Vec<Move> {
    let generator = MoveGenerator::new();
    match pending_jump {
        Some((row, col)) => generator.captures_for_square(board, i32::from(row), i32::from(col)),
        None => generator.all_moves_for(board, turn),
    }
}

/// Resolves a user's from/to pair into the generated move it names, or the
/// reason it cannot be played.
///
/// # Errors
///
/// Returns the first [`MoveError`] that applies, checked in declaration order
/// from `OutOfBounds` on.
pub fn is_valid_move(
    board: &Board,
    turn: Player,
    pending_jump: Option<(u8, u8)>,
    from: (i32, i32),
    to: (i32, i32),
) -> Result<Move, MoveError> {
    if !Board::in_bounds(from.0, from.1) || !Board::in_bounds(to.0, to.1) {
        return Err(MoveError::OutOfBounds);
    }

    let piece = board
        .piece_at(from.0, from.1)
        .ok_or(MoveError::NoPieceAtSource)?;
    if piece.player != turn {
        return Err(MoveError::NotYourPiece);
    }

    if let Some((row, col)) = pending_jump {
        if (i32::from(row), i32::from(col)) != from {
            return Err(MoveError::MustContinueJump);
        }
    }

    let legal = legal_moves(board, turn, pending_jump);
    let same_squares = |m: &&Move| {
        (i32::from(m.from_row), i32::from(m.from_col)) == from
            && (i32::from(m.to_row), i32::from(m.to_col)) == to
    };
    if let Some(mv) = legal.iter().find(same_squares) {
        return Ok(*mv);
    }

    // A step the piece could make if captures were not forced.
    let generator = MoveGenerator::new();
    let would_step = generator
        .steps_for_square(board, from.0, from.1)
        .iter()
        .any(|m| (i32::from(m.to_row), i32::from(m.to_col)) == to);
    if would_step && legal.iter().any(|m| m.is_capture()) {
        return Err(MoveError::CaptureRequired);
    }

    Err(MoveError::IllegalMove)
}
