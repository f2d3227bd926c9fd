use crate::engine::search::MinimaxEngine;
use crate::engine::Move;
use crate::logic::board::{Board, FenError, Piece, Player};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{is_valid_move, legal_moves, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Player),
    /// Never entered: no draw rule is implemented.
    Draw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub player: Player,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
    pub board_before: Board,
    pub pending_before: Option<(u8, u8)>,
}

/// A game in progress: board, side to move, and an unfinished multi-jump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Player,
    pub status: GameStatus,
    /// Square of a piece that jumped and must keep jumping this turn.
    pub pending_jump: Option<(u8, u8)>,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Board::new(), Player::Red)
    }

    #[must_use]
    pub fn from_position(board: Board, turn: Player) -> Self {
        let mut game = Self {
            board,
            turn,
            status: GameStatus::Playing,
            pending_jump: None,
            last_move: None,
            history: Vec::new(),
        };
        game.update_status();
        game
    }

    /// # Errors
    ///
    /// Fails when the notation does not parse.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, turn) = Board::from_fen(fen)?;
        Ok(Self::from_position(board, turn))
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }
        legal_moves(&self.board, self.turn, self.pending_jump)
    }

    /// Plays the user's move for the side to move.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] once the game is decided, otherwise the reason
    /// [`is_valid_move`] rejected the move.
    pub fn make_move(&mut self, from: (i32, i32), to: (i32, i32)) -> Result<Move, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let mv = is_valid_move(&self.board, self.turn, self.pending_jump, from, to)?;
        self.play(mv);
        Ok(mv)
    }

    /// Applies a move already known to be legal for the side to move.
    fn play(&mut self, mv: Move) {
        let (from_row, from_col) = (i32::from(mv.from_row), i32::from(mv.from_col));
        let (to_row, to_col) = (i32::from(mv.to_row), i32::from(mv.to_col));
        let Some(piece) = self.board.piece_at(from_row, from_col) else {
            return;
        };

        let board_before = self.board.clone();
        let captured = self.board.apply_move(mv);
        let promoted = !piece.is_king()
            && self
                .board
                .piece_at(to_row, to_col)
                .is_some_and(Piece::is_king);

        self.history.push(MoveRecord {
            mv,
            player: self.turn,
            piece,
            captured,
            promoted,
            board_before,
            pending_before: self.pending_jump,
        });
        self.last_move = Some(mv);

        let generator = MoveGenerator::new();
        if mv.is_capture() && !generator.captures_for_square(&self.board, to_row, to_col).is_empty() {
            log::debug!("{:?} continues jumping from {:?}", self.turn, mv.to());
            self.pending_jump = Some(mv.to());
            return;
        }

        self.pending_jump = None;
        self.turn = self.turn.opposite();
        self.update_status();
    }

    fn update_status(&mut self) {
        let generator = MoveGenerator::new();
        if !generator.has_legal_moves(&self.board, self.turn) {
            // No pieces left or fully blocked: either way the side to move loses.
            self.status = GameStatus::Won(self.turn.opposite());
            log::debug!("{:?} cannot move, {:?} wins", self.turn, self.turn.opposite());
        }
    }

    /// Plays the whole turn for the side to move with `engine`. Every jump of
    /// a multi-jump is chosen by a fresh search over the jumping piece's
    /// continuations. Returns the moves played, empty when the game is over.
    pub fn play_ai_turn(&mut self, engine: &mut MinimaxEngine, depth: u8) -> Vec<Move> {
        let player = self.turn;
        let mut played = Vec::new();

        while self.status == GameStatus::Playing && self.turn == player {
            let candidates = self.legal_moves();
            let Some(best) = engine.best_among(&self.board, player, depth, &candidates) else {
                break;
            };
            self.play(best.mv);
            played.push(best.mv);
        }

        played
    }

    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };
        self.board = record.board_before;
        self.turn = record.player;
        self.pending_jump = record.pending_before;
        self.last_move = self.history.last().map(|prev| prev.mv);

        // Undoing the deciding move reopens the game.
        self.status = GameStatus::Playing;

        true
    }
}
