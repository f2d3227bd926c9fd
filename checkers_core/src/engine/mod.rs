use crate::logic::board::{Board, Player};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod projection;
pub mod search;


/// What a move does besides relocating the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Step,
    /// Captures the piece standing on the jumped square.
    Jump { over_row: u8, over_col: u8 },
}

/// A candidate transition for one piece. Not applied until
/// [`Board::apply_move`] is called with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub kind: MoveKind,
}

impl Move {
    #[must_use]
    pub const fn step(from: (u8, u8), to: (u8, u8)) -> Self {
        Self {
            from_row: from.0,
            from_col: from.1,
            to_row: to.0,
            to_col: to.1,
            kind: MoveKind::Step,
        }
    }

    #[must_use]
    pub const fn jump(from: (u8, u8), over: (u8, u8), to: (u8, u8)) -> Self {
        Self {
            from_row: from.0,
            from_col: from.1,
            to_row: to.0,
            to_col: to.1,
            kind: MoveKind::Jump {
                over_row: over.0,
                over_col: over.1,
            },
        }
    }

    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(self.kind, MoveKind::Jump { .. })
    }

    #[must_use]
    pub const fn from(self) -> (u8, u8) {
        (self.from_row, self.from_col)
    }

    #[must_use]
    pub const fn to(self) -> (u8, u8) {
        (self.to_row, self.to_col)
    }
}

/// Best move found by a search and the score it was given, seen from the
/// searching player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub mv: Move,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        board: &Board,
        player: Player,
        depth: u8,
    ) -> Option<(SearchResult, SearchStats)>;
}
