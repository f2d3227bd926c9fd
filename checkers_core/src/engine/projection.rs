//! Display-only lookahead: "what happens if I play this?" previews.
//!
//! Each legal first move is played on a copy of the board and followed by a
//! short line where both sides answer with a shallow search. The final
//! position is scored for the asking player and described with an [`Outlook`].
//! Nothing here feeds back into actual play.

use crate::engine::config::EngineConfig;
use crate::engine::search::MinimaxEngine;
use crate::engine::{Evaluator, Move};
use crate::logic::board::{Board, Player};
use crate::logic::generator::MoveGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const DECISIVE_THRESHOLD: i32 = 400;
pub const EDGE_THRESHOLD: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    DecisiveAdvantage,
    SlightEdge,
    Uncertain,
    Danger,
    Losing,
}

impl Outlook {
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        if score >= DECISIVE_THRESHOLD {
            Self::DecisiveAdvantage
        } else if score >= EDGE_THRESHOLD {
            Self::SlightEdge
        } else if score > -EDGE_THRESHOLD {
            Self::Uncertain
        } else if score > -DECISIVE_THRESHOLD {
            Self::Danger
        } else {
            Self::Losing
        }
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::DecisiveAdvantage => "decisive advantage",
            Self::SlightEdge => "slight edge",
            Self::Uncertain => "uncertain",
            Self::Danger => "danger",
            Self::Losing => "losing",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub first_move: Move,
    /// Replies played after the first move, alternating sides.
    pub line: Vec<Move>,
    /// Evaluation of the final position for the asking player.
    pub score: i32,
    pub outlook: Outlook,
}

/// Ranks `player`'s legal moves by where a short self-play line leads.
pub struct Projector {
    config: Arc<EngineConfig>,
    engine: MinimaxEngine,
    generator: MoveGenerator,
}

impl Projector {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            engine: MinimaxEngine::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
        }
    }

    /// Top projections sorted by descending score; equal scores keep move
    /// generation order. Empty when `player` has no legal move.
    pub fn project(&mut self, board: &Board, player: Player) -> Vec<Projection> {
        let first_moves = self.generator.all_moves_for(board, player);
        let mut projections: Vec<Projection> = first_moves
            .into_iter()
            .map(|first_move| self.project_move(board, player, first_move))
            .collect();

        projections.sort_by(|a, b| b.score.cmp(&a.score));
        projections.truncate(self.config.projection_top_k);
        projections
    }

    /// Plays `first_move` on a copy of `board`, then lets the sides alternate
    /// shallow best replies for a bounded number of plies.
    pub fn project_move(&mut self, board: &Board, player: Player, first_move: Move) -> Projection {
        let mut future = board.clone();
        future.apply_move(first_move);

        let mut line = Vec::new();
        let mut side = player.opposite();
        for _ in 0..self.config.projection_plies {
            let Some(reply) =
                self.engine
                    .find_best_move(&future, side, self.config.projection_depth)
            else {
                break;
            };
            future.apply_move(reply.mv);
            line.push(reply.mv);
            side = side.opposite();
        }

        let score = self.engine.evaluator().evaluate(&future, player);
        let outlook = Outlook::from_score(score);
        log::trace!(
            "{player:?} projection {:?} -> {:?}: {} plies, score {score} ({outlook})",
            first_move.from(),
            first_move.to(),
            line.len()
        );

        Projection {
            first_move,
            line,
            score,
            outlook,
        }
    }
}

/// Projections with the default configuration.
#[must_use]
pub fn project_futures(board: &Board, player: Player) -> Vec<Projection> {
    Projector::new(Arc::new(EngineConfig::default())).project(board, player)
}
