use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Piece, Player, Rank};
use crate::logic::eval_constants::{center_closeness, rows_advanced, WIN_SCORE};
use std::sync::Arc;

/// Material plus center control plus advancement of men.
#[derive(Debug, Clone)]
pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
}

impl Default for SimpleEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl SimpleEvaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn piece_value(&self, piece: Piece, row: i32, col: i32) -> i32 {
        let base = match piece.rank {
            Rank::Man => self.config.val_man,
            Rank::King => self.config.val_king,
        };
        let center = self
            .config
            .weight_center
            .saturating_mul(center_closeness(row, col));
        let advance = match piece.rank {
            Rank::Man => self
                .config
                .weight_advance
                .saturating_mul(rows_advanced(piece.player, row)),
            Rank::King => 0,
        };
        base.saturating_add(center).saturating_add(advance)
    }

    fn side_total(&self, board: &Board, player: Player) -> i32 {
        board
            .pieces_of(player)
            .iter()
            .map(|&(piece, row, col)| self.piece_value(piece, i32::from(row), i32::from(col)))
            .fold(0, i32::saturating_add)
    }
}

impl Evaluator for SimpleEvaluator {
    /// Positive favors `player`. A side with no pieces left scores as a
    /// decided game before any positional terms are looked at.
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let opponent = player.opposite();
        if board.piece_count(opponent) == 0 {
            return WIN_SCORE;
        }
        if board.piece_count(player) == 0 {
            return -WIN_SCORE;
        }

        // Only an empty side scores as a win, whatever the weights.
        self.side_total(board, player)
            .saturating_sub(self.side_total(board, opponent))
            .clamp(-(WIN_SCORE - 1), WIN_SCORE - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(i32, i32, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.place(row, col, Some(piece));
        }
        board
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let evaluator = SimpleEvaluator::default();
        let board = Board::new();
        assert_eq!(evaluator.evaluate(&board, Player::Red), 0);
        assert_eq!(evaluator.evaluate(&board, Player::Black), 0);
    }

    #[test]
    fn test_win_scores() {
        let evaluator = SimpleEvaluator::default();
        let board = board_with(&[(0, 1, Piece::man(Player::Red))]);
        assert_eq!(evaluator.evaluate(&board, Player::Red), WIN_SCORE);
        assert_eq!(evaluator.evaluate(&board, Player::Black), -WIN_SCORE);
    }

    #[test]
    fn test_king_worth_more_than_man() {
        let evaluator = SimpleEvaluator::default();
        let opponent = (7, 0, Piece::man(Player::Black));
        let with_man = board_with(&[(0, 1, Piece::man(Player::Red)), opponent]);
        let with_king = board_with(&[(0, 1, Piece::king(Player::Red)), opponent]);
        assert!(
            evaluator.evaluate(&with_king, Player::Red) > evaluator.evaluate(&with_man, Player::Red)
        );

        // Holds for an advanced man as well.
        let with_man = board_with(&[(6, 3, Piece::man(Player::Red)), opponent]);
        let with_king = board_with(&[(6, 3, Piece::king(Player::Red)), opponent]);
        assert!(
            evaluator.evaluate(&with_king, Player::Red) > evaluator.evaluate(&with_man, Player::Red)
        );
    }

    #[test]
    fn test_center_beats_edge() {
        let evaluator = SimpleEvaluator::default();
        let opponent = (7, 0, Piece::king(Player::Black));
        let center = board_with(&[(3, 4, Piece::king(Player::Red)), opponent]);
        let edge = board_with(&[(3, 0, Piece::king(Player::Red)), opponent]);
        assert!(evaluator.evaluate(&center, Player::Red) > evaluator.evaluate(&edge, Player::Red));
    }

    #[test]
    fn test_advanced_man_is_worth_more() {
        let evaluator = SimpleEvaluator::default();
        let opponent = (7, 0, Piece::king(Player::Black));
        // Same distance from center, different rows advanced.
        let home = board_with(&[(1, 4, Piece::man(Player::Red)), opponent]);
        let advanced = board_with(&[(6, 3, Piece::man(Player::Red)), opponent]);
        assert!(
            evaluator.evaluate(&advanced, Player::Red) > evaluator.evaluate(&home, Player::Red)
        );
    }

    #[test]
    fn test_perspective_is_antisymmetric() {
        let evaluator = SimpleEvaluator::default();
        let board = board_with(&[
            (2, 3, Piece::king(Player::Red)),
            (4, 5, Piece::man(Player::Red)),
            (6, 1, Piece::man(Player::Black)),
        ]);
        assert_eq!(
            evaluator.evaluate(&board, Player::Red),
            -evaluator.evaluate(&board, Player::Black)
        );
    }

    #[test]
    fn test_heavy_weights_stay_below_win_score() {
        let config = EngineConfig {
            val_man: 2_000_000,
            val_king: 3_000_000,
            ..EngineConfig::default()
        };
        let evaluator = SimpleEvaluator::new(Arc::new(config));
        let board = board_with(&[
            (2, 1, Piece::man(Player::Red)),
            (2, 3, Piece::man(Player::Red)),
            (5, 0, Piece::man(Player::Black)),
        ]);
        assert_eq!(evaluator.evaluate(&board, Player::Red), WIN_SCORE - 1);
        assert_eq!(evaluator.evaluate(&board, Player::Black), -(WIN_SCORE - 1));
    }

    #[test]
    fn test_saturated_weights_do_not_overflow() {
        let config = EngineConfig {
            val_man: i32::MAX,
            val_king: i32::MAX,
            weight_center: i32::MAX,
            weight_advance: i32::MAX,
            ..EngineConfig::default()
        };
        let evaluator = SimpleEvaluator::new(Arc::new(config));
        assert_eq!(evaluator.evaluate(&Board::new(), Player::Red), 0);

        let board = board_with(&[
            (2, 1, Piece::king(Player::Red)),
            (5, 0, Piece::man(Player::Black)),
        ]);
        let score = evaluator.evaluate(&board, Player::Red);
        assert!(score.abs() < WIN_SCORE);
    }
}
