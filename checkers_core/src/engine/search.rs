use crate::engine::config::EngineConfig;
use crate::engine::eval::SimpleEvaluator;
use crate::engine::{Evaluator, Move, SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Player};
use crate::logic::eval_constants::WIN_SCORE;
use crate::logic::generator::MoveGenerator;
use std::sync::Arc;

/// Depth-limited minimax with alpha-beta pruning.
///
/// Every explored position is a private copy of its parent, so the engine
/// never mutates the board it is given. The only state kept between calls is
/// the configuration; the node counter is reset per search.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    generator: MoveGenerator,
    nodes_searched: u64,
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl MinimaxEngine {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = SimpleEvaluator::new(config.clone());
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn evaluator(&self) -> &SimpleEvaluator {
        &self.evaluator
    }

    /// Nodes visited by the most recent search.
    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    fn now() -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            0.0
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
                1000.0,
                f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
            );
            time_ms
        }
    }

    /// Best legal move for `player`, searching `depth` plies (a depth of 0 is
    /// searched as 1). Ties keep the first move in generation order. `None`
    /// when the player has no legal move.
    pub fn find_best_move(&mut self, board: &Board, player: Player, depth: u8) -> Option<SearchResult> {
        let moves = self.generator.all_moves_for(board, player);
        self.best_among(board, player, depth, &moves)
    }

    /// Root search restricted to `candidates`, which must be legal for
    /// `player` on `board`.
    pub fn best_among(
        &mut self,
        board: &Board,
        player: Player,
        depth: u8,
        candidates: &[Move],
    ) -> Option<SearchResult> {
        let depth = depth.max(1);
        let mut best: Option<SearchResult> = None;
        let mut alpha = i32::MIN;

        for mv in candidates {
            let mut next = board.clone();
            next.apply_move(*mv);
            let score = self.value(&next, depth - 1, alpha, i32::MAX, false, player);

            if best.is_none_or(|b| score > b.score) {
                best = Some(SearchResult { mv: *mv, score });
            }
            alpha = alpha.max(score);
        }

        best
    }

    /// Minimax value of `board` for `player`, with the side to move given by
    /// `maximizing`. Leaves are always evaluated from `player`'s side; a side
    /// left without moves has lost regardless of the remaining depth.
    pub fn value(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        player: Player,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board, player);
        }

        let side = if maximizing { player } else { player.opposite() };
        let moves = self.generator.all_moves_for(board, side);
        if moves.is_empty() {
            return if maximizing { -WIN_SCORE } else { WIN_SCORE };
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in &moves {
                let mut next = board.clone();
                next.apply_move(*mv);
                best = best.max(self.value(&next, depth - 1, alpha, beta, false, player));
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in &moves {
                let mut next = board.clone();
                next.apply_move(*mv);
                best = best.min(self.value(&next, depth - 1, alpha, beta, true, player));
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl Searcher for MinimaxEngine {
    fn search(
        &mut self,
        board: &Board,
        player: Player,
        depth: u8,
    ) -> Option<(SearchResult, SearchStats)> {
        self.nodes_searched = 0;
        let start_time = Self::now();

        let result = self.find_best_move(board, player, depth);

        let elapsed = Self::now() - start_time;
        let stats = SearchStats {
            depth: depth.max(1),
            nodes: self.nodes_searched,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            time_ms: elapsed as u64,
        };

        match &result {
            Some(found) => log::debug!(
                "{player:?} best move {:?} -> {:?} score {} ({} nodes, depth {}, {} ms)",
                found.mv.from(),
                found.mv.to(),
                found.score,
                stats.nodes,
                stats.depth,
                stats.time_ms
            ),
            None => log::debug!("{player:?} has no legal move"),
        }

        result.map(|found| (found, stats))
    }
}

/// One-off search with the default configuration.
#[must_use]
pub fn find_best_move(board: &Board, player: Player, depth: u8) -> Option<SearchResult> {
    MinimaxEngine::default().find_best_move(board, player, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Piece;

    fn board_with(pieces: &[(i32, i32, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.place(row, col, Some(piece));
        }
        board
    }

    #[test]
    fn test_takes_single_winning_capture() {
        let board = board_with(&[
            (2, 1, Piece::man(Player::Red)),
            (0, 5, Piece::man(Player::Red)),
            (3, 2, Piece::man(Player::Black)),
        ]);
        for depth in 1..=4 {
            let result = find_best_move(&board, Player::Red, depth).unwrap();
            assert_eq!(result.mv, Move::jump((2, 1), (3, 2), (4, 3)));
            assert_eq!(result.score, WIN_SCORE);
        }
    }

    #[test]
    fn test_no_moves_returns_none() {
        let board = board_with(&[(0, 1, Piece::man(Player::Red))]);
        assert!(find_best_move(&board, Player::Black, 3).is_none());

        let mut engine = MinimaxEngine::default();
        assert!(engine.search(&board, Player::Black, 3).is_none());
    }

    #[test]
    fn test_ties_keep_first_generated_move() {
        // Both captures win outright; the first piece in row-major order moves.
        let board = board_with(&[
            (2, 1, Piece::man(Player::Red)),
            (2, 3, Piece::man(Player::Red)),
            (3, 2, Piece::man(Player::Black)),
        ]);
        let result = find_best_move(&board, Player::Red, 3).unwrap();
        assert_eq!(result.mv, Move::jump((2, 1), (3, 2), (4, 3)));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = Board::new();
        let before = board.clone();
        let mut engine = MinimaxEngine::default();
        let (result, stats) = engine.search(&board, Player::Red, 4).unwrap();
        assert_eq!(board, before);
        assert!(stats.nodes > 7);
        assert_eq!(stats.depth, 4);
        assert_eq!(result.mv.from_row, 2);
    }

    #[test]
    fn test_depth_zero_searches_one_ply() {
        let board = Board::new();
        let mut engine = MinimaxEngine::default();
        assert_eq!(
            engine.find_best_move(&board, Player::Red, 0),
            engine.find_best_move(&board, Player::Red, 1)
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::new();
        let first = find_best_move(&board, Player::Black, 4);
        let second = find_best_move(&board, Player::Black, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stuck_side_scores_as_loss() {
        // Black's only man is boxed in and cannot jump out.
        let board = board_with(&[
            (2, 1, Piece::man(Player::Black)),
            (1, 0, Piece::man(Player::Red)),
            (1, 2, Piece::man(Player::Red)),
            (0, 3, Piece::man(Player::Red)),
        ]);
        let mut engine = MinimaxEngine::default();
        assert_eq!(
            engine.value(&board, 3, i32::MIN, i32::MAX, false, Player::Red),
            WIN_SCORE
        );
        assert_eq!(
            engine.value(&board, 3, i32::MIN, i32::MAX, true, Player::Black),
            -WIN_SCORE
        );
        // Depth exhausted first: the static evaluation is returned instead.
        assert_eq!(
            engine.value(&board, 0, i32::MIN, i32::MAX, true, Player::Black),
            engine.evaluator().evaluate(&board, Player::Black)
        );
    }
}
