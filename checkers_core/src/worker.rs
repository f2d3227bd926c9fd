use crate::engine::config::EngineConfig;
use crate::engine::projection::{Projection, Projector};
use crate::engine::search::MinimaxEngine;
use crate::engine::{SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, Player};
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Input {
    /// Searches to the config's `search_depth`.
    ComputeMove(Board, Player, EngineConfig),
    Project(Board, Player, EngineConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Output {
    MoveFound(SearchResult, SearchStats),
    /// The side to move has no legal move, so the game is over.
    NoMove,
    Projections(Vec<Projection>),
    InvalidConfig(String),
}

/// Runs searches off the page's main thread. The engine itself stays
/// synchronous; this only forwards requests and responses.
#[derive(Default)]
pub struct GameWorker {
    engine: Option<MinimaxEngine>,
}

impl GameWorker {
    /// Answers one request. Split from [`Worker::received`] so it can run
    /// without a browser.
    pub fn handle(&mut self, msg: Input) -> Output {
        let config = match &msg {
            Input::ComputeMove(_, _, config) | Input::Project(_, _, config) => config,
        };
        if let Err(err) = config.validate() {
            log::warn!("rejected engine config: {err}");
            return Output::InvalidConfig(err.to_string());
        }

        match msg {
            Input::ComputeMove(board, player, config) => {
                let config = Arc::new(config);
                let engine = self
                    .engine
                    .get_or_insert_with(|| MinimaxEngine::new(config.clone()));
                engine.update_config(config);

                let depth = engine.config().search_depth;
                engine
                    .search(&board, player, depth)
                    .map_or(Output::NoMove, |(result, stats)| {
                        Output::MoveFound(result, stats)
                    })
            }
            Input::Project(board, player, config) => {
                let mut projector = Projector::new(Arc::new(config));
                Output::Projections(projector.project(&board, player))
            }
        }
    }
}

impl Worker for GameWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        let output = self.handle(msg);
        scope.respond(id, output);
    }
}
