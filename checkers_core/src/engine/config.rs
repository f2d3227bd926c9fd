use crate::logic::eval_constants::{
    MAX_CENTER_CLOSENESS, MAX_ROWS_ADVANCED, PIECES_PER_SIDE, VAL_KING, VAL_MAN, WEIGHT_ADVANCE,
    WEIGHT_CENTER, WIN_SCORE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} is out of range: {value}")]
    WeightOutOfRange { name: &'static str, value: i32 },
    #[error("king value {val_king} must exceed the best man value {best_man}")]
    KingNotAboveMan { val_king: i32, best_man: i32 },
    #[error("a full side can score {max_total}, reaching the win score")]
    ReachesWinScore { max_total: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_man: i32,
    pub val_king: i32,
    pub weight_center: i32,
    pub weight_advance: i32,

    // Search Parameters
    pub search_depth: u8,

    // Projection Parameters
    pub projection_depth: u8,
    pub projection_plies: u8,
    pub projection_top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_man: VAL_MAN,
            val_king: VAL_KING,
            weight_center: WEIGHT_CENTER,
            weight_advance: WEIGHT_ADVANCE,

            search_depth: 5,

            projection_depth: 2,
            projection_plies: 4,
            projection_top_k: 3,
        }
    }
}

/// Tuning file format: evaluation entries are scale factors applied to the
/// defaults, the rest are absolute values.
#[derive(Deserialize)]
struct EngineConfigJson {
    val_man: Option<f32>,
    val_king: Option<f32>,
    weight_center: Option<f32>,
    weight_advance: Option<f32>,

    search_depth: Option<u8>,

    projection_depth: Option<u8>,
    projection_plies: Option<u8>,
    projection_top_k: Option<usize>,
}

impl EngineConfig {
    /// Reads a tuning file and validates the result.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed input, otherwise the first
    /// violation reported by [`EngineConfig::validate`].
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        let config = Self {
            val_man: apply_scale(default.val_man, json_config.val_man),
            val_king: apply_scale(default.val_king, json_config.val_king),
            weight_center: apply_scale(default.weight_center, json_config.weight_center),
            weight_advance: apply_scale(default.weight_advance, json_config.weight_advance),

            search_depth: json_config.search_depth.unwrap_or(default.search_depth),

            projection_depth: json_config
                .projection_depth
                .unwrap_or(default.projection_depth),
            projection_plies: json_config
                .projection_plies
                .unwrap_or(default.projection_plies),
            projection_top_k: json_config
                .projection_top_k
                .unwrap_or(default.projection_top_k),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that evaluation weights keep the evaluator's guarantees: a king
    /// outscores a man on the same square, and no undecided position can
    /// score as much as a win.
    ///
    /// # Errors
    ///
    /// Returns the first weight relation that does not hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value, min) in [
            ("val_man", self.val_man, 1),
            ("weight_center", self.weight_center, 1),
            ("weight_advance", self.weight_advance, 0),
        ] {
            if value < min {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }

        let best_man = i64::from(self.val_man)
            + i64::from(self.weight_advance) * i64::from(MAX_ROWS_ADVANCED);
        if i64::from(self.val_king) <= best_man {
            return Err(ConfigError::KingNotAboveMan {
                val_king: self.val_king,
                best_man: i32::try_from(best_man).unwrap_or(i32::MAX),
            });
        }

        let max_total = self.max_side_total();
        if max_total >= i64::from(WIN_SCORE) {
            return Err(ConfigError::ReachesWinScore { max_total });
        }
        Ok(())
    }

    /// Upper bound of one side's material and positional total: a full side,
    /// every piece on a best square.
    fn max_side_total(&self) -> i64 {
        let center = i64::from(self.weight_center) * i64::from(MAX_CENTER_CLOSENESS);
        let man = i64::from(self.val_man)
            + center
            + i64::from(self.weight_advance) * i64::from(MAX_ROWS_ADVANCED);
        let king = i64::from(self.val_king) + center;
        i64::from(PIECES_PER_SIDE) * man.max(king)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
