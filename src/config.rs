//! Environment-driven configuration for the guidance pipeline

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::history::DEFAULT_WEEKS_BACK;
use crate::prompts::PromptStrategy;
use crate::validator::SafetyBounds;

/// Minimum history length before the oracle is consulted. Configuration may
/// raise it, never lower it.
pub const DEFAULT_MIN_SETS: usize = 3;

const STRATEGY_VAR: &str = "REPRIGHT_PROMPT_STRATEGY";
const HISTORY_WEEKS_VAR: &str = "REPRIGHT_HISTORY_WEEKS";
const MIN_SETS_VAR: &str = "REPRIGHT_MIN_SETS";
const MAX_WEIGHT_CHANGE_VAR: &str = "REPRIGHT_MAX_WEIGHT_CHANGE_PCT";
const MEAN_WINDOW_VAR: &str = "REPRIGHT_WEIGHT_MEAN_WINDOW";

#[derive(Error, Debug, Serialize)]
pub enum ConfigError {
  #[error("Invalid value for {var}: {reason}")]
  Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceConfig {
  pub strategy: PromptStrategy,
  pub history_weeks: u32,
  pub min_sets: usize,
  pub bounds: SafetyBounds,
}

impl Default for GuidanceConfig {
  fn default() -> Self {
    Self {
      strategy: PromptStrategy::default(),
      history_weeks: DEFAULT_WEEKS_BACK,
      min_sets: DEFAULT_MIN_SETS,
      bounds: SafetyBounds::default(),
    }
  }
}

/// Load variables from a `.env` file, if present. Existing variables win.
pub fn load_env() {
  dotenvy::dotenv().ok();
}

impl GuidanceConfig {
  /// Read overrides from `REPRIGHT_*` variables; unset variables keep
  /// their defaults
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let strategy = match env::var(STRATEGY_VAR) {
      Ok(raw) => raw
        .parse::<PromptStrategy>()
        .map_err(|reason| ConfigError::Invalid { var: STRATEGY_VAR, reason })?,
      Err(_) => defaults.strategy,
    };

    let history_weeks = parse_var(HISTORY_WEEKS_VAR)?.unwrap_or(defaults.history_weeks);
    let min_sets = parse_var(MIN_SETS_VAR)?.unwrap_or(defaults.min_sets);
    let max_weight_change_pct =
      parse_var(MAX_WEIGHT_CHANGE_VAR)?.unwrap_or(defaults.bounds.max_weight_change_pct);
    let weight_mean_window = parse_var(MEAN_WINDOW_VAR)?.unwrap_or(defaults.bounds.weight_mean_window);

    if history_weeks == 0 {
      return Err(ConfigError::Invalid {
        var: HISTORY_WEEKS_VAR,
        reason: "must be at least 1".to_string(),
      });
    }
    if !(max_weight_change_pct.is_finite() && max_weight_change_pct > 0.0) {
      return Err(ConfigError::Invalid {
        var: MAX_WEIGHT_CHANGE_VAR,
        reason: format!("must be a positive percentage, got {}", max_weight_change_pct),
      });
    }
    if weight_mean_window == 0 {
      return Err(ConfigError::Invalid {
        var: MEAN_WINDOW_VAR,
        reason: "must be at least 1".to_string(),
      });
    }
    if min_sets < DEFAULT_MIN_SETS {
      return Err(ConfigError::Invalid {
        var: MIN_SETS_VAR,
        reason: format!("must be at least {}, got {}", DEFAULT_MIN_SETS, min_sets),
      });
    }

    Ok(Self {
      strategy,
      history_weeks,
      min_sets,
      bounds: SafetyBounds {
        max_weight_change_pct,
        weight_mean_window,
        ..defaults.bounds
      },
    })
  }
}

fn parse_var<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| ConfigError::Invalid {
        var,
        reason: format!("{}: {}", raw, e),
      }),
    Err(_) => Ok(None),
  }
}
