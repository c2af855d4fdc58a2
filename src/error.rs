//! Pipeline error types

use serde::Serialize;
use thiserror::Error;

use crate::oracle::OracleError;

/// A single broken safety rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
  WeightChange {
    change_pct: f64,
    max_pct: f64,
    suggested: f64,
    baseline: f64,
  },
  NoWeightBaseline,
  RepsOutOfRange { reps: u32, min: u32, max: u32 },
  MissingPlateauIntervention { strategy: Option<String> },
}

impl std::fmt::Display for Violation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::WeightChange {
        change_pct,
        max_pct,
        suggested,
        baseline,
      } => write!(
        f,
        "Weight change of {:.1}% exceeds {}% limit ({}lbs vs recent average {:.1}lbs)",
        change_pct, max_pct, suggested, baseline
      ),
      Self::NoWeightBaseline => {
        write!(f, "No positive recent weight to bound the suggested weight against")
      }
      Self::RepsOutOfRange { reps, min, max } => {
        write!(f, "Suggested reps {} outside safe range {}-{}", reps, min, max)
      }
      Self::MissingPlateauIntervention { strategy } => write!(
        f,
        "Plateau detected but intervention strategy {:?} is not deload, maintain or variation",
        strategy.as_deref().unwrap_or("")
      ),
    }
  }
}

#[derive(Error, Debug, Serialize)]
pub enum GuidanceError {
  #[error("Need at least {required} recent sets to generate recommendation (got {actual})")]
  InsufficientData { required: usize, actual: usize },

  #[error("Oracle unavailable: {0}")]
  OracleUnavailable(#[from] OracleError),

  #[error("Malformed oracle response: {0}")]
  MalformedResponse(String),

  #[error("Invalid {field}: {reason}")]
  InvalidField { field: &'static str, reason: String },

  #[error("Recommendation failed safety validation: {}", join_violations(.0))]
  ValidationFailed(Vec<Violation>),
}

impl GuidanceError {
  /// Whether asking the oracle again could plausibly succeed
  pub fn is_retryable(&self) -> bool {
    !matches!(self, Self::InsufficientData { .. })
  }
}

fn join_violations(violations: &[Violation]) -> String {
  violations
    .iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join("; ")
}
