//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Set history factories for the standard scenarios
//! - A scripted oracle that records prompts
//! - Helper assertions

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::models::{Recommendation, WorkoutSet};
use crate::oracle::{Oracle, OracleError};

/// ---------------------------------------------------------------------------
/// History Factories
/// ---------------------------------------------------------------------------

/// Build a history from `(weight, reps, days_ago)` triples, in the given order
pub fn sets_at(exercise: &str, sets: &[(f64, u32, i64)]) -> Vec<WorkoutSet> {
  sets
    .iter()
    .map(|&(weight, reps, days_ago)| WorkoutSet {
      exercise: exercise.to_string(),
      weight,
      reps,
      date: Utc::now() - Duration::days(days_ago),
    })
    .collect()
}

/// Bench press stuck at 185lbs: 185x5, 185x5, 185x4 on four dates over 22 days
pub fn plateau_history() -> Vec<WorkoutSet> {
  let sessions = [22, 15, 8, 0];
  let sets: Vec<(f64, u32, i64)> = sessions
    .iter()
    .flat_map(|&days_ago| [(185.0, 5, days_ago), (185.0, 5, days_ago), (185.0, 4, days_ago)])
    .collect();
  sets_at("Bench Press", &sets)
}

/// Squat climbing 225 → 230 → 235 at 5 reps, three sets per session
pub fn progressing_history() -> Vec<WorkoutSet> {
  let sets: Vec<(f64, u32, i64)> = [(225.0, 14), (230.0, 7), (235.0, 0)]
    .iter()
    .flat_map(|&(weight, days_ago)| [(weight, 5, days_ago); 3])
    .collect();
  sets_at("Squat", &sets)
}

pub fn make_recommendation(
  exercise: &str,
  weight: f64,
  reps: u32,
  plateau: bool,
  strategy: Option<&str>,
) -> Recommendation {
  Recommendation {
    exercise: exercise.to_string(),
    suggested_weight: weight,
    suggested_reps: reps,
    plateau_detected: plateau,
    reasoning: "test reasoning".to_string(),
    intervention_strategy: strategy.map(str::to_string),
  }
}

/// ---------------------------------------------------------------------------
/// Scripted Oracle
/// ---------------------------------------------------------------------------

/// Oracle that replays canned replies and records every prompt it receives
pub struct ScriptedOracle {
  script: Mutex<VecDeque<Result<String, OracleError>>>,
  fallback: Option<Result<String, OracleError>>,
  prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
  /// Answer every query with `response`
  pub fn replying(response: &str) -> Arc<Self> {
    Self::build(VecDeque::new(), Some(Ok(response.to_string())))
  }

  /// Fail every query with `error`
  pub fn failing(error: OracleError) -> Arc<Self> {
    Self::build(VecDeque::new(), Some(Err(error)))
  }

  /// Answer queries in order; fails once the script runs out
  pub fn sequence(replies: Vec<Result<String, OracleError>>) -> Arc<Self> {
    Self::build(replies.into(), None)
  }

  fn build(
    script: VecDeque<Result<String, OracleError>>,
    fallback: Option<Result<String, OracleError>>,
  ) -> Arc<Self> {
    Arc::new(Self {
      script: Mutex::new(script),
      fallback,
      prompts: Mutex::new(Vec::new()),
    })
  }

  pub fn calls(&self) -> usize {
    self.prompts.lock().unwrap().len()
  }

  pub fn prompts(&self) -> Vec<String> {
    self.prompts.lock().unwrap().clone()
  }
}

#[async_trait]
impl Oracle for ScriptedOracle {
  async fn query(&self, prompt: &str) -> Result<String, OracleError> {
    self.prompts.lock().unwrap().push(prompt.to_string());

    let next = self.script.lock().unwrap().pop_front();
    match next {
      Some(reply) => reply,
      None => self
        .fallback
        .clone()
        .unwrap_or_else(|| Err(OracleError::Request("script exhausted".to_string()))),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_plateau_history_shape() {
    let history = plateau_history();
    assert_eq!(history.len(), 12);
    assert!(history.iter().all(|s| s.weight == 185.0));

    let dates: HashSet<String> = history
      .iter()
      .map(|s| s.date.format("%Y-%m-%d").to_string())
      .collect();
    assert_eq!(dates.len(), 4);

    let span = history[history.len() - 1].date - history[0].date;
    assert_eq!(span.num_days(), 22);
  }

  #[test]
  fn test_progressing_history_shape() {
    let history = progressing_history();
    assert_eq!(history.len(), 9);
    assert_eq!(history[0].weight, 225.0);
    assert_eq!(history[8].weight, 235.0);
    assert!(history.iter().all(|s| s.reps == 5));
  }

  #[tokio::test]
  async fn test_scripted_oracle_sequence_then_exhausted() {
    let oracle = ScriptedOracle::sequence(vec![Ok("one".to_string())]);
    assert_eq!(oracle.query("a").await.unwrap(), "one");
    assert!(oracle.query("b").await.is_err());
    assert_eq!(oracle.prompts(), vec!["a".to_string(), "b".to_string()]);
  }
}
