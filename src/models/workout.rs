use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed set, as recorded by the workout log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
  pub exercise: String,
  pub weight: f64,
  pub reps: u32,
  pub date: DateTime<Utc>,
}

impl WorkoutSet {
  /// Render as a single history line: `2025-09-22: 185lbs × 5 reps`
  pub fn summary_line(&self) -> String {
    format!(
      "{}: {}lbs × {} reps",
      self.date.format("%Y-%m-%d"),
      self.weight,
      self.reps
    )
  }
}
