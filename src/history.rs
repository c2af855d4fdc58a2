//! Workout log: append-only set history with trailing-window queries
//!
//! The log is an in-process store. Cloning a `WorkoutLog` yields another
//! handle onto the same sets, so it can be shared between tasks.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::WorkoutSet;

/// Default trailing window for history queries
pub const DEFAULT_WEEKS_BACK: u32 = 4;

#[derive(Debug, Clone, Default)]
pub struct WorkoutLog {
  sets: Arc<RwLock<Vec<WorkoutSet>>>,
}

impl WorkoutLog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a set performed `days_ago` days before now.
  ///
  /// Weight and reps are stored as given; nothing is validated here. Offsets
  /// beyond the representable date range saturate to the earliest (or, for
  /// negative offsets, latest) timestamp.
  pub async fn append(&self, exercise: &str, weight: f64, reps: u32, days_ago: i64) {
    let date = days_before(Utc::now(), days_ago).unwrap_or(if days_ago > 0 {
      DateTime::<Utc>::MIN_UTC
    } else {
      DateTime::<Utc>::MAX_UTC
    });
    self.append_at(exercise, weight, reps, date).await;
  }

  /// Record a set performed today
  pub async fn log_set(&self, exercise: &str, weight: f64, reps: u32) {
    self.append(exercise, weight, reps, 0).await;
  }

  /// Record a set at an explicit timestamp
  pub async fn append_at(&self, exercise: &str, weight: f64, reps: u32, date: DateTime<Utc>) {
    self.sets.write().await.push(WorkoutSet {
      exercise: exercise.to_string(),
      weight,
      reps,
      date,
    });
  }

  /// All sets for `exercise` within the trailing `weeks_back` weeks, oldest
  /// insertion first. A window reaching past the earliest representable date
  /// has no cutoff.
  pub async fn query(&self, exercise: &str, weeks_back: u32) -> Vec<WorkoutSet> {
    let cutoff = days_before(Utc::now(), i64::from(weeks_back) * 7);

    self
      .sets
      .read()
      .await
      .iter()
      .filter(|set| set.exercise == exercise && cutoff.is_none_or(|c| set.date >= c))
      .cloned()
      .collect()
  }

  /// History over the default four-week window
  pub async fn history(&self, exercise: &str) -> Vec<WorkoutSet> {
    self.query(exercise, DEFAULT_WEEKS_BACK).await
  }

  /// Most recently appended set for `exercise`, regardless of its date
  pub async fn latest(&self, exercise: &str) -> Option<WorkoutSet> {
    self
      .sets
      .read()
      .await
      .iter()
      .rev()
      .find(|set| set.exercise == exercise)
      .cloned()
  }
}

/// `now - days`, or `None` when the result is out of range
fn days_before(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
  Duration::try_days(days).and_then(|offset| now.checked_sub_signed(offset))
}
