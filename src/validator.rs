//! Safety Validator
//!
//! Checks a parsed recommendation against the history window it was built
//! from. Every rule is evaluated and every violation reported; values are
//! never adjusted to fit.
//!
//! Rules:
//! - Suggested weight within `max_weight_change_pct` of the mean of the last
//!   `weight_mean_window` sets
//! - Suggested reps within `[min_reps, max_reps]`
//! - A detected plateau comes with a deload, maintain or variation strategy
//!
//! Bounds apply uniformly to every exercise.

use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Violation};
use crate::models::{Recommendation, WorkoutSet};

// ---------------------------------------------------------------------------
/// Safety Bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyBounds {
    /// Max relative change from the recent mean weight, in percent
    pub max_weight_change_pct: f64,
    /// Number of trailing sets averaged for the weight baseline
    pub weight_mean_window: usize,
    pub min_reps: u32,
    pub max_reps: u32,
}

impl Default for SafetyBounds {
    fn default() -> Self {
        Self {
            max_weight_change_pct: 20.0,
            weight_mean_window: 6,
            min_reps: 1,
            max_reps: 20,
        }
    }
}

// ---------------------------------------------------------------------------
/// Validator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SafetyValidator {
    bounds: SafetyBounds,
}

impl SafetyValidator {
    pub fn new(bounds: SafetyBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &SafetyBounds {
        &self.bounds
    }

    /// Accept the recommendation or fail with every violated rule
    pub fn validate(
        &self,
        recommendation: &Recommendation,
        history: &[WorkoutSet],
    ) -> Result<(), GuidanceError> {
        let violations = self.violations(recommendation, history);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(GuidanceError::ValidationFailed(violations))
        }
    }

    /// Collect all violations without failing
    pub fn violations(&self, recommendation: &Recommendation, history: &[WorkoutSet]) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(v) = self.check_weight_change(recommendation, history) {
            violations.push(v);
        }
        if let Some(v) = self.check_rep_range(recommendation) {
            violations.push(v);
        }
        if let Some(v) = check_plateau_intervention(recommendation) {
            violations.push(v);
        }

        violations
    }

    fn check_weight_change(&self, recommendation: &Recommendation, history: &[WorkoutSet]) -> Option<Violation> {
        let baseline = match recent_mean_weight(history, self.bounds.weight_mean_window) {
            Some(mean) if mean > 0.0 => mean,
            _ => return Some(Violation::NoWeightBaseline),
        };

        let change_pct = (recommendation.suggested_weight - baseline).abs() / baseline * 100.0;
        if change_pct > self.bounds.max_weight_change_pct {
            Some(Violation::WeightChange {
                change_pct,
                max_pct: self.bounds.max_weight_change_pct,
                suggested: recommendation.suggested_weight,
                baseline,
            })
        } else {
            None
        }
    }

    fn check_rep_range(&self, recommendation: &Recommendation) -> Option<Violation> {
        let reps = recommendation.suggested_reps;
        if (self.bounds.min_reps..=self.bounds.max_reps).contains(&reps) {
            None
        } else {
            Some(Violation::RepsOutOfRange {
                reps,
                min: self.bounds.min_reps,
                max: self.bounds.max_reps,
            })
        }
    }
}

fn check_plateau_intervention(recommendation: &Recommendation) -> Option<Violation> {
    if recommendation.plateau_detected && !recommendation.has_plateau_intervention() {
        Some(Violation::MissingPlateauIntervention {
            strategy: recommendation.intervention_strategy.clone(),
        })
    } else {
        None
    }
}

/// Mean weight of the last `window` sets (all of them if fewer)
pub fn recent_mean_weight(history: &[WorkoutSet], window: usize) -> Option<f64> {
    let recent = &history[history.len().saturating_sub(window)..];
    if recent.is_empty() {
        return None;
    }
    Some(recent.iter().map(|s| s.weight).sum::<f64>() / recent.len() as f64)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
