use serde::{Deserialize, Serialize};

/// Intervention tokens that count as a response to a detected plateau
pub const PLATEAU_INTERVENTIONS: [&str; 3] = ["deload", "maintain", "variation"];

/// Next-session recommendation for one exercise
///
/// Field names serialize in camelCase so the struct matches the JSON the
/// oracle is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
  pub exercise: String,
  pub suggested_weight: f64,
  pub suggested_reps: u32,
  pub plateau_detected: bool,
  #[serde(default)]
  pub reasoning: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub intervention_strategy: Option<String>,
}

impl Recommendation {
  /// Whether the intervention strategy names a plateau response
  /// (case-insensitive substring match on deload/maintain/variation)
  pub fn has_plateau_intervention(&self) -> bool {
    self
      .intervention_strategy
      .as_deref()
      .map(|s| {
        let lower = s.to_lowercase();
        PLATEAU_INTERVENTIONS.iter().any(|token| lower.contains(token))
      })
      .unwrap_or(false)
  }
}
