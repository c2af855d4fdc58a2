//! Prompt strategies for the progression oracle
//!
//! Each strategy is a templated document with its own analysis heuristics.
//! All of them end with the same response schema block, so the parser never
//! needs to know which strategy produced a response.

use serde::{Deserialize, Serialize};

use crate::models::WorkoutSet;

const ORIGINAL_TEMPLATE: &str = include_str!("prompts/original.txt");
const STRICT_PLATEAU_TEMPLATE: &str = include_str!("prompts/strict_plateau.txt");
const SAFETY_FOCUSED_TEMPLATE: &str = include_str!("prompts/safety_focused.txt");
const CONTEXT_AWARE_TEMPLATE: &str = include_str!("prompts/context_aware.txt");
const RESPONSE_SCHEMA: &str = include_str!("prompts/response_schema.txt");

/// Fields every strategy asks the oracle to return
pub const RESPONSE_FIELDS: [&str; 5] = [
  "suggestedWeight",
  "suggestedReps",
  "plateauDetected",
  "reasoning",
  "interventionStrategy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptStrategy {
  /// General coaching heuristics
  #[default]
  Original,
  /// Plateau only across 3+ distinct sessions at the same top weight
  StrictPlateau,
  /// Conservative bounds spelled out for the oracle
  SafetyFocused,
  /// Progression rate sized by exercise category
  ContextAware,
}

impl PromptStrategy {
  pub const ALL: [PromptStrategy; 4] = [
    Self::Original,
    Self::StrictPlateau,
    Self::SafetyFocused,
    Self::ContextAware,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      Self::Original => "original",
      Self::StrictPlateau => "strictPlateau",
      Self::SafetyFocused => "safetyFocused",
      Self::ContextAware => "contextAware",
    }
  }

  fn template(&self) -> &'static str {
    match self {
      Self::Original => ORIGINAL_TEMPLATE,
      Self::StrictPlateau => STRICT_PLATEAU_TEMPLATE,
      Self::SafetyFocused => SAFETY_FOCUSED_TEMPLATE,
      Self::ContextAware => CONTEXT_AWARE_TEMPLATE,
    }
  }

  /// Build the oracle query for `exercise` from its history window
  pub fn build_prompt(&self, exercise: &str, sets: &[WorkoutSet]) -> String {
    let history = format_history(sets);

    // History first: an exercise name containing "{history}" stays literal
    let body = self
      .template()
      .replace("{history}", &history)
      .replace("{exercise}", exercise);

    format!("{}\n{}", body, RESPONSE_SCHEMA)
  }
}

impl std::fmt::Display for PromptStrategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl std::str::FromStr for PromptStrategy {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("Unknown prompt strategy: {}", s))
  }
}

fn format_history(sets: &[WorkoutSet]) -> String {
  if sets.is_empty() {
    return "(no sets recorded)".to_string();
  }
  sets
    .iter()
    .map(WorkoutSet::summary_line)
    .collect::<Vec<_>>()
    .join("\n")
}
