//! Progression guidance pipeline
//!
//! history → prompt → oracle → parse → validate → cache
//!
//! The sequence is linear. Any failure aborts the call and leaves the cache
//! untouched; nothing is retried here.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::RecommendationCache;
use crate::config::{GuidanceConfig, DEFAULT_MIN_SETS};
use crate::error::GuidanceError;
use crate::history::WorkoutLog;
use crate::models::{Recommendation, WorkoutSet};
use crate::oracle::Oracle;
use crate::parser::parse_recommendation;
use crate::prompts::PromptStrategy;
use crate::validator::SafetyValidator;

pub struct ProgressionGuidance {
  oracle: Arc<dyn Oracle>,
  validator: SafetyValidator,
  cache: RecommendationCache,
  config: GuidanceConfig,
}

impl ProgressionGuidance {
  pub fn new(oracle: Arc<dyn Oracle>) -> Self {
    Self::with_config(oracle, GuidanceConfig::default())
  }

  pub fn with_config(oracle: Arc<dyn Oracle>, config: GuidanceConfig) -> Self {
    Self {
      oracle,
      validator: SafetyValidator::new(config.bounds),
      cache: RecommendationCache::new(),
      config,
    }
  }

  pub fn config(&self) -> &GuidanceConfig {
    &self.config
  }

  /// Shared handle onto the accepted recommendations
  pub fn cache(&self) -> RecommendationCache {
    self.cache.clone()
  }

  /// Ask the oracle for a recommendation and accept it only if it passes
  /// the safety checks against the same history
  pub async fn recommend(
    &self,
    exercise: &str,
    history: &[WorkoutSet],
    strategy: PromptStrategy,
  ) -> Result<Recommendation, GuidanceError> {
    self
      .recommend_with(exercise, history, strategy, self.oracle.as_ref())
      .await
  }

  /// Same pipeline against an explicitly supplied oracle
  pub async fn recommend_with(
    &self,
    exercise: &str,
    history: &[WorkoutSet],
    strategy: PromptStrategy,
    oracle: &dyn Oracle,
  ) -> Result<Recommendation, GuidanceError> {
    let required = self.config.min_sets.max(DEFAULT_MIN_SETS);
    if history.len() < required {
      return Err(GuidanceError::InsufficientData {
        required,
        actual: history.len(),
      });
    }

    let prompt = strategy.build_prompt(exercise, history);
    debug!(exercise, %strategy, sets = history.len(), prompt_len = prompt.len(), "Querying oracle");

    let response = oracle.query(&prompt).await.map_err(|e| {
      warn!(exercise, error = %e, "Oracle call failed");
      GuidanceError::from(e)
    })?;
    debug!(exercise, response = %response, "Raw oracle response");

    let recommendation = parse_recommendation(&response, exercise)?;

    if let Err(err) = self.validator.validate(&recommendation, history) {
      if let GuidanceError::ValidationFailed(violations) = &err {
        warn!(exercise, violations = violations.len(), "Recommendation rejected: {}", err);
      }
      return Err(err);
    }

    info!(
      exercise,
      weight = recommendation.suggested_weight,
      reps = recommendation.suggested_reps,
      plateau = recommendation.plateau_detected,
      "Recommendation accepted"
    );
    self.cache.store(recommendation.clone()).await;

    Ok(recommendation)
  }

  /// Pull the configured history window from `log`, then recommend
  pub async fn recommend_from_log(
    &self,
    log: &WorkoutLog,
    exercise: &str,
    strategy: PromptStrategy,
  ) -> Result<Recommendation, GuidanceError> {
    let history = log.query(exercise, self.config.history_weeks).await;
    self.recommend(exercise, &history, strategy).await
  }

  /// Recommend with the configured default strategy
  pub async fn recommend_default(
    &self,
    exercise: &str,
    history: &[WorkoutSet],
  ) -> Result<Recommendation, GuidanceError> {
    self.recommend(exercise, history, self.config.strategy).await
  }

  pub async fn get_cached(&self, exercise: &str) -> Option<Recommendation> {
    self.cache.get(exercise).await
  }
}
