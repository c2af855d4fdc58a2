//! Strength-training progression guidance
//!
//! Recent sets go to a language-model oracle; its free-form reply is parsed
//! into a [`Recommendation`] and checked against safety bounds before it is
//! accepted and cached.

pub mod cache;
pub mod config;
pub mod error;
pub mod guidance;
pub mod history;
pub mod models;
pub mod oracle;
pub mod parser;
pub mod prompts;
pub mod validator;

#[cfg(test)]
mod test_utils;

pub use cache::RecommendationCache;
pub use config::{load_env, ConfigError, GuidanceConfig};
pub use error::{GuidanceError, Violation};
pub use guidance::ProgressionGuidance;
pub use history::WorkoutLog;
pub use models::{Recommendation, WorkoutSet};
pub use oracle::{ClaudeOracle, Oracle, OracleError};
pub use prompts::PromptStrategy;
pub use validator::{SafetyBounds, SafetyValidator};
