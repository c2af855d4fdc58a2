//! Latest accepted recommendation per exercise

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::Recommendation;

/// Last-write-wins store keyed by exercise name.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct RecommendationCache {
  entries: Arc<RwLock<HashMap<String, Recommendation>>>,
}

impl RecommendationCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace any previous entry for `recommendation.exercise`
  pub async fn store(&self, recommendation: Recommendation) {
    self
      .entries
      .write()
      .await
      .insert(recommendation.exercise.clone(), recommendation);
  }

  pub async fn get(&self, exercise: &str) -> Option<Recommendation> {
    self.entries.read().await.get(exercise).cloned()
  }

  pub async fn len(&self) -> usize {
    self.entries.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.entries.read().await.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::make_recommendation;

  #[tokio::test]
  async fn test_get_missing_is_none() {
    let cache = RecommendationCache::new();
    assert!(cache.get("Squat").await.is_none());
    assert!(cache.is_empty().await);
  }

  #[tokio::test]
  async fn test_store_overwrites_same_exercise() {
    let cache = RecommendationCache::new();
    cache.store(make_recommendation("Squat", 235.0, 5, false, None)).await;
    cache.store(make_recommendation("Squat", 240.0, 5, false, None)).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("Squat").await.unwrap().suggested_weight, 240.0);
  }

  #[tokio::test]
  async fn test_exercises_are_independent() {
    let cache = RecommendationCache::new();
    cache.store(make_recommendation("Squat", 240.0, 5, false, None)).await;
    cache.store(make_recommendation("Bench Press", 165.0, 5, true, Some("deload"))).await;

    assert_eq!(cache.len().await, 2);
    assert_eq!(cache.get("Squat").await.unwrap().suggested_weight, 240.0);
    assert_eq!(cache.get("Bench Press").await.unwrap().suggested_weight, 165.0);
  }

  #[tokio::test]
  async fn test_get_is_idempotent() {
    let cache = RecommendationCache::new();
    cache.store(make_recommendation("Squat", 240.0, 5, false, None)).await;

    let first = cache.get("Squat").await;
    let second = cache.get("Squat").await;
    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn test_concurrent_writers_leave_one_entry() {
    let cache = RecommendationCache::new();
    let mut handles = Vec::new();
    for i in 0..8 {
      let cache = cache.clone();
      handles.push(tokio::spawn(async move {
        cache
          .store(make_recommendation("Squat", 230.0 + i as f64, 5, false, None))
          .await;
      }));
    }
    for handle in handles {
      handle.await.expect("writer task should finish");
    }

    assert_eq!(cache.len().await, 1);
    let weight = cache.get("Squat").await.unwrap().suggested_weight;
    assert!((230.0..238.0).contains(&weight));
  }
}
