//! Recover a structured recommendation from free-form oracle text
//!
//! The oracle is asked for bare JSON but often wraps it in prose or a code
//! fence. The payload is taken as the span from the first `{` to the last
//! `}` in the text and decoded as one object. Required fields are then
//! type-checked; nothing is coerced into range.

use serde_json::{Map, Value};

use crate::error::GuidanceError;
use crate::models::Recommendation;

/// Extract the outermost brace span (first `{` through last `}`)
pub fn extract_json(text: &str) -> Result<&str, GuidanceError> {
  match (text.find('{'), text.rfind('}')) {
    (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
    _ => Err(GuidanceError::MalformedResponse(
      "Could not find a JSON object in oracle response".to_string(),
    )),
  }
}

/// Parse the oracle's response into a recommendation for `exercise`.
///
/// The exercise name always comes from the caller, never from the response.
pub fn parse_recommendation(response: &str, exercise: &str) -> Result<Recommendation, GuidanceError> {
  let json_str = extract_json(response)?;

  let parsed: Value = serde_json::from_str(json_str)
    .map_err(|e| GuidanceError::MalformedResponse(format!("{}: {}", e, json_str)))?;
  let fields = parsed
    .as_object()
    .ok_or_else(|| GuidanceError::MalformedResponse(format!("Payload is not an object: {}", json_str)))?;

  let suggested_weight = positive_number(fields, "suggestedWeight")?;
  let suggested_reps = rep_count(fields, "suggestedReps")?;
  let plateau_detected = fields
    .get("plateauDetected")
    .and_then(Value::as_bool)
    .ok_or_else(|| invalid("plateauDetected", "must be a boolean"))?;

  let reasoning = fields
    .get("reasoning")
    .and_then(Value::as_str)
    .unwrap_or_default()
    .to_string();
  let intervention_strategy = fields
    .get("interventionStrategy")
    .and_then(Value::as_str)
    .map(str::to_string);

  Ok(Recommendation {
    exercise: exercise.to_string(),
    suggested_weight,
    suggested_reps,
    plateau_detected,
    reasoning,
    intervention_strategy,
  })
}

fn invalid(field: &'static str, reason: &str) -> GuidanceError {
  GuidanceError::InvalidField {
    field,
    reason: reason.to_string(),
  }
}

fn positive_number(fields: &Map<String, Value>, field: &'static str) -> Result<f64, GuidanceError> {
  match fields.get(field).and_then(Value::as_f64) {
    Some(n) if n > 0.0 => Ok(n),
    _ => Err(invalid(field, "must be a number greater than 0")),
  }
}

/// Reps must be a positive whole number; `5.0` is accepted, `5.5` is not
fn rep_count(fields: &Map<String, Value>, field: &'static str) -> Result<u32, GuidanceError> {
  let n = positive_number(fields, field)?;
  if n.fract() != 0.0 {
    return Err(invalid(field, "must be a whole number of reps"));
  }
  if n > f64::from(u32::MAX) {
    return Err(invalid(field, "exceeds the largest supported rep count"));
  }
  Ok(n as u32)
}
