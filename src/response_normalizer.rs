use chrono::Utc;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{new_id, Recipe};

/// A recipe as the backend sends it. Everything is optional so one sloppy
/// field does not cost the whole batch.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawRecipe {
    title: String,
    description: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    #[serde(deserialize_with = "lenient_minutes")]
    prep_time_minutes: u32,
    #[serde(deserialize_with = "lenient_minutes")]
    cook_time_minutes: u32,
    difficulty: String,
    cuisine: String,
    #[serde(deserialize_with = "lenient_count")]
    calories: Option<u32>,
}

/// Reads an integer, a float (rounded) or a numeric string. Negative,
/// non-finite and non-numeric values yield `None`.
fn lenient_u32(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(number.round().min(u32::MAX as f64) as u32)
}

fn lenient_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_u32(&value).unwrap_or(0))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_u32(&value))
}

impl RawRecipe {
    fn into_recipe(self) -> Recipe {
        Recipe {
            id: new_id(),
            title: self.title,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
            calories: self.calories,
            generated_at: Some(Utc::now()),
        }
    }
}

/// Strips a surrounding ```json ... ``` or ``` ... ``` fence, if any.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.ends_with("```") {
        return trimmed;
    }
    let inner = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    inner.trim_end_matches("```").trim()
}

/// Turns raw backend output into recipes with fresh ids.
///
/// Accepts `{"recipes": [...]}` or a bare array. Anything absent, unparsable
/// or empty yields an empty vector.
pub fn normalize_recipes(payload: Option<&str>) -> Vec<Recipe> {
    let Some(payload) = payload else {
        debug!("backend returned no payload");
        return Vec::new();
    };

    let content = strip_code_fences(payload);
    if content.is_empty() {
        debug!("backend payload is empty");
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "backend payload is not valid JSON");
            debug!(content, "unparsable payload");
            return Vec::new();
        }
    };

    let items = match parsed {
        Value::Object(mut obj) => match obj.remove("recipes") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("backend payload has no recipes array");
                return Vec::new();
            }
        },
        Value::Array(items) => items,
        _ => {
            warn!("backend payload is neither an object nor an array");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawRecipe>(item) {
            Ok(raw) => Some(raw.into_recipe()),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed recipe item");
                None
            }
        })
        .collect()
}
