use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fresh opaque identifier for recipes, sessions and collection entries.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    /// Step order is meaningful.
    pub instructions: Vec<String>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    /// "Easy", "Medium", "Hard" or whatever the backend chose to say.
    pub difficulty: String,
    pub cuisine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }
}

/// A recipe as stored in the favorites or scheduled collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    /// Per-entry identity. The same recipe scheduled on two dates yields two entries.
    pub entry_id: String,
    #[serde(flatten)]
    pub recipe: Recipe,
    pub saved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_scheduled: Option<NaiveDate>,
}

impl SavedRecipe {
    pub fn new(recipe: Recipe, date_scheduled: Option<NaiveDate>) -> Self {
        Self {
            entry_id: new_id(),
            recipe,
            saved_at: Utc::now(),
            date_scheduled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CuisineType {
    #[default]
    Any,
    Italian,
    Asian,
    Mexican,
    Mediterranean,
    American,
    Indian,
    French,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyFilter {
    #[default]
    Any,
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalorieGoal {
    #[default]
    Any,
    /// Under 400 kcal per serving.
    Light,
    /// 400 to 700 kcal per serving.
    Balanced,
    /// Over 700 kcal, high protein.
    BulkUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreativityLevel {
    #[default]
    Traditional,
    Innovative,
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

display_as_debug!(CuisineType, DifficultyFilter, CalorieGoal, CreativityLevel);

macro_rules! parse_by_name {
    ($($ty:ident => [$($variant:ident),*]),*) => {
        $(impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$($ty::$variant),*]
                    .into_iter()
                    .find(|v| v.to_string().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!(
                        "unknown {}: {} (expected one of: {})",
                        stringify!($ty),
                        wanted,
                        [$(stringify!($variant)),*].join(", ")
                    ))
            }
        })*
    };
}

parse_by_name!(
    CuisineType => [Any, Italian, Asian, Mexican, Mediterranean, American, Indian, French],
    DifficultyFilter => [Any, Easy, Medium, Hard],
    CalorieGoal => [Any, Light, Balanced, BulkUp],
    CreativityLevel => [Traditional, Innovative]
);

pub const MIN_RECIPE_COUNT: u8 = 1;
pub const MAX_RECIPE_COUNT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub cuisine: CuisineType,
    pub difficulty: DifficultyFilter,
    /// Minutes, 0 means no limit.
    pub max_prep_time: u32,
    pub calorie_goal: CalorieGoal,
    pub recipe_count: u8,
    pub creativity: CreativityLevel,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            cuisine: CuisineType::Any,
            difficulty: DifficultyFilter::Any,
            max_prep_time: 0,
            calorie_goal: CalorieGoal::Any,
            recipe_count: MAX_RECIPE_COUNT,
            creativity: CreativityLevel::Traditional,
        }
    }
}

/// One completed generate-cycle. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSession {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub ingredients: Vec<String>,
    pub filters: FilterState,
    pub recipes: Vec<Recipe>,
}

impl SearchSession {
    pub fn new(ingredients: &[String], filters: &FilterState, recipes: &[Recipe]) -> Self {
        Self {
            id: new_id(),
            timestamp: Utc::now(),
            ingredients: ingredients.to_vec(),
            filters: *filters,
            recipes: recipes.to_vec(),
        }
    }
}
