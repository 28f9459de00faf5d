use std::collections::BTreeMap;

use crate::api_connection::endpoints::{JsonSchema, JsonSchemaDefinition, JsonSchemaProperty};
use crate::i18n::Language;
use crate::model::{CalorieGoal, CreativityLevel, CuisineType, DifficultyFilter, FilterState};

pub const TRADITIONAL_TEMPERATURE: f32 = 0.3;
pub const INNOVATIVE_TEMPERATURE: f32 = 0.95;

/// Everything the backend needs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
}

pub fn cuisine_clause(cuisine: CuisineType) -> Option<String> {
    match cuisine {
        CuisineType::Any => None,
        other => Some(format!("Cuisine style: {}.", other)),
    }
}

pub fn difficulty_clause(difficulty: DifficultyFilter) -> Option<String> {
    match difficulty {
        DifficultyFilter::Any => None,
        other => Some(format!("Difficulty: {}.", other)),
    }
}

pub fn time_clause(max_prep_time: u32) -> Option<String> {
    (max_prep_time > 0)
        .then(|| format!("Maximum total time (prep + cook): {} minutes.", max_prep_time))
}

pub fn calorie_clause(goal: CalorieGoal, recipe_count: u8) -> Option<String> {
    match goal {
        CalorieGoal::Light => Some(
            "Keep calories under 400kcal per serving. Focus on light, low-fat ingredients.".to_string(),
        ),
        CalorieGoal::Balanced => Some(
            "Keep calories between 400-700kcal per serving. Ensure a good balance of protein, carbs, and fats."
                .to_string(),
        ),
        CalorieGoal::BulkUp => Some(
            "Ensure high protein and calories (>700kcal). Good for muscle building.".to_string(),
        ),
        CalorieGoal::Any if recipe_count >= 3 => Some(
            "For variety, include at least one light recipe (<400kcal), one balanced recipe (400-700kcal) and one hearty, high-protein recipe (>700kcal)."
                .to_string(),
        ),
        CalorieGoal::Any => None,
    }
}

/// Prompt framing and sampling temperature for a creativity level.
pub fn creativity_clause(creativity: CreativityLevel) -> (String, f32) {
    match creativity {
        CreativityLevel::Traditional => (
            "Stick strictly to established, classic recipes and well-known flavor combinations.".to_string(),
            TRADITIONAL_TEMPERATURE,
        ),
        CreativityLevel::Innovative => (
            "Be inventive: propose novel or fusion combinations that go beyond classic recipes.".to_string(),
            INNOVATIVE_TEMPERATURE,
        ),
    }
}

pub fn count_clause(recipe_count: u8) -> String {
    format!("Generate exactly {} distinct recipe(s).", recipe_count)
}

/// Builds the generation prompt. Performs no validation; callers keep
/// `recipe_count` within range.
pub fn build_generation_request(
    ingredients: &[String],
    filters: &FilterState,
    language: Language,
) -> GenerationRequest {
    let (creativity_prompt, temperature) = creativity_clause(filters.creativity);

    let constraints: Vec<String> = [
        cuisine_clause(filters.cuisine),
        difficulty_clause(filters.difficulty),
        time_clause(filters.max_prep_time),
        calorie_clause(filters.calorie_goal, filters.recipe_count),
        Some(creativity_prompt),
        Some(count_clause(filters.recipe_count)),
        Some(language.response_instruction().to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let prompt = format!(
        "Create {count} unique and delicious recipe(s) using these ingredients: {ingredients}.
You may assume the user has basic pantry staples (salt, pepper, oil, water, flour, sugar).

Constraints:
{constraints}

The output must be a valid JSON object matching the schema.
Ensure the fields 'title', 'description', 'ingredients', 'instructions', 'difficulty', 'cuisine' are in the requested language.",
        count = filters.recipe_count,
        ingredients = ingredients.join(", "),
        constraints = constraints.join("\n"),
    );

    GenerationRequest { prompt, temperature }
}

fn string_property(description: &str) -> JsonSchemaProperty {
    JsonSchemaProperty {
        property_type: "string".to_string(),
        description: Some(description.to_string()),
        items: None,
    }
}

fn integer_property(description: &str) -> JsonSchemaProperty {
    JsonSchemaProperty {
        property_type: "integer".to_string(),
        description: Some(description.to_string()),
        items: None,
    }
}

fn string_list_property(description: &str) -> JsonSchemaProperty {
    JsonSchemaProperty {
        property_type: "array".to_string(),
        description: Some(description.to_string()),
        items: Some(Box::new(JsonSchema {
            schema_type: "string".to_string(),
            properties: None,
            required: None,
            additional_properties: None,
        })),
    }
}

pub const RECIPE_REQUIRED_FIELDS: [&str; 8] = [
    "title",
    "description",
    "ingredients",
    "instructions",
    "prepTimeMinutes",
    "cookTimeMinutes",
    "difficulty",
    "cuisine",
];

fn recipe_item_schema() -> JsonSchema {
    let mut properties = BTreeMap::new();
    properties.insert("title".to_string(), string_property("The name of the dish."));
    properties.insert(
        "description".to_string(),
        string_property("A short, appetizing description of the dish."),
    );
    properties.insert(
        "ingredients".to_string(),
        string_list_property("List of ingredients with quantities."),
    );
    properties.insert(
        "instructions".to_string(),
        string_list_property("Step-by-step cooking instructions."),
    );
    properties.insert("prepTimeMinutes".to_string(), integer_property("Preparation time in minutes."));
    properties.insert("cookTimeMinutes".to_string(), integer_property("Cooking time in minutes."));
    properties.insert(
        "difficulty".to_string(),
        string_property("Difficulty level (Easy, Medium, Hard)."),
    );
    properties.insert("cuisine".to_string(), string_property("The cuisine type of the dish."));
    properties.insert("calories".to_string(), integer_property("Estimated calories per serving."));

    JsonSchema {
        schema_type: "object".to_string(),
        properties: Some(properties),
        required: Some(RECIPE_REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect()),
        additional_properties: None,
    }
}

/// Response schema: an object wrapping a `recipes` array.
pub fn recipe_response_schema() -> JsonSchemaDefinition {
    let mut properties = BTreeMap::new();
    properties.insert(
        "recipes".to_string(),
        JsonSchemaProperty {
            property_type: "array".to_string(),
            description: None,
            items: Some(Box::new(recipe_item_schema())),
        },
    );

    JsonSchemaDefinition {
        name: "recipe_response_schema".to_string(),
        strict: Some(false),
        schema: JsonSchema {
            schema_type: "object".to_string(),
            properties: Some(properties),
            required: Some(vec!["recipes".to_string()]),
            additional_properties: None,
        },
    }
}
