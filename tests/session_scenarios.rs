use pantry_chef::backend::ScriptedBackend;
use pantry_chef::i18n::Language;
use pantry_chef::model::{CreativityLevel, FilterState, SavedRecipe, SearchSession};
use pantry_chef::session::SessionOrchestrator;
use pantry_chef::store::{
    CollectionStore, FileStorage, MemoryStorage, StorageBackend, FAVORITES_KEY, HISTORY_KEY, HISTORY_LIMIT,
    SCHEDULED_KEY,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use tempfile::TempDir;

const EGG_RICE_RESPONSE: &str = r#"{
    "recipes": [
        {
            "title": "Egg Fried Rice",
            "description": "Wok-tossed leftover rice.",
            "ingredients": ["2 eggs", "2 cups cooked rice", "1 spring onion"],
            "instructions": ["Beat the eggs.", "Fry the rice.", "Fold in the eggs."],
            "prepTimeMinutes": 5,
            "cookTimeMinutes": 10,
            "difficulty": "Easy",
            "cuisine": "Asian",
            "calories": 480
        },
        {
            "title": "Rice Omelette",
            "description": "Soft omelette over seasoned rice.",
            "ingredients": ["3 eggs", "1 cup rice"],
            "instructions": ["Season the rice.", "Cook a thin omelette.", "Wrap."],
            "prepTimeMinutes": 10,
            "cookTimeMinutes": 10,
            "difficulty": "Medium",
            "cuisine": "Japanese"
        }
    ]
}"#;

fn egg_rice() -> Vec<String> {
    vec!["egg".to_string(), "rice".to_string()]
}

fn two_recipe_filters() -> FilterState {
    FilterState {
        recipe_count: 2,
        ..FilterState::default()
    }
}

fn orchestrator(backend: ScriptedBackend, storage: MemoryStorage) -> SessionOrchestrator<ScriptedBackend> {
    SessionOrchestrator::new(backend, CollectionStore::open(storage))
}

#[tokio::test]
async fn generate_records_one_session_with_fresh_ids() {
    let mut orch = orchestrator(ScriptedBackend::new().respond_with(EGG_RICE_RESPONSE), MemoryStorage::new());
    let filters = two_recipe_filters();

    let recipes = orch.generate(&egg_rice(), &filters, Language::English).await;

    assert_eq!(recipes.len(), 2);
    assert_ne!(recipes[0].id, recipes[1].id);
    assert!(recipes.iter().all(|r| r.generated_at.is_some()));
    assert_eq!(orch.backend().call_count(), 1);

    let history = orch.store().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].recipes, recipes);
    assert_eq!(history[0].filters, filters);
    assert_eq!(history[0].ingredients, egg_rice());

    let prompt = &orch.backend().requests()[0].prompt;
    assert!(prompt.contains("egg, rice"));
    assert!(!prompt.contains("kcal"));
}

#[tokio::test]
async fn backend_failure_returns_nothing_and_keeps_history() {
    let mut orch = orchestrator(
        ScriptedBackend::new().respond_with(EGG_RICE_RESPONSE).fail_with("connection reset"),
        MemoryStorage::new(),
    );
    orch.generate(&egg_rice(), &two_recipe_filters(), Language::English).await;
    let before = orch.store().history().to_vec();

    let recipes = orch.generate(&egg_rice(), &two_recipe_filters(), Language::English).await;

    assert!(recipes.is_empty());
    assert_eq!(orch.store().history(), before.as_slice());
}

#[tokio::test]
async fn unparsable_or_empty_responses_are_not_recorded() {
    let mut orch = orchestrator(
        ScriptedBackend::new()
            .respond_with("Sorry, I can't help with that.")
            .respond_with(r#"{"recipes": []}"#),
        MemoryStorage::new(),
    );
    assert!(orch.generate(&egg_rice(), &FilterState::default(), Language::English).await.is_empty());
    assert!(orch.generate(&egg_rice(), &FilterState::default(), Language::English).await.is_empty());
    assert!(orch.store().history().is_empty());
    assert_eq!(orch.backend().call_count(), 2);
}

#[tokio::test]
async fn history_keeps_twenty_most_recent_sessions() {
    let mut backend = ScriptedBackend::new();
    for _ in 0..25 {
        backend = backend.respond_with(EGG_RICE_RESPONSE);
    }
    let mut orch = orchestrator(backend, MemoryStorage::new());

    let mut first_recipe_ids = Vec::new();
    for i in 0..25 {
        let ingredients = vec![format!("ingredient-{}", i)];
        let recipes = orch.generate(&ingredients, &two_recipe_filters(), Language::English).await;
        first_recipe_ids.push(recipes[0].id.clone());
    }

    let history = orch.store().history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    for (position, session) in history.iter().enumerate() {
        let generation = 24 - position;
        assert_eq!(session.ingredients, vec![format!("ingredient-{}", generation)]);
        assert_eq!(session.recipes[0].id, first_recipe_ids[generation]);
    }
}

#[tokio::test]
async fn later_filter_edits_do_not_touch_history() {
    let mut orch = orchestrator(ScriptedBackend::new().respond_with(EGG_RICE_RESPONSE), MemoryStorage::new());
    orch.working_mut().add_ingredient("egg");
    orch.working_mut().filters = two_recipe_filters();
    orch.generate_current().await;

    orch.working_mut().filters.creativity = CreativityLevel::Innovative;
    orch.working_mut().add_ingredient("leek");

    let session = &orch.store().history()[0];
    assert_eq!(session.filters.creativity, CreativityLevel::Traditional);
    assert_eq!(session.ingredients, vec!["egg"]);
}

#[tokio::test]
async fn scheduling_the_same_recipe_on_two_dates() {
    let mut orch = orchestrator(ScriptedBackend::new().respond_with(EGG_RICE_RESPONSE), MemoryStorage::new());
    let recipes = orch.generate(&egg_rice(), &two_recipe_filters(), Language::English).await;
    let r = &recipes[0];

    let first = orch.schedule_recipe(r, Some("2024-03-10")).unwrap().0.entry_id.clone();
    let second = orch.schedule_recipe(r, Some("2024-03-11")).unwrap().0.entry_id.clone();

    let scheduled = orch.store().scheduled();
    assert_eq!(scheduled.len(), 2);
    assert!(scheduled.iter().all(|s| s.recipe.id == r.id));

    let a = orch.store().scheduled_entry(&first).unwrap();
    let b = orch.store().scheduled_entry(&second).unwrap();
    assert_eq!(a.date_scheduled, NaiveDate::from_ymd_opt(2024, 3, 10));
    assert_eq!(b.date_scheduled, NaiveDate::from_ymd_opt(2024, 3, 11));

    assert!(orch.remove_scheduled(&first));
    assert!(orch.store().scheduled_entry(&first).is_none());
    assert!(orch.store().scheduled_entry(&second).is_some());
}

#[tokio::test]
async fn collections_round_trip_through_storage() {
    let storage = MemoryStorage::new();
    let mut orch = orchestrator(
        ScriptedBackend::new().respond_with(EGG_RICE_RESPONSE).respond_with(EGG_RICE_RESPONSE),
        storage.clone(),
    );
    let recipes = orch.generate(&egg_rice(), &two_recipe_filters(), Language::English).await;
    orch.generate(&["tofu".to_string()], &FilterState::default(), Language::Cantonese).await;
    orch.toggle_favorite(&recipes[1]);
    orch.toggle_favorite(&recipes[0]);
    orch.schedule_recipe(&recipes[0], Some("2024-03-10")).unwrap();
    orch.schedule_recipe(&recipes[0], Some("2024-03-10")).unwrap();

    let history: Vec<SearchSession> = serde_json::from_str(&storage.raw(HISTORY_KEY).unwrap()).unwrap();
    let favorites: Vec<SavedRecipe> = serde_json::from_str(&storage.raw(FAVORITES_KEY).unwrap()).unwrap();
    let scheduled: Vec<SavedRecipe> = serde_json::from_str(&storage.raw(SCHEDULED_KEY).unwrap()).unwrap();
    assert_eq!(history.as_slice(), orch.store().history());
    assert_eq!(favorites.as_slice(), orch.store().favorites());
    assert_eq!(scheduled.as_slice(), orch.store().scheduled());

    let reopened = CollectionStore::open(storage);
    assert_eq!(reopened.history(), orch.store().history());
    assert_eq!(reopened.favorites(), orch.store().favorites());
    assert_eq!(reopened.scheduled(), orch.store().scheduled());

    let entry_ids: HashSet<_> = reopened.scheduled().iter().map(|s| s.entry_id.clone()).collect();
    assert_eq!(entry_ids.len(), 2);
}

#[tokio::test]
async fn file_backed_collections_survive_restart() {
    let dir = TempDir::new().unwrap();
    let recipes = {
        let store = CollectionStore::open(FileStorage::new(dir.path()));
        let mut orch = SessionOrchestrator::new(ScriptedBackend::new().respond_with(EGG_RICE_RESPONSE), store);
        let recipes = orch.generate(&egg_rice(), &two_recipe_filters(), Language::English).await;
        orch.toggle_favorite(&recipes[0]);
        orch.schedule_recipe(&recipes[1], Some("2024-03-11")).unwrap();
        recipes
    };

    let store = CollectionStore::open(FileStorage::new(dir.path()));
    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].recipes, recipes);
    assert!(store.is_favorite(&recipes[0].id));
    assert_eq!(store.scheduled().len(), 1);
    assert_eq!(store.scheduled()[0].recipe, recipes[1]);
}

#[test]
fn corrupt_storage_starts_empty() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.write(HISTORY_KEY, "[{\"id\": 1").unwrap();
    storage.write(FAVORITES_KEY, "null").unwrap();
    storage.write(SCHEDULED_KEY, "[]").unwrap();

    let store = CollectionStore::open(storage);
    assert!(store.history().is_empty());
    assert!(store.favorites().is_empty());
    assert!(store.scheduled().is_empty());
}
