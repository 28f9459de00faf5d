use tracing::{info, warn};

use crate::backend::RecipeBackend;
use crate::collections::{FavoriteToggle, ScheduleError};
use crate::i18n::{Language, Messages};
use crate::model::{FilterState, Recipe, SavedRecipe, SearchSession};
use crate::request_builder::build_generation_request;
use crate::response_normalizer::normalize_recipes;
use crate::store::CollectionStore;

/// Short, non-blocking feedback for the user after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AddedToFavorites,
    RemovedFromFavorites,
    Scheduled,
    NoResults,
}

impl Notice {
    pub fn message(self, messages: &Messages) -> &'static str {
        match self {
            Notice::AddedToFavorites => messages.added_to_favorites,
            Notice::RemovedFromFavorites => messages.removed_from_favorites,
            Notice::Scheduled => messages.schedule_saved,
            Notice::NoResults => messages.no_results,
        }
    }
}

impl From<FavoriteToggle> for Notice {
    fn from(toggle: FavoriteToggle) -> Self {
        match toggle {
            FavoriteToggle::Added => Notice::AddedToFavorites,
            FavoriteToggle::Removed => Notice::RemovedFromFavorites,
        }
    }
}

/// What the user is currently looking at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingState {
    pub ingredients: Vec<String>,
    pub filters: FilterState,
    pub language: Language,
    pub recipes: Vec<Recipe>,
}

impl WorkingState {
    /// Adds a trimmed, lowercased ingredient. Blank input and duplicates are ignored.
    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        let name = raw.trim().to_lowercase();
        if name.is_empty() || self.ingredients.contains(&name) {
            return false;
        }
        self.ingredients.push(name);
        true
    }

    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != name);
        self.ingredients.len() != before
    }

    fn restore(&mut self, session: &SearchSession) {
        self.ingredients = session.ingredients.clone();
        self.filters = session.filters;
        self.recipes = session.recipes.clone();
    }
}

/// Drives generate-cycles and is the only mutator of the collections.
pub struct SessionOrchestrator<B> {
    backend: B,
    store: CollectionStore,
    working: WorkingState,
}

impl<B: RecipeBackend> SessionOrchestrator<B> {
    pub fn new(backend: B, store: CollectionStore) -> Self {
        Self {
            backend,
            store,
            working: WorkingState::default(),
        }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn working(&self) -> &WorkingState {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut WorkingState {
        &mut self.working
    }

    pub fn messages(&self) -> &'static Messages {
        self.working.language.messages()
    }

    /// Runs one generate-cycle. Empty ingredients are a no-op, backend
    /// failures come back as an empty list, and only non-empty results are
    /// recorded in history.
    pub async fn generate(&mut self, ingredients: &[String], filters: &FilterState, language: Language) -> Vec<Recipe> {
        if ingredients.is_empty() {
            return Vec::new();
        }

        let request = build_generation_request(ingredients, filters, language);
        info!(
            backend = self.backend.name(),
            ingredients = ingredients.len(),
            count = filters.recipe_count,
            temperature = request.temperature,
            "generating recipes"
        );

        let raw = match self.backend.generate(&request).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(error = %e, "recipe generation failed");
                None
            }
        };
        let recipes = normalize_recipes(raw.as_deref());

        if !recipes.is_empty() {
            self.store.record_session(SearchSession::new(ingredients, filters, &recipes));
        }
        info!(recipes = recipes.len(), "generation finished");

        self.working.recipes = recipes.clone();
        recipes
    }

    /// `generate` over the current working state.
    pub async fn generate_current(&mut self) -> (Vec<Recipe>, Option<Notice>) {
        let ingredients = self.working.ingredients.clone();
        if ingredients.is_empty() {
            return (Vec::new(), None);
        }
        let filters = self.working.filters;
        let language = self.working.language;
        let recipes = self.generate(&ingredients, &filters, language).await;
        let notice = recipes.is_empty().then_some(Notice::NoResults);
        (recipes, notice)
    }

    /// Restores ingredients, filters and results from a past session.
    /// History itself is left untouched.
    pub fn select_history_session(&mut self, session_id: &str) -> Option<&SearchSession> {
        let session = self.store.find_session(session_id)?;
        self.working.restore(session);
        Some(session)
    }

    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> Notice {
        self.store.toggle_favorite(recipe).into()
    }

    pub fn schedule_recipe(&mut self, recipe: &Recipe, date: Option<&str>) -> Result<(&SavedRecipe, Notice), ScheduleError> {
        let entry = self.store.schedule_recipe(recipe, date)?;
        Ok((entry, Notice::Scheduled))
    }

    pub fn remove_scheduled(&mut self, entry_id: &str) -> bool {
        self.store.remove_scheduled(entry_id)
    }

    /// Looks a recipe up by id in the current results, then history,
    /// favorites and the meal plan.
    pub fn find_recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.working
            .recipes
            .iter()
            .chain(self.store.history().iter().flat_map(|s| s.recipes.iter()))
            .chain(self.store.favorites().iter().map(|f| &f.recipe))
            .chain(self.store.scheduled().iter().map(|s| &s.recipe))
            .find(|r| r.id == recipe_id)
    }
}
