//! Plain-text views for the command line.

use chrono::Local;
use std::fmt::Write;

use crate::collections::CalendarMonth;
use crate::i18n::{Language, Messages};
use crate::model::{CuisineType, Recipe, SavedRecipe, SearchSession};

/// Title line naming the active language.
pub fn banner(language: Language) -> String {
    format!("{} · {}", language.messages().app_title, language.label())
}

/// One-line summary used in lists.
pub fn recipe_line(recipe: &Recipe, messages: &Messages) -> String {
    let mut line = format!(
        "{} [{}] {} · {} · {} {}",
        recipe.title,
        recipe.id,
        recipe.cuisine,
        recipe.difficulty,
        recipe.total_time_minutes(),
        messages.minutes
    );
    if let Some(kcal) = recipe.calories {
        let _ = write!(line, " · {} kcal", kcal);
    }
    line
}

pub fn recipe_card(recipe: &Recipe, is_favorite: bool, messages: &Messages) -> String {
    let mut out = String::new();
    let heart = if is_favorite { " ♥" } else { "" };
    let _ = writeln!(out, "{}{}", recipe.title, heart);
    let _ = writeln!(out, "id: {}", recipe.id);
    if !recipe.description.is_empty() {
        let _ = writeln!(out, "{}", recipe.description);
    }
    let _ = writeln!(
        out,
        "{} · {} · {}+{} {}{}",
        recipe.cuisine,
        recipe.difficulty,
        recipe.prep_time_minutes,
        recipe.cook_time_minutes,
        messages.minutes,
        recipe.calories.map(|k| format!(" · {} kcal", k)).unwrap_or_default()
    );

    let _ = writeln!(out, "\n{}:", messages.ingredients);
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient);
    }
    let _ = writeln!(out, "\n{}:", messages.instructions);
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", step + 1, instruction);
    }
    out
}

pub fn recipe_list(recipes: &[Recipe], messages: &Messages) -> String {
    let mut out = String::new();
    for (index, recipe) in recipes.iter().enumerate() {
        if recipes.len() > 1 {
            let _ = writeln!(out, "Option #{}", index + 1);
        }
        let _ = writeln!(out, "{}", recipe_card(recipe, false, messages));
    }
    out
}

pub fn history(sessions: &[SearchSession], messages: &Messages) -> String {
    if sessions.is_empty() {
        return format!("{}\n", messages.history_empty);
    }
    let mut out = String::new();
    for session in sessions {
        let cuisine = match session.filters.cuisine {
            CuisineType::Any => messages.any.to_string(),
            other => other.to_string(),
        };
        let _ = writeln!(
            out,
            "{} | {} | {} | {} {}",
            session.id,
            session.timestamp.with_timezone(&Local).format("%b %-d, %-I:%M %p"),
            cuisine,
            session.recipes.len(),
            messages.recipe_count
        );
        let _ = writeln!(
            out,
            "    {} · {}: {}",
            session.ingredients.join(", "),
            messages.creativity,
            session.filters.creativity
        );
    }
    out
}

pub fn favorites(favorites: &[SavedRecipe], messages: &Messages) -> String {
    if favorites.is_empty() {
        return format!("{}\n", messages.favorites_empty);
    }
    favorites
        .iter()
        .map(|f| format!("{}\n", recipe_line(&f.recipe, messages)))
        .collect()
}

pub fn calendar(month: &CalendarMonth<'_>, messages: &Messages) -> String {
    let mut out = format!("{:04}-{:02}\n", month.year, month.month);
    let planned: Vec<_> = month.days.iter().filter(|d| !d.entries.is_empty()).collect();
    if planned.is_empty() {
        let _ = writeln!(out, "{}", messages.calendar_empty);
        return out;
    }
    for day in planned {
        let marker = if day.is_today { " *" } else { "" };
        let _ = writeln!(out, "{}{}", day.date.format("%a %d"), marker);
        for entry in &day.entries {
            let _ = writeln!(out, "    {} [entry {}]", entry.recipe.title, entry.entry_id);
        }
    }
    out
}
