//! Favorites and meal-plan operations on the collection store.
//!
//! Favorites toggle and are unique per recipe id. Scheduled entries only ever
//! append: the same recipe may sit on any number of dates, each entry
//! addressed by its own `entry_id`.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::model::{Recipe, SavedRecipe};
use crate::store::CollectionStore;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no date supplied for scheduling")]
    MissingDate,
    #[error("not a calendar date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

/// Parses a `YYYY-MM-DD` date. `None` and blank input count as missing.
pub fn parse_schedule_date(date: Option<&str>) -> Result<NaiveDate, ScheduleError> {
    let text = date.map(str::trim).filter(|d| !d.is_empty()).ok_or(ScheduleError::MissingDate)?;
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| ScheduleError::InvalidDate(text.to_string()))
}

/// One cell of the month view.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub entries: Vec<&'a SavedRecipe>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth<'a> {
    pub year: i32,
    pub month: u32,
    /// Blank cells before the 1st in a Sunday-first week.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay<'a>>,
}

impl CollectionStore {
    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|f| f.recipe.id == recipe_id)
    }

    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> FavoriteToggle {
        let outcome = if self.is_favorite(&recipe.id) {
            self.favorites.retain(|f| f.recipe.id != recipe.id);
            FavoriteToggle::Removed
        } else {
            self.favorites.push(SavedRecipe::new(recipe.clone(), None));
            FavoriteToggle::Added
        };
        info!(recipe_id = %recipe.id, ?outcome, "favorite toggled");
        self.save_favorites();
        outcome
    }

    /// Appends a new scheduled entry and returns it. Nothing is created when
    /// the date is missing or malformed.
    pub fn schedule_recipe(&mut self, recipe: &Recipe, date: Option<&str>) -> Result<&SavedRecipe, ScheduleError> {
        let date = parse_schedule_date(date)?;
        let entry = SavedRecipe::new(recipe.clone(), Some(date));
        info!(recipe_id = %recipe.id, entry_id = %entry.entry_id, %date, "recipe scheduled");
        self.scheduled.push(entry);
        self.save_scheduled();
        Ok(&self.scheduled[self.scheduled.len() - 1])
    }

    /// Removes the entry with `entry_id`. Returns false if there was none.
    pub fn remove_scheduled(&mut self, entry_id: &str) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.entry_id != entry_id);
        if self.scheduled.len() == before {
            return false;
        }
        info!(entry_id, "scheduled entry removed");
        self.save_scheduled();
        true
    }

    pub fn scheduled_entry(&self, entry_id: &str) -> Option<&SavedRecipe> {
        self.scheduled.iter().find(|s| s.entry_id == entry_id)
    }

    pub fn scheduled_on(&self, date: NaiveDate) -> Vec<&SavedRecipe> {
        self.scheduled
            .iter()
            .filter(|s| s.date_scheduled == Some(date))
            .collect()
    }

    /// Month grid for the calendar view, or `None` for an invalid year/month.
    pub fn calendar_month(&self, year: i32, month: u32, today: NaiveDate) -> Option<CalendarMonth<'_>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| CalendarDay {
                date,
                is_today: date == today,
                entries: self.scheduled_on(date),
            })
            .collect();

        Some(CalendarMonth {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::recipe;
    use crate::store::MemoryStorage;

    fn store() -> CollectionStore {
        CollectionStore::open(MemoryStorage::new())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_twice_restores_favorites() {
        let mut store = store();
        let keep = recipe("keep");
        store.toggle_favorite(&keep);
        let before = store.favorites().to_vec();

        let r = recipe("toast");
        assert_eq!(store.toggle_favorite(&r), FavoriteToggle::Added);
        assert!(store.is_favorite(&r.id));
        assert_eq!(store.toggle_favorite(&r), FavoriteToggle::Removed);
        assert_eq!(store.favorites(), before.as_slice());
    }

    #[test]
    fn test_favorites_never_duplicate_a_recipe() {
        let mut store = store();
        let r = recipe("soup");
        for _ in 0..5 {
            store.toggle_favorite(&r);
        }
        assert_eq!(store.favorites().len(), 1);
        assert!(store.favorites()[0].date_scheduled.is_none());
    }

    #[test]
    fn test_scheduling_twice_creates_independent_entries() {
        let mut store = store();
        let r = recipe("curry");
        let first = store.schedule_recipe(&r, Some("2024-03-10")).unwrap().entry_id.clone();
        let second = store.schedule_recipe(&r, Some("2024-03-11")).unwrap().entry_id.clone();

        assert_eq!(store.scheduled().len(), 2);
        assert_ne!(first, second);
        let a = store.scheduled_entry(&first).unwrap();
        let b = store.scheduled_entry(&second).unwrap();
        assert_eq!(a.recipe.id, b.recipe.id);
        assert_eq!(a.date_scheduled, Some(ymd(2024, 3, 10)));
        assert_eq!(b.date_scheduled, Some(ymd(2024, 3, 11)));
    }

    #[test]
    fn test_same_recipe_same_date_still_appends() {
        let mut store = store();
        let r = recipe("pasta");
        store.schedule_recipe(&r, Some("2024-03-10")).unwrap();
        store.schedule_recipe(&r, Some("2024-03-10")).unwrap();
        assert_eq!(store.scheduled_on(ymd(2024, 3, 10)).len(), 2);
    }

    #[test]
    fn test_missing_or_bad_date_creates_nothing() {
        let mut store = store();
        let r = recipe("stew");
        assert_eq!(store.schedule_recipe(&r, None).unwrap_err(), ScheduleError::MissingDate);
        assert_eq!(store.schedule_recipe(&r, Some("  ")).unwrap_err(), ScheduleError::MissingDate);
        assert!(matches!(
            store.schedule_recipe(&r, Some("2024-02-30")),
            Err(ScheduleError::InvalidDate(_))
        ));
        assert!(matches!(
            store.schedule_recipe(&r, Some("10/03/2024")),
            Err(ScheduleError::InvalidDate(_))
        ));
        assert!(store.scheduled().is_empty());
    }

    #[test]
    fn test_remove_scheduled_targets_one_entry() {
        let mut store = store();
        let r = recipe("salad");
        let first = store.schedule_recipe(&r, Some("2024-03-10")).unwrap().entry_id.clone();
        store.schedule_recipe(&r, Some("2024-03-11")).unwrap();

        assert!(store.remove_scheduled(&first));
        assert_eq!(store.scheduled().len(), 1);
        assert_eq!(store.scheduled()[0].date_scheduled, Some(ymd(2024, 3, 11)));

        assert!(!store.remove_scheduled(&first));
        assert!(!store.remove_scheduled(&r.id));
        assert_eq!(store.scheduled().len(), 1);
    }

    #[test]
    fn test_favorite_and_schedule_are_independent() {
        let mut store = store();
        let r = recipe("dumplings");
        store.toggle_favorite(&r);
        store.schedule_recipe(&r, Some("2024-03-10")).unwrap();
        store.toggle_favorite(&r);
        assert!(store.favorites().is_empty());
        assert_eq!(store.scheduled().len(), 1);
    }

    #[test]
    fn test_calendar_month_buckets_by_day() {
        let mut store = store();
        store.schedule_recipe(&recipe("a"), Some("2024-03-10")).unwrap();
        store.schedule_recipe(&recipe("b"), Some("2024-03-10")).unwrap();
        store.schedule_recipe(&recipe("c"), Some("2024-03-31")).unwrap();
        store.schedule_recipe(&recipe("d"), Some("2025-03-10")).unwrap();

        let month = store.calendar_month(2024, 3, ymd(2024, 3, 10)).unwrap();
        assert_eq!(month.days.len(), 31);
        // 2024-03-01 was a Friday.
        assert_eq!(month.leading_blanks, 5);
        assert_eq!(month.days[9].entries.len(), 2);
        assert!(month.days[9].is_today);
        assert_eq!(month.days[30].entries.len(), 1);
        assert_eq!(month.days.iter().filter(|d| d.is_today).count(), 1);
        assert_eq!(month.days.iter().map(|d| d.entries.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_calendar_month_rejects_bad_month() {
        assert!(store().calendar_month(2024, 13, ymd(2024, 1, 1)).is_none());
        assert_eq!(store().calendar_month(2024, 2, ymd(2024, 1, 1)).unwrap().days.len(), 29);
    }

    #[test]
    fn test_collections_survive_reopen() {
        let storage = MemoryStorage::new();
        let mut store = CollectionStore::open(storage.clone());
        let r = recipe("ramen");
        store.toggle_favorite(&r);
        store.schedule_recipe(&r, Some("2024-03-10")).unwrap();
        store.schedule_recipe(&r, Some("2024-03-12")).unwrap();

        let reopened = CollectionStore::open(storage);
        assert_eq!(reopened.favorites(), store.favorites());
        assert_eq!(reopened.scheduled(), store.scheduled());
    }
}
