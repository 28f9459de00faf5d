use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::i18n::Language;
use crate::model::{
    CalorieGoal, CreativityLevel, CuisineType, DifficultyFilter, FilterState, MAX_RECIPE_COUNT, MIN_RECIPE_COUNT,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn what is in your fridge into recipes", long_about = None)]
pub struct Cli {
    /// Directory holding history, favorites and the meal plan
    #[arg(long, global = true, env = "PANTRY_CHEF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Language code: en, zh-HK, zh-TW, zh-CN, ja
    #[arg(long, global = true, env = "PANTRY_CHEF_LANG")]
    pub lang: Option<Language>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate recipes from ingredients
    Generate(GenerateArgs),
    /// List past searches, most recent first
    History,
    /// Restore a past search and show its recipes
    Replay {
        session_id: String,
    },
    /// List favorite recipes
    Favorites,
    /// Add a recipe to favorites, or remove it if already there
    Favorite {
        recipe_id: String,
    },
    /// Put a recipe on the meal plan
    Schedule {
        recipe_id: String,
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove one meal-plan entry
    Unschedule {
        entry_id: String,
    },
    /// Show the meal plan for a month
    Calendar {
        /// Month as YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Show a full recipe
    Show {
        recipe_id: String,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Ingredient, repeatable: -i egg -i rice
    #[arg(short, long = "ingredient", required = true)]
    pub ingredients: Vec<String>,

    #[arg(long, default_value_t = CuisineType::Any)]
    pub cuisine: CuisineType,

    #[arg(long, default_value_t = DifficultyFilter::Any)]
    pub difficulty: DifficultyFilter,

    /// Maximum prep + cook minutes, 0 for no limit
    #[arg(long, default_value_t = 0)]
    pub max_time: u32,

    #[arg(long, default_value_t = CalorieGoal::Any)]
    pub calories: CalorieGoal,

    /// Number of recipes, 1 to 3
    #[arg(long, default_value_t = MAX_RECIPE_COUNT, value_parser = clap::value_parser!(u8).range(MIN_RECIPE_COUNT as i64..=MAX_RECIPE_COUNT as i64))]
    pub count: u8,

    #[arg(long, default_value_t = CreativityLevel::Traditional)]
    pub creativity: CreativityLevel,
}

impl GenerateArgs {
    pub fn filters(&self) -> FilterState {
        FilterState {
            cuisine: self.cuisine,
            difficulty: self.difficulty,
            max_prep_time: self.max_time,
            calorie_goal: self.calories,
            recipe_count: self.count,
            creativity: self.creativity,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["pantry-chef", "generate", "-i", "egg", "-i", "rice"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.ingredients, vec!["egg", "rice"]);
        assert_eq!(args.filters(), FilterState::default());
    }

    #[test]
    fn test_generate_filters() {
        let cli = Cli::try_parse_from([
            "pantry-chef", "--lang", "ja", "generate", "-i", "tofu", "--cuisine", "asian", "--count", "2",
            "--creativity", "innovative", "--calories", "light", "--max-time", "30",
        ])
        .unwrap();
        assert_eq!(cli.lang, Some(Language::Japanese));
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let filters = args.filters();
        assert_eq!(filters.cuisine, CuisineType::Asian);
        assert_eq!(filters.recipe_count, 2);
        assert_eq!(filters.creativity, CreativityLevel::Innovative);
        assert_eq!(filters.calorie_goal, CalorieGoal::Light);
        assert_eq!(filters.max_prep_time, 30);
    }

    #[test]
    fn test_count_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["pantry-chef", "generate", "-i", "egg", "--count", "4"]).is_err());
        assert!(Cli::try_parse_from(["pantry-chef", "generate", "-i", "egg", "--count", "0"]).is_err());
    }

    #[test]
    fn test_generate_requires_ingredients() {
        assert!(Cli::try_parse_from(["pantry-chef", "generate"]).is_err());
    }

    #[test]
    fn test_schedule_date_is_optional() {
        let cli = Cli::try_parse_from(["pantry-chef", "schedule", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Schedule { date: None, .. }));
    }
}
