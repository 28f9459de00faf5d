use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use pantry_chef::backend::{OpenRouterBackend, RecipeBackend};
use pantry_chef::cli::{parse_args, Command};
use pantry_chef::collections::DATE_FORMAT;
use pantry_chef::config::AppConfig;
use pantry_chef::render;
use pantry_chef::session::{Notice, SessionOrchestrator};
use pantry_chef::store::{CollectionStore, FileStorage};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pantry_chef=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_notice<B: RecipeBackend>(orchestrator: &SessionOrchestrator<B>, notice: Notice) {
    println!("{}", notice.message(orchestrator.messages()));
}

fn parse_month(month: Option<&str>, today: NaiveDate) -> Result<(i32, u32)> {
    match month {
        None => Ok((today.year(), today.month())),
        Some(text) => {
            let first = NaiveDate::parse_from_str(&format!("{}-01", text.trim()), DATE_FORMAT)
                .with_context(|| format!("Invalid month '{}', expected YYYY-MM", text))?;
            Ok((first.year(), first.month()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = parse_args();
    let config = AppConfig::from_env()
        .context("Failed to load configuration")?
        .with_overrides(cli.data_dir.clone(), cli.lang);
    let storage = FileStorage::new(&config.data_dir);
    info!(data_dir = %storage.dir().display(), lang = %config.language, "starting");

    let store = CollectionStore::open(storage);
    let backend = OpenRouterBackend::new(&config.api_key_env_var, config.model.clone());
    let mut orchestrator = SessionOrchestrator::new(backend, store);
    orchestrator.working_mut().language = config.language;
    let messages = orchestrator.messages();

    match cli.command {
        Command::Generate(args) => {
            for ingredient in &args.ingredients {
                orchestrator.working_mut().add_ingredient(ingredient);
            }
            orchestrator.working_mut().filters = args.filters();

            eprintln!("{}", render::banner(config.language));
            eprintln!("{}", messages.generating);
            let (recipes, notice) = orchestrator.generate_current().await;
            if let Some(notice) = notice {
                print_notice(&orchestrator, notice);
            }
            print!("{}", render::recipe_list(&recipes, messages));
        }
        Command::History => {
            print!("{}", render::history(orchestrator.store().history(), messages));
        }
        Command::Replay { session_id } => {
            orchestrator
                .select_history_session(&session_id)
                .ok_or_else(|| anyhow!("No session with id '{}'", session_id))?;
            let working = orchestrator.working();
            println!("{}\n", working.ingredients.join(", "));
            print!("{}", render::recipe_list(&working.recipes, messages));
        }
        Command::Favorites => {
            print!("{}", render::favorites(orchestrator.store().favorites(), messages));
        }
        Command::Favorite { recipe_id } => {
            let recipe = orchestrator
                .find_recipe(&recipe_id)
                .cloned()
                .ok_or_else(|| anyhow!("No recipe with id '{}'", recipe_id))?;
            let notice = orchestrator.toggle_favorite(&recipe);
            print_notice(&orchestrator, notice);
        }
        Command::Schedule { recipe_id, date } => {
            let recipe = orchestrator
                .find_recipe(&recipe_id)
                .cloned()
                .ok_or_else(|| anyhow!("No recipe with id '{}'", recipe_id))?;
            let date = date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());
            let (entry, notice) = orchestrator.schedule_recipe(&recipe, Some(date.as_str()))?;
            println!("entry {}", entry.entry_id);
            print_notice(&orchestrator, notice);
        }
        Command::Unschedule { entry_id } => {
            if !orchestrator.remove_scheduled(&entry_id) {
                println!("No meal-plan entry with id '{}'", entry_id);
            }
        }
        Command::Calendar { month } => {
            let today = Local::now().date_naive();
            let (year, month) = parse_month(month.as_deref(), today)?;
            let view = orchestrator
                .store()
                .calendar_month(year, month, today)
                .ok_or_else(|| anyhow!("Invalid month {}-{}", year, month))?;
            print!("{}", render::calendar(&view, messages));
        }
        Command::Show { recipe_id } => {
            let recipe = orchestrator
                .find_recipe(&recipe_id)
                .ok_or_else(|| anyhow!("No recipe with id '{}'", recipe_id))?;
            let is_favorite = orchestrator.store().is_favorite(&recipe.id);
            println!("{}", render::recipe_card(recipe, is_favorite, messages));
            println!("{}", messages.share_text_for(&recipe.title, &recipe.ingredients));
        }
    }

    Ok(())
}
