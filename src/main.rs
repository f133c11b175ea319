use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recipe_engine::diagnostics::{CollectingDiagnostics, Diagnostics};
use recipe_engine::engine_config::EngineConfig;
use recipe_engine::id_resolver::IdResolver;
use recipe_engine::recipe_model::Recipe;
use recipe_engine::recommender::recommend;
use recipe_engine::search::{search, SearchRequest};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "recipe-engine")]
#[command(version, about = "Search, resolve and recommend recipes from a JSON collection")]
struct Cli {
    /// Path to the recipe collection (JSON array)
    recipes: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank recipes by how well the pantry covers them
    Search {
        /// Comma-separated pantry ingredients
        #[arg(value_delimiter = ',')]
        ingredients: Vec<String>,
        /// Only keep recipes of this cuisine ("all" disables the filter)
        #[arg(long)]
        cuisine: Option<String>,
        /// Comma-separated dietary tags every result must carry
        #[arg(long, value_delimiter = ',')]
        diet: Vec<String>,
        /// Ordering: bestMatch, quickest or easiest
        #[arg(long)]
        sort: Option<String>,
        /// Minimum match percentage (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        min: Option<u8>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Resolve a possibly malformed recipe id
    Resolve {
        /// Requested recipe id
        id: String,
    },

    /// Recommend recipes to go with a reference recipe
    Recommend {
        /// Reference recipe id
        id: String,
        /// Number of recommendations (defaults to RECIPE_RECOMMENDATION_COUNT)
        count: Option<usize>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("RECIPE_ENGINE_LOG_JSON").map(|v| v == "1").unwrap_or(false);

    // stderr keeps stdout valid JSON
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipes from {}", path.display()))?;
    let mut recipes: Vec<Recipe> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse recipes in {}", path.display()))?;

    for recipe in &mut recipes {
        recipe.fill_total_time();
    }

    let inconsistent = recipes.iter().filter(|r| !r.has_consistent_total_time()).count();
    if inconsistent > 0 {
        warn!("{} recipes have totalTime != prepTime + cookTime", inconsistent);
    }
    Ok(recipes)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

fn build_request(command: &Command, config: &EngineConfig, diagnostics: &dyn Diagnostics) -> Option<SearchRequest> {
    let Command::Search {
        ingredients,
        cuisine,
        diet,
        sort,
        min,
        limit,
    } = command
    else {
        return None;
    };

    let mut request = SearchRequest::from_config(ingredients.as_slice(), config);
    if let Some(cuisine) = cuisine {
        request = request.with_cuisine(cuisine);
    }
    for tag in diet {
        request = request.with_dietary_filter(tag);
    }
    if let Some(sort) = sort {
        request = request.with_sort_key(sort, diagnostics);
    }
    if let Some(min) = min {
        request = request.with_min_match_percentage(*min);
    }
    if let Some(limit) = limit {
        request = request.with_page(0, *limit);
    }
    Some(request)
}

fn run(cli: Cli, config: &EngineConfig, diagnostics: Arc<CollectingDiagnostics>) -> Result<()> {
    let recipes = load_recipes(&cli.recipes)?;
    info!("Loaded {} recipes from {}", recipes.len(), cli.recipes.display());

    let resolver = IdResolver::from_config(config).with_diagnostics(diagnostics.clone());

    match &cli.command {
        Command::Search { .. } => {
            let request = build_request(&cli.command, config, diagnostics.as_ref())
                .context("Search command without search arguments")?;
            let response = search(&recipes, &request);
            info!("Search returned {} of {} hits", response.results.len(), response.total);
            print_json(&response)
        }
        Command::Resolve { id } => {
            let lookup = resolver.lookup(id.as_str(), &recipes);
            info!("Resolved '{}' with match type {}", id, lookup.resolution.match_type);
            print_json(&lookup)
        }
        Command::Recommend { id, count } => {
            let lookup = resolver.lookup(id.as_str(), &recipes);
            let Some(reference) = lookup.recipe else {
                print_json(&lookup)?;
                bail!("Recipe '{}' not found", id);
            };
            let count = count.unwrap_or(config.recommendation_count);
            print_json(&recommend(reference, &recipes, count))
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;

    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let outcome = run(cli, &config, diagnostics.clone());

    for message in diagnostics.messages() {
        warn!("{}", message);
    }
    outcome
}
