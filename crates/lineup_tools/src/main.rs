//! Tiberium lineup recommender - command-line tools.
//!
//! # Usage
//!
//! ```bash
//! # Recommend a lineup for a saved scenario
//! lineup-tools recommend scenarios/demo_outpost.ron --objective min_repair_time
//!
//! # Browse the catalog
//! lineup-tools units --faction nod --type air
//!
//! # Validate a data directory
//! lineup-tools validate --data-dir crates/lineup_core/assets/data
//!
//! # Evaluate every scenario in a directory
//! lineup-tools batch scenarios/
//! ```
//!
//! Reports go to stdout, logs to stderr. Set `RUST_LOG=debug` for engine
//! decisions.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use lineup_core::data::UnitType;
use lineup_core::engine::{EngineOptions, RecommendationEngine};
use lineup_core::factions::Faction;
use lineup_core::target::Objective;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lineup_tools::batch::{run_batch, BatchConfig};
use lineup_tools::data::{load_engine, resolve_data_dir};
use lineup_tools::report::{filter_units, unit_table, Report};
use lineup_tools::scenario::Scenario;
use lineup_tools::validate::validate_engine;

#[derive(Parser)]
#[command(name = "lineup-tools")]
#[command(about = "Attack lineup recommendations for Tiberium Alliances")]
#[command(version)]
struct Cli {
    /// Directory holding unit_catalog.ron and doctrines.ron
    /// (defaults to $LINEUP_DATA_DIR, then the embedded data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RequestArgs {
    /// Objective to optimize (min_repair_time, min_power_cost,
    /// max_loot_per_minute, max_win_chance)
    #[arg(long, value_parser = parse_objective)]
    objective: Option<Objective>,

    /// Command-point budget
    #[arg(long)]
    cp_limit: Option<u32>,

    /// Player level
    #[arg(long)]
    player_level: Option<u32>,
}

impl RequestArgs {
    fn options(&self) -> EngineOptions {
        EngineOptions {
            cp_limit: self.cp_limit,
            player_level: self.player_level,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a lineup for a scenario file
    Recommend {
        /// Scenario file (.ron or .json)
        scenario: PathBuf,

        #[command(flatten)]
        request: RequestArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List catalog units
    Units {
        /// Only this faction (nod, gdi, forgotten)
        #[arg(long, value_parser = parse_faction)]
        faction: Option<Faction>,

        /// Only this unit type (infantry, vehicle, air)
        #[arg(long = "type", value_parser = parse_unit_type)]
        unit_type: Option<UnitType>,
    },

    /// Validate catalog and doctrine data
    Validate,

    /// Evaluate every scenario in a directory
    Batch {
        /// Directory of scenario files
        dir: PathBuf,

        #[command(flatten)]
        request: RequestArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn parse_objective(s: &str) -> Result<Objective, String> {
    Objective::from_name(s).ok_or_else(|| format!("unknown objective '{s}'"))
}

fn parse_faction(s: &str) -> Result<Faction, String> {
    Faction::from_short_name(s).ok_or_else(|| format!("unknown faction '{s}'"))
}

fn parse_unit_type(s: &str) -> Result<UnitType, String> {
    UnitType::from_name(s).ok_or_else(|| format!("unknown unit type '{s}'"))
}

fn main() {
    // Initialize tracing to stderr (stdout is for reports)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir);
    let engine = match load_engine(data_dir.as_deref()) {
        Ok(engine) => engine,
        Err(e) => fail(&format!("Failed to load data: {e}")),
    };

    match cli.command {
        Commands::Recommend {
            scenario,
            request,
            json,
        } => cmd_recommend(&engine, &scenario, &request, json),
        Commands::Units { faction, unit_type } => {
            let units = filter_units(engine.catalog(), faction, unit_type);
            print!("{}", unit_table(&units));
        }
        Commands::Validate => cmd_validate(&engine, data_dir.as_deref()),
        Commands::Batch { dir, request, json } => cmd_batch(&engine, &dir, &request, json),
    }
}

fn fail(message: &str) -> ! {
    tracing::error!("{message}");
    process::exit(1);
}

fn cmd_recommend(engine: &RecommendationEngine, path: &Path, request: &RequestArgs, json: bool) {
    let scenario = match Scenario::load(path) {
        Ok(s) => s,
        Err(e) => fail(&e.to_string()),
    };

    let objective = scenario.resolved_objective(request.objective);
    let options = scenario.resolved_options(&request.options());
    tracing::info!(
        "Recommending for '{}' ({}, {} CP)",
        scenario.name,
        objective.as_str(),
        options.resolved_cp_limit()
    );

    let recs = engine.generate_recommendations(&scenario.extracted, objective, &options);
    let report = Report::new(&scenario.name, engine.catalog(), engine.doctrines(), &recs);

    if json {
        match report.to_json() {
            Ok(text) => println!("{text}"),
            Err(e) => fail(&format!("Failed to encode report: {e}")),
        }
    } else {
        print!("{}", report.to_text());
    }
}

fn cmd_validate(engine: &RecommendationEngine, data_dir: Option<&Path>) {
    let source = data_dir.map_or_else(|| "embedded data".to_string(), |d| d.display().to_string());
    tracing::info!("Validating {source}");
    match validate_engine(engine) {
        Ok(()) => tracing::info!(
            "Validation passed: {} units, {} doctrines",
            engine.catalog().len(),
            engine.doctrines().iter().count()
        ),
        Err(e) => fail(&format!("Validation failed: {e}")),
    }
}

fn cmd_batch(engine: &RecommendationEngine, dir: &Path, request: &RequestArgs, json: bool) {
    let config = BatchConfig {
        objective: request.objective,
        options: request.options(),
    };
    let results = match run_batch(engine, dir, &config) {
        Ok(r) => r,
        Err(e) => fail(&e.to_string()),
    };

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(&format!("Failed to encode results: {e}")),
        }
    } else {
        print!("{}", results.to_table());
    }

    if !results.errors.is_empty() {
        process::exit(1);
    }
}
