mod commands;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use es_core::config::Config;
use es_core::environment::{resolve_environment, EnvironmentName};
use es_core::preferences::{PreferencesUpdate, PreferredView};

use commands::Context;

/// env-stamp CLI -- environment-aware journal, navigation and tutorials.
#[derive(Parser)]
#[command(name = "es", version, about)]
struct Cli {
    /// Directory holding the JSON state files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.env-stamp/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the resolved environment (default when no subcommand is given).
    Env {
        #[command(subcommand)]
        action: Option<EnvAction>,
    },

    /// Query the navigation registry.
    Nav {
        #[command(subcommand)]
        action: NavAction,
    },

    /// Read or change navigation preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Write and manage journal entries.
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Browse tutorials and track progress.
    Tutorial {
        #[command(subcommand)]
        action: TutorialAction,
    },

    /// Record and inspect performance samples.
    Metrics {
        #[command(subcommand)]
        action: MetricsAction,
    },

    /// List running development and feature services.
    Services {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum EnvAction {
    /// Show the active environment, banner and feature flags.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Compare feature flags across every environment.
    Compare {
        #[arg(long)]
        json: bool,
    },
    /// Print the active feature flags.
    Flags {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum NavAction {
    /// List visible navigation items grouped by category.
    List {
        /// Include items hidden in this environment.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// List categories in display order.
    Categories,
    /// Search visible items by label, description or category.
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Report whether an item is available in this environment.
    Status {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the current preferences.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change one or more preferences.
    Set {
        #[arg(long)]
        sidebar_collapsed: Option<bool>,
        #[arg(long)]
        show_tooltips: Option<bool>,
        #[arg(long)]
        show_disabled_features: Option<bool>,
        #[arg(long, value_enum)]
        preferred_view: Option<ViewArg>,
        #[arg(long)]
        completed_onboarding: Option<bool>,
    },
    /// Restore the default preferences.
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    List,
}

impl From<ViewArg> for PreferredView {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Grid => PreferredView::Grid,
            ViewArg::List => PreferredView::List,
        }
    }
}

#[derive(Subcommand)]
enum JournalAction {
    /// Add an entry stamped with the active environment.
    Add { text: String },
    /// List entries, newest first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry by id.
    Delete { id: String },
    /// Delete every entry.
    Clear,
    /// Show entry count and storage size.
    Info {
        #[arg(long)]
        json: bool,
    },
    /// Export every entry as a JSON backup.
    Export {
        /// Output file, or a directory to receive a dated backup file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum TutorialAction {
    /// List tutorials with completion percentages.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a tutorial's steps and progress.
    Show { id: String },
    /// Start (or resume) a tutorial.
    Start { id: String },
    /// Jump to a step by index.
    Goto { id: String, index: usize },
    /// Advance to the next step.
    Next { id: String },
    /// Go back to the previous step.
    Prev { id: String },
    /// Mark a step completed.
    Step { id: String, step_id: String },
    /// Mark a tutorial completed.
    Complete { id: String },
    /// Show progress for one tutorial or overall.
    Progress {
        id: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Export all progress as JSON.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all progress from a JSON file.
    Import { file: PathBuf },
    /// Wipe all progress.
    Reset,
}

#[derive(Subcommand)]
enum MetricsAction {
    /// Record a single sample.
    Record {
        #[arg(long, default_value_t = 0.0)]
        page_load_time: f64,
        #[arg(long, default_value_t = 0.0)]
        render_time: f64,
        #[arg(long, default_value_t = 0)]
        memory_usage: u64,
        #[arg(long, default_value_t = 0)]
        network_requests: u64,
        #[arg(long, default_value_t = 0)]
        user_interactions: u64,
        #[arg(long, default_value_t = 0)]
        errors: u64,
    },
    /// List recorded samples, newest first.
    List {
        #[arg(long, value_parser = commands::parse_environment)]
        env: Option<EnvironmentName>,
        #[arg(long)]
        json: bool,
    },
    /// Summarise samples, optionally for one environment.
    Summary {
        #[arg(long, value_parser = commands::parse_environment)]
        env: Option<EnvironmentName>,
        #[arg(long)]
        json: bool,
    },
    /// Delete every sample.
    Clear,
    /// Sample periodically while probing a URL.
    Watch {
        /// How long to run before the final flush.
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        /// URL to time on each probe (defaults to the dev server).
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    }
    .with_env_overrides();

    if cli.log_json {
        es_telemetry::logging::init_logging_json("es", &config.general.log_level);
    } else {
        es_telemetry::logging::init_logging("es", &config.general.log_level);
    }

    let ctx = Context::new(config, cli.data_dir, resolve_environment());

    match cli.command {
        None => commands::env::show(&ctx, false)?,
        Some(Commands::Env { action }) => match action {
            None => commands::env::show(&ctx, false)?,
            Some(EnvAction::Show { json }) => commands::env::show(&ctx, json)?,
            Some(EnvAction::Compare { json }) => commands::env::compare(json)?,
            Some(EnvAction::Flags { json }) => commands::env::flags(&ctx, json)?,
        },
        Some(Commands::Nav { action }) => match action {
            NavAction::List { all, json } => commands::nav::list(&ctx, all, json)?,
            NavAction::Categories => commands::nav::list_categories(),
            NavAction::Search { query, json } => commands::nav::search(&ctx, &query, json)?,
            NavAction::Status { id, json } => commands::nav::status(&ctx, &id, json)?,
        },
        Some(Commands::Prefs { action }) => match action {
            PrefsAction::Show { json } => commands::prefs::show(&ctx, json)?,
            PrefsAction::Set {
                sidebar_collapsed,
                show_tooltips,
                show_disabled_features,
                preferred_view,
                completed_onboarding,
            } => {
                let update = PreferencesUpdate {
                    sidebar_collapsed,
                    show_tooltips,
                    show_disabled_features,
                    preferred_view: preferred_view.map(Into::into),
                    completed_onboarding,
                };
                commands::prefs::set(&ctx, &update)?;
            }
            PrefsAction::Reset => commands::prefs::reset(&ctx),
        },
        Some(Commands::Journal { action }) => match action {
            JournalAction::Add { text } => commands::journal::add(&ctx, &text)?,
            JournalAction::List { json } => commands::journal::list(&ctx, json)?,
            JournalAction::Delete { id } => commands::journal::delete(&ctx, &id)?,
            JournalAction::Clear => commands::journal::clear(&ctx)?,
            JournalAction::Info { json } => commands::journal::info(&ctx, json)?,
            JournalAction::Export { out } => commands::journal::export(&ctx, out.as_deref())?,
        },
        Some(Commands::Tutorial { action }) => match action {
            TutorialAction::List { json } => commands::tutorial::list(&ctx, json)?,
            TutorialAction::Show { id } => commands::tutorial::show(&ctx, &id)?,
            TutorialAction::Start { id } => commands::tutorial::start(&ctx, &id)?,
            TutorialAction::Goto { id, index } => commands::tutorial::goto(&ctx, &id, index)?,
            TutorialAction::Next { id } => commands::tutorial::next(&ctx, &id)?,
            TutorialAction::Prev { id } => commands::tutorial::prev(&ctx, &id)?,
            TutorialAction::Step { id, step_id } => {
                commands::tutorial::step(&ctx, &id, &step_id)?
            }
            TutorialAction::Complete { id } => commands::tutorial::complete(&ctx, &id)?,
            TutorialAction::Progress { id, json } => {
                commands::tutorial::progress(&ctx, id.as_deref(), json)?
            }
            TutorialAction::Export { out } => commands::tutorial::export(&ctx, out.as_deref())?,
            TutorialAction::Import { file } => commands::tutorial::import(&ctx, &file)?,
            TutorialAction::Reset => commands::tutorial::reset(&ctx),
        },
        Some(Commands::Metrics { action }) => match action {
            MetricsAction::Record {
                page_load_time,
                render_time,
                memory_usage,
                network_requests,
                user_interactions,
                errors,
            } => {
                let sample = commands::metrics::SampleArgs {
                    page_load_time,
                    render_time,
                    memory_usage,
                    network_requests,
                    user_interactions,
                    errors,
                };
                commands::metrics::record(&ctx, sample)?;
            }
            MetricsAction::List { env, json } => commands::metrics::list(&ctx, env, json)?,
            MetricsAction::Summary { env, json } => commands::metrics::summary(&ctx, env, json)?,
            MetricsAction::Clear => commands::metrics::clear(&ctx),
            MetricsAction::Watch { seconds, url } => {
                commands::metrics::watch(&ctx, seconds, url.as_deref()).await?
            }
        },
        Some(Commands::Services { json }) => commands::services::run(&ctx, json).await?,
    }

    Ok(())
}
