use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volley_scout::api::state::AppState;
use volley_scout::config::AppConfig;
use volley_scout::report::{Language, ReportFormat};
use volley_scout::roster::parse_roster;
use volley_scout::session::{ScoutEvent, ScoutingSession};
use volley_scout::storage::{read_text, write_text, JsonlReader, JsonlWriter};

#[derive(Parser)]
#[command(name = "volley-scout")]
#[command(about = "Volleyball scouting statistics and match reports")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./volley-scout.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a match report from a roster file and a JSONL event log
    Report {
        /// Roster file (number, name, surname per line)
        #[arg(long)]
        roster: PathBuf,

        /// Scouting event log, one JSON event per line
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output format: text, html, json or jsonl
        #[arg(long)]
        format: Option<ReportFormat>,

        /// Output file or directory (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Match name for the report heading
        #[arg(long)]
        match_name: Option<String>,

        /// Label language: it or en
        #[arg(long)]
        language: Option<Language>,
    },

    /// Validate a roster file and list its athletes
    CheckRoster {
        /// Roster file to check
        path: PathBuf,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Roster file to preload
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Match name for the session
        #[arg(long)]
        match_name: Option<String>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Resolve `--output`: a directory gets a file named after the match.
fn output_path(output: &Path, stem: &str, format: ReportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(format!("{}.{}", stem, format.extension()))
    } else {
        output.to_path_buf()
    }
}

fn load_session(roster: &Path, match_name: String) -> Result<ScoutingSession> {
    let text = read_text(roster)
        .with_context(|| format!("Failed to read roster {}", roster.display()))?;

    let mut session = ScoutingSession::new(match_name);
    let summary = session.import_roster(&text);
    tracing::info!(
        "Loaded {} athletes from {} ({} rejected lines)",
        summary.added.len(),
        roster.display(),
        summary.errors.len()
    );
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting volley-scout v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Report {
            roster,
            events,
            format,
            output,
            match_name,
            language,
        } => {
            let format = format.unwrap_or(config.report.format);
            let language = language.unwrap_or(config.report.language);
            let match_name = match_name.unwrap_or_else(|| config.report.match_name.clone());

            let mut session = load_session(&roster, match_name)?;

            if let Some(events_path) = events {
                let reader = JsonlReader::<ScoutEvent>::new(events_path.clone());
                if !reader.exists() {
                    bail!("Event log not found: {}", events_path.display());
                }
                let events = reader.read_all()?;
                let summary = session.apply_all(&events);
                tracing::info!(
                    "Replayed {} events ({} rejected)",
                    summary.applied,
                    summary.rejected
                );
            }

            let report = session.report(language);

            match output {
                Some(output) => {
                    let path = output_path(&output, &report.file_stem(), format);
                    if format == ReportFormat::Jsonl {
                        JsonlWriter::new(path.clone()).write_all(report.rows())?;
                    } else {
                        write_text(&path, &report.render(format)?)?;
                    }
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", report.render(format)?),
            }
        }
        Commands::CheckRoster { path } => {
            let text = read_text(&path)
                .with_context(|| format!("Failed to read roster {}", path.display()))?;
            let import = parse_roster(&text);

            println!("\n=== Roster {} ===", path.display());
            for entry in &import.entries {
                println!(
                    "  {:>3}  {}",
                    entry.athlete.jersey_number(),
                    entry.athlete.display_name()
                );
            }
            println!("Athletes: {}", import.entries.len());

            if !import.is_clean() {
                println!("\nErrors:");
                for err in &import.errors {
                    println!("  - {}", err);
                }
                bail!("{} invalid roster lines", import.errors.len());
            }
        }
        Commands::Serve {
            host,
            port,
            roster,
            match_name,
        } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            let mut checked = config.clone();
            checked.server = server.clone();
            checked.validate()?;

            let match_name = match_name.unwrap_or_else(|| config.report.match_name.clone());
            let session = match roster {
                Some(roster) => load_session(&roster, match_name)?,
                None => ScoutingSession::new(match_name),
            };

            let state = AppState::new(session, config.report.language, server.cors_origin);
            let app = volley_scout::api::build_router(state);
            let addr = format!("{}:{}", server.host, server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Scouting server: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
