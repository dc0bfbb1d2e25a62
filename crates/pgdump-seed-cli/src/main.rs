//! pgdump-seed CLI - seed a document store from a PostgreSQL text dump.

use clap::Parser;
use pgdump_seed::{Config, MemoryStore, Orchestrator, SeedError, SeedResult, TransferResult};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

/// Error messages shown per entity class in the summary.
const MAX_ERRORS_SHOWN: usize = 5;

#[derive(Parser)]
#[command(name = "pgdump-seed")]
#[command(about = "Seed a document store from a PostgreSQL text dump")]
#[command(version)]
struct Cli {
    /// Path to the dump file [default: full_remote_backup.sql]
    dump: Option<PathBuf>,

    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parse, transform and load into an in-memory store instead of the target
    #[arg(long)]
    dry_run: bool,

    /// Keep existing documents instead of clearing the collections first
    #[arg(long)]
    skip_clear: bool,

    /// Override the number of listings created concurrently
    #[arg(long)]
    batch_size: Option<usize>,

    /// Override the pause between listing batches, in milliseconds
    #[arg(long)]
    batch_delay_ms: Option<u64>,

    /// Only probe the target store and exit
    #[arg(long)]
    health_check: bool,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), SeedError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(SeedError::Config)?;

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };
    let mut config = config.with_env_overrides();

    // Apply overrides
    if let Some(dump) = cli.dump {
        config.source.dump_path = dump;
    }
    if let Some(size) = cli.batch_size {
        config.load.batch_size = size;
    }
    if let Some(delay) = cli.batch_delay_ms {
        config.load.batch_delay_ms = delay;
    }
    config.validate()?;

    // Fatal input checks happen before any parsing.
    if !cli.dry_run {
        config.require_credentials()?;
    }
    if !cli.health_check && !config.source.dump_path.is_file() {
        return Err(SeedError::Config(format!(
            "Dump file not found: {}",
            config.source.dump_path.display()
        )));
    }

    let orchestrator = if cli.dry_run {
        info!("Dry run: documents go to an in-memory store");
        Orchestrator::with_store(config, Arc::new(MemoryStore::new()))
    } else {
        Orchestrator::new(config)?
    };
    let orchestrator = orchestrator.with_skip_clear(cli.skip_clear);

    if cli.health_check {
        let result = orchestrator.health_check().await;
        if cli.output_json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("Health Check Results:");
            println!(
                "  Target ({}): {} ({}ms)",
                result.store_type,
                if result.connected { "OK" } else { "FAILED" },
                result.latency_ms
            );
            if let Some(ref err) = result.error {
                println!("    Error: {}", err);
            }
        }
        if !result.connected {
            return Err(SeedError::Unreachable(
                result.error.unwrap_or_else(|| "health check failed".to_string()),
            ));
        }
        return Ok(());
    }

    info!("Dump file: {}", orchestrator.config().source.dump_path.display());
    let result = orchestrator.run().await?;

    if cli.output_json {
        println!("{}", result.to_json()?);
    } else {
        print_summary(&result);
    }

    result.into_outcome().map(|_| ())
}

fn print_summary(result: &SeedResult) {
    let title = if result.is_success() {
        "Seeding completed!"
    } else {
        "Seeding completed with errors!"
    };
    println!("\n{}", title);
    println!("  Run ID: {}", result.run_id);
    println!("  Duration: {:.2}s", result.duration_seconds);
    print_entity("Categories", &result.categories);
    print_entity("Listings", &result.listings);
}

fn print_entity(name: &str, result: &TransferResult) {
    println!(
        "  {}: {} added, {} errors",
        name, result.success_count, result.error_count
    );
    for line in result.first_errors(MAX_ERRORS_SHOWN) {
        println!("    - {}", line);
    }
    if result.error_count > MAX_ERRORS_SHOWN {
        println!("    ... and {} more", result.error_count - MAX_ERRORS_SHOWN);
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("Unknown log format '{}'", other)),
    }

    Ok(())
}
