//! padmap - inspect and edit gamepad mapping databases
//!
//! Developer tool around the padmap library: lists stored maps, records new
//! ones from `destination=origin` bindings, and replays JSON snapshots through
//! classification and origin estimation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padmap::config::PadmapConfig;
use padmap::input::{classify_with, estimate_origin, Gamepad, MapSource, RawDeviceState};
use padmap::mapping::{Database, Destination, Origin};
use padmap::paths::AppPaths;
use padmap::persistence::{load_database, normalize_database, save_database};

/// padmap - manage persistent gamepad button maps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the mapping database (overrides the configuration)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List devices and bindings stored in the database
    Inspect,

    /// Rewrite the database in canonical form (sorted lines and maps)
    Normalize,

    /// Store a map for a device, replacing any existing one
    Bind {
        /// Device identifier as reported by the device
        #[arg(long)]
        id: String,

        /// Bindings as destination=origin, e.g. a=b0 leftleft=-a0
        #[arg(required = true)]
        bindings: Vec<String>,
    },

    /// Remove a device from the database
    Unbind {
        /// Device identifier as reported by the device
        #[arg(long)]
        id: String,
    },

    /// Classify a JSON snapshot and print control readings
    Classify {
        /// JSON array of device states (null for empty slots)
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Estimate which input is being actuated on each live device
    Estimate {
        /// JSON array of device states (null for empty slots)
        #[arg(long)]
        snapshot: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.log_json)?;

    let paths = AppPaths::detect();
    info!(
        "{} mode, data directory: {}",
        if paths.is_portable { "Portable" } else { "Installed" },
        paths.base_dir().display()
    );
    let config = load_config(args.config.as_deref(), &paths)?;
    let db_path = args
        .db
        .clone()
        .or_else(|| config.database.clone())
        .unwrap_or_else(|| paths.database.clone());
    info!("Database: {}", db_path.display());

    match args.command {
        Command::Inspect => inspect(&db_path),
        Command::Normalize => normalize(&db_path),
        Command::Bind { id, bindings } => bind(&db_path, &id, &bindings),
        Command::Unbind { id } => unbind(&db_path, &id),
        Command::Classify { snapshot } => classify_snapshot(&db_path, &snapshot, &config),
        Command::Estimate { snapshot } => estimate_snapshot(&snapshot, &config),
    }
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

/// Explicit config must exist; the default location is optional
fn load_config(explicit: Option<&Path>, paths: &AppPaths) -> Result<PadmapConfig> {
    match explicit {
        Some(path) => PadmapConfig::load(path),
        None if paths.config.exists() => PadmapConfig::load(&paths.config),
        None => {
            debug!("No config at {}, using defaults", paths.config.display());
            Ok(PadmapConfig::default())
        }
    }
}

/// Parse a `destination=origin` CLI binding
fn parse_binding(binding: &str) -> Result<(Destination, Origin)> {
    let (dest, origin) = binding
        .split_once('=')
        .with_context(|| format!("Binding must look like destination=origin: {}", binding))?;

    let dest = dest
        .trim()
        .parse::<Destination>()
        .with_context(|| format!("Invalid binding: {}", binding))?;
    let origin = origin
        .trim()
        .parse::<Origin>()
        .with_context(|| format!("Invalid binding: {}", binding))?;

    Ok((dest, origin))
}

fn read_snapshot(path: &Path) -> Result<Vec<Option<RawDeviceState>>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

fn inspect(db_path: &Path) -> Result<()> {
    let report = load_database(db_path)?;
    let db = &report.database;

    println!("\n{}", "=== Mapping Database ===".bold().cyan());
    println!("  File: {}", db_path.display());
    println!("  Devices: {}", db.len().to_string().green());
    if report.dropped_lines > 0 {
        println!(
            "  Dropped lines: {}",
            report.dropped_lines.to_string().yellow()
        );
    }

    for (id, entry) in db.iter() {
        println!("\n{}", id.bold());
        if entry.map().is_empty() {
            println!("  {}", "(no bindings)".dimmed());
        }
        for (dest, origin) in entry.map().iter() {
            println!("  {:<14} {}", dest.to_string(), origin.to_string().green());
        }
    }

    Ok(())
}

fn normalize(db_path: &Path) -> Result<()> {
    let report = normalize_database(db_path)?;
    println!(
        "Normalized {} device(s), dropped {} line(s)",
        report.database.len(),
        report.dropped_lines
    );
    Ok(())
}

fn bind(db_path: &Path, id: &str, bindings: &[String]) -> Result<()> {
    let parsed = bindings
        .iter()
        .map(|b| parse_binding(b))
        .collect::<Result<Vec<_>>>()?;

    let db = load_database(db_path)?.database.with_mapping(id, parsed);
    save_database(db_path, &db)?;

    println!(
        "{} {} -> {}",
        "Bound".green(),
        id.bold(),
        db.get_encoded(id).unwrap_or_default()
    );
    Ok(())
}

fn unbind(db_path: &Path, id: &str) -> Result<()> {
    let db = load_database(db_path)?.database;
    if !db.contains(id) {
        anyhow::bail!("No mapping stored for \"{}\"", id);
    }

    save_database(db_path, &db.without(id))?;
    println!("{} {}", "Removed".yellow(), id.bold());
    Ok(())
}

fn classify_snapshot(db_path: &Path, snapshot_path: &Path, config: &PadmapConfig) -> Result<()> {
    let db: Database = load_database(db_path)?.database;
    let snapshot = read_snapshot(snapshot_path)?;
    let classified = classify_with(&snapshot, &db, config.thresholds());

    println!("\n{}", "=== Known Devices ===".bold().cyan());
    if classified.known.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for pad in &classified.known {
        print_gamepad(pad);
    }

    println!("\n{}", "=== Unknown Devices ===".bold().cyan());
    if classified.unknown.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for pad in &classified.unknown {
        println!("  [{}] {}", pad.index(), pad.id().yellow());
    }

    Ok(())
}

fn print_gamepad(pad: &Gamepad<'_>) {
    let source = match pad.map_source() {
        MapSource::Database => "database",
        MapSource::Layout => "standard layout",
        MapSource::Preview => "preview",
    };
    println!("  [{}] {} ({})", pad.index(), pad.id().bold(), source);
    println!(
        "      left  ({:+.2}, {:+.2})  right ({:+.2}, {:+.2})",
        pad.left_x(),
        pad.left_y(),
        pad.right_x(),
        pad.right_y()
    );
    println!(
        "      triggers L {:.2} R {:.2}  dpad ({:+}, {:+})",
        pad.left_trigger(),
        pad.right_trigger(),
        pad.dpad_x(),
        pad.dpad_y()
    );

    let pressed: Vec<&str> = pad
        .readings()
        .iter()
        .filter(|r| r.pressed)
        .map(|r| r.destination.as_str())
        .collect();
    if !pressed.is_empty() {
        println!("      pressed: {}", pressed.join(" ").green());
    }
}

fn estimate_snapshot(snapshot_path: &Path, config: &PadmapConfig) -> Result<()> {
    let snapshot = read_snapshot(snapshot_path)?;
    let min_confidence = config.thresholds.detection;

    for state in snapshot.iter().flatten().filter(|s| s.is_live()) {
        match estimate_origin(state, min_confidence) {
            Some(detection) => println!(
                "  [{}] {}: {} (confidence {:.2})",
                state.index,
                state.id,
                detection.origin.to_string().green(),
                detection.confidence
            ),
            None => println!("  [{}] {}: {}", state.index, state.id, "no input detected".dimmed()),
        }
    }

    Ok(())
}
