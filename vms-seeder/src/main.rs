use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vms_seeder::config::Settings;
use vms_seeder::db::Database;
use vms_seeder::{seed_database, RunOptions};

/// VMS Database Seeder
///
/// Replaces the rows of the volunteer-management database with random
/// volunteers, organizers, events, registrations, follows, skills, groups
/// and invitations. Run with no arguments to seed `backend/vms.db`.
#[derive(Parser, Debug)]
#[command(name = "vms-seed")]
#[command(about = "Fill the VMS database with synthetic demo data", long_about = None)]
struct Args {
    /// Path to the SQLite database file [env: DATABASE_PATH]
    #[arg(short, long)]
    database: Option<String>,

    /// Settings file (defaults to ./seed.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of volunteer accounts
    #[arg(long)]
    volunteers: Option<usize>,

    /// Number of organizer accounts
    #[arg(long)]
    organizers: Option<usize>,

    /// Number of events
    #[arg(long)]
    events: Option<usize>,

    /// Number of groups
    #[arg(long)]
    groups: Option<usize>,

    /// RNG seed for a reproducible run [env: SEED_RNG]
    #[arg(long)]
    seed: Option<u64>,

    /// bcrypt cost for seeded passwords (4-31)
    #[arg(long)]
    bcrypt_cost: Option<u32>,

    /// Run every step, then roll the transaction back
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Create missing tables before seeding
    #[arg(long)]
    bootstrap_schema: bool,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Command line flags win over the settings file and the environment
    fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.database {
            settings.database.path = path.clone();
        }
        let plan = &mut settings.seed;
        if let Some(n) = self.volunteers {
            plan.volunteers = n;
        }
        if let Some(n) = self.organizers {
            plan.organizers = n;
        }
        if let Some(n) = self.events {
            plan.events = n;
        }
        if let Some(n) = self.groups {
            plan.groups = n;
        }
        if let Some(seed) = self.seed {
            plan.rng_seed = Some(seed);
        }
        if let Some(cost) = self.bcrypt_cost {
            plan.bcrypt_cost = cost;
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vms_seeder=info,vms_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut settings = Settings::new(args.config.as_deref()).context("Failed to load settings")?;
    args.apply(&mut settings);

    let path = settings.database.path.as_str();
    if !args.json {
        println!("Connecting to database at {}...", path);
    }

    // SQLite would silently create an empty file; only allow that when bootstrapping
    let in_memory = path.trim().eq_ignore_ascii_case(":memory:");
    if !args.bootstrap_schema && !in_memory && !Path::new(path).exists() {
        anyhow::bail!("Database file not found: {}", path);
    }

    let db = Database::new(path).context("Failed to open database connection")?;
    if args.bootstrap_schema {
        db.initialize()?;
        tracing::info!("Missing tables created from the reference schema");
    }
    db.validate_schema()?;

    let report = seed_database(
        &db,
        &settings.seed,
        RunOptions {
            dry_run: args.dry_run,
            progress: !args.json,
            today: None,
        },
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.display();
        println!("Database connection closed.");
    }

    Ok(())
}
