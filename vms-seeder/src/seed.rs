use anyhow::Result;
use chrono::NaiveDate;
use colored::*;
use rand::rngs::StdRng;
use rusqlite::Connection;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::config::SeedPlan;
use crate::password::PasswordHasher;

const STATUS_COLUMN: usize = 60;

/// Everything a seeder needs: the open transaction, the plan and the RNG
pub struct SeedContext<'a> {
    pub conn: &'a Connection,
    pub plan: &'a SeedPlan,
    pub hasher: PasswordHasher,
    pub rng: StdRng,
    /// Day event dates are counted from
    pub today: NaiveDate,
}

/// One step of the run; fills one table from what earlier steps wrote
pub trait Seeder {
    /// Label shown in progress output and the summary
    fn name(&self) -> &'static str;

    /// Insert rows, returning how many were actually written
    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize>;
}

/// `Seeding <name> ....` padded to the status column, measured without colour codes
fn status_prefix(name: &str) -> String {
    let visible_len = "Seeding ".len() + name.chars().count();
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(visible_len));
    format!("Seeding {}{}", name.bold(), dots)
}

/// Run one seeder, printing a `Seeding <name> ..... done (elapsed)` line when `progress` is set
pub fn run_seeder<S: Seeder + ?Sized>(
    seeder: &S,
    ctx: &mut SeedContext<'_>,
    progress: bool,
) -> Result<(usize, Duration)> {
    if progress {
        print!("{} ", status_prefix(seeder.name()));
        io::stdout().flush()?;
    }

    let start = Instant::now();
    match seeder.seed(ctx) {
        Ok(rows) => {
            let elapsed = start.elapsed();
            if progress {
                let time_str = format!("({:.2?})", elapsed).dimmed();
                println!("{} {} rows {}", "done".green(), rows, time_str);
            }
            tracing::debug!("Seeded {} rows into {} in {:.2?}", rows, seeder.name(), elapsed);
            Ok((rows, elapsed))
        }
        Err(e) => {
            if progress {
                println!("{}", "failed".red());
            }
            Err(e.context(format!("Seeding {} failed", seeder.name())))
        }
    }
}
