use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SeedPlan;
use crate::db::repositories::MaintenanceRepository;
use crate::db::Database;
use crate::password::PasswordHasher;
use crate::report::SeedReport;
use crate::seed::{run_seeder, SeedContext, Seeder};
use crate::seeds::default_seeders;

/// Knobs that change how a run behaves, not what it generates
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Roll back instead of committing
    pub dry_run: bool,
    /// Print a status line per seeder
    pub progress: bool,
    /// Day event dates are counted from; today when absent
    pub today: Option<NaiveDate>,
}

/// Wipe the seeded tables and refill them inside a single transaction.
///
/// Any error rolls the whole transaction back, leaving the previous data intact.
pub fn seed_database(db: &Database, plan: &SeedPlan, options: RunOptions) -> Result<SeedReport> {
    seed_database_with(db, plan, options, &default_seeders())
}

/// Same as [`seed_database`] with an explicit seeder list
pub fn seed_database_with(
    db: &Database,
    plan: &SeedPlan,
    options: RunOptions,
    seeders: &[Box<dyn Seeder>],
) -> Result<SeedReport> {
    plan.validate()?;

    let rng_seed = plan.rng_seed.unwrap_or_else(|| rand::rng().random());
    let mut report = SeedReport::new(rng_seed);

    let mut conn = db.connection()?;
    let tx = conn
        .transaction()
        .context("Failed to begin seeding transaction")?;

    let mut ctx = SeedContext {
        conn: &tx,
        plan,
        hasher: PasswordHasher::new(plan.bcrypt_cost),
        rng: StdRng::seed_from_u64(rng_seed),
        today: options.today.unwrap_or_else(|| Local::now().date_naive()),
    };

    match fill(&mut ctx, seeders, options.progress, &mut report) {
        Ok(()) => {
            drop(ctx);
            if options.dry_run {
                tx.rollback().context("Failed to roll back dry run")?;
                tracing::info!("Dry run finished, transaction rolled back");
            } else {
                tx.commit().context("Failed to commit seeded data")?;
                report.committed = true;
                tracing::info!("Committed {} seeded rows", report.total_rows());
            }
            Ok(report)
        }
        Err(e) => {
            drop(ctx);
            tracing::error!("Seeding failed, rolling back: {:#}", e);
            tx.rollback().context("Failed to roll back after seeding error")?;
            Err(e)
        }
    }
}

fn fill(
    ctx: &mut SeedContext<'_>,
    seeders: &[Box<dyn Seeder>],
    progress: bool,
    report: &mut SeedReport,
) -> Result<()> {
    tracing::info!("Clearing old data");
    report.record_cleared(MaintenanceRepository::new(ctx.conn).clear_seeded_tables()?);

    for seeder in seeders {
        let (rows, elapsed) = run_seeder(seeder.as_ref(), ctx, progress)?;
        report.record_step(seeder.name(), rows, elapsed.as_millis());
    }
    Ok(())
}
