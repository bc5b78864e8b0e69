use colored::*;
use serde::Serialize;

/// Rows written by one seeder
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub table: &'static str,
    pub rows: usize,
    pub elapsed_ms: u128,
}

/// Summary of one seeding run
#[derive(Debug, Default, Serialize)]
pub struct SeedReport {
    /// Seed that reproduces this run with `--seed`
    pub rng_seed: u64,
    /// Rows removed per table before seeding
    pub cleared: Vec<(&'static str, usize)>,
    pub steps: Vec<StepReport>,
    /// False for dry runs
    pub committed: bool,
}

impl SeedReport {
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::default()
        }
    }

    pub fn record_cleared(&mut self, cleared: Vec<(&'static str, usize)>) {
        self.cleared = cleared;
    }

    pub fn record_step(&mut self, table: &'static str, rows: usize, elapsed_ms: u128) {
        self.steps.push(StepReport {
            table,
            rows,
            elapsed_ms,
        });
    }

    /// Rows written by the step that filled `table`
    pub fn rows_for(&self, table: &str) -> Option<usize> {
        self.steps.iter().find(|s| s.table == table).map(|s| s.rows)
    }

    pub fn total_rows(&self) -> usize {
        self.steps.iter().map(|s| s.rows).sum()
    }

    pub fn total_cleared(&self) -> usize {
        self.cleared.iter().map(|(_, rows)| rows).sum()
    }

    /// Print the summary table to stdout
    pub fn display(&self) {
        println!();
        println!("Seed Summary");
        println!("============");
        println!();
        println!("Rows cleared: {}", self.total_cleared());
        for step in &self.steps {
            println!("{:<16} {:>6}", step.table, step.rows);
        }
        println!("{:<16} {:>6}", "total", self.total_rows());
        println!();
        println!("RNG seed: {}", self.rng_seed);

        println!();
        if self.committed {
            println!("{}", "Database successfully seeded with random data!".green());
        } else {
            println!(
                "{}",
                "This was a dry run - the transaction was rolled back.".yellow()
            );
        }
    }
}
