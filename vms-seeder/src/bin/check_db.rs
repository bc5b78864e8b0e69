// Quick diagnostic to check the state of a seeded database
use anyhow::Context;
use clap::Parser;
use colored::*;

use vms_seeder::config::Settings;
use vms_seeder::db::repositories::{DatabaseHealth, MaintenanceRepository};
use vms_seeder::db::Database;

#[derive(Parser, Debug)]
#[command(name = "check-db")]
#[command(about = "Report row counts and foreign key problems in the VMS database")]
struct Args {
    /// Path to the SQLite database file [env: DATABASE_PATH]
    #[arg(short, long)]
    database: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let path = match args.database {
        Some(path) => path,
        None => Settings::new(None).context("Failed to load settings")?.database.path,
    };
    if !std::path::Path::new(&path).exists() {
        anyhow::bail!("Database file not found: {}", path);
    }

    let db = Database::new(&path)?;
    let conn = db.connection()?;

    println!("=== Database Diagnostic: {} ===\n", path);

    let health = MaintenanceRepository::new(&conn).health_check()?;
    print_health(&health);

    if !health.is_healthy() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_health(health: &DatabaseHealth) {
    if !health.missing_tables.is_empty() {
        println!("{} {}", "Missing tables:".red(), health.missing_tables.join(", "));
        return;
    }

    println!("=== Row counts ===");
    for (table, count) in &health.row_counts {
        println!("  {:<16} {:>6}", table, count);
    }

    // Every group should list its creator as admin
    println!("\n=== Groups without their creator as admin ===");
    for group in &health.groups_without_admin_creator {
        println!("  group {} (creator {})", group.id, group.created_by_user_id);
    }
    println!(
        "Groups missing an admin creator: {}",
        health.groups_without_admin_creator.len()
    );

    println!("\n=== Foreign key check ===");
    let violations = &health.foreign_key_violations;
    if violations.is_empty() {
        println!("{}", "No foreign key violations".green());
    } else {
        for (i, v) in violations.iter().enumerate() {
            let rowid = v
                .rowid
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("  {}. {} row {} -> missing {}", i + 1, v.table, rowid, v.parent);
        }
        println!(
            "{}",
            format!("{} foreign key violations", violations.len()).red()
        );
    }
}
