use thiserror::Error;

/// Failures the seeder detects on its own.
///
/// Database and I/O errors travel as `anyhow::Error` with context attached;
/// these variants can be recovered with `downcast_ref`.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database schema is incomplete, missing tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    #[error("Invalid seed plan: {0}")]
    InvalidPlan(String),
}

pub type SeedResult<T> = Result<T, SeedError>;
