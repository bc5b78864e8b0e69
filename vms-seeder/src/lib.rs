// Library exports for vms-seeder
// The binaries and integration tests drive the seeder through these modules

pub mod config;
pub mod db;
pub mod error;
pub mod fakes;
pub mod password;
pub mod report;
pub mod runner;
pub mod seed;
pub mod seeds;

pub use error::SeedError;
pub use report::SeedReport;
pub use runner::{seed_database, seed_database_with, RunOptions};
