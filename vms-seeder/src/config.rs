use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SeedError, SeedResult};
use crate::seeds::skills::SKILL_LIST;

/// Default location of the backend database, relative to the repository root
pub const DEFAULT_DATABASE_PATH: &str = "backend/vms.db";

/// Password every seeded account can log in with
pub const DEFAULT_PASSWORD: &str = "pass123";

/// Cost used by the Go backend (`bcrypt.DefaultCost`)
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub path: String,
}

/// Inclusive range of how many related rows one parent row gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// How much data to generate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedPlan {
    pub volunteers: usize,
    pub organizers: usize,
    pub events: usize,
    pub groups: usize,
    pub default_password: String,
    pub bcrypt_cost: u32,
    /// Fixed RNG seed; a fresh one is drawn from the OS when absent
    pub rng_seed: Option<u64>,
    pub registrations_per_volunteer: CountRange,
    pub follows_per_user: CountRange,
    pub skills_per_volunteer: CountRange,
    /// Members added to a group on top of its creator
    pub extra_members_per_group: CountRange,
    pub invites_per_group: CountRange,
    pub join_requests_per_group: CountRange,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            volunteers: 50,
            organizers: 5,
            events: 20,
            groups: 8,
            default_password: DEFAULT_PASSWORD.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            rng_seed: None,
            registrations_per_volunteer: CountRange::new(0, 3),
            follows_per_user: CountRange::new(0, 5),
            skills_per_volunteer: CountRange::new(1, 4),
            extra_members_per_group: CountRange::new(2, 8),
            invites_per_group: CountRange::new(0, 3),
            join_requests_per_group: CountRange::new(0, 2),
        }
    }
}

impl SeedPlan {
    pub fn validate(&self) -> SeedResult<()> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(SeedError::InvalidPlan(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }
        if self.default_password.is_empty() {
            return Err(SeedError::InvalidPlan(
                "default password must not be empty".to_string(),
            ));
        }

        for (name, range) in self.ranges() {
            if range.min > range.max {
                return Err(SeedError::InvalidPlan(format!(
                    "{}: min {} is greater than max {}",
                    name, range.min, range.max
                )));
            }
        }

        if self.skills_per_volunteer.max > SKILL_LIST.len() {
            return Err(SeedError::InvalidPlan(format!(
                "skills_per_volunteer: at most {} skills exist",
                SKILL_LIST.len()
            )));
        }
        Ok(())
    }

    /// Every per-parent range, keyed by its settings name
    pub fn ranges(&self) -> [(&'static str, CountRange); 6] {
        [
            ("registrations_per_volunteer", self.registrations_per_volunteer),
            ("follows_per_user", self.follows_per_user),
            ("skills_per_volunteer", self.skills_per_volunteer),
            ("extra_members_per_group", self.extra_members_per_group),
            ("invites_per_group", self.invites_per_group),
            ("join_requests_per_group", self.join_requests_per_group),
        ]
    }

    /// Total number of user rows this plan creates
    pub fn total_users(&self) -> usize {
        self.volunteers + self.organizers
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: Database,
    #[serde(default)]
    pub seed: SeedPlan,
}

impl Settings {
    /// Load settings from defaults, `seed.toml` (or `config_file`), then the environment
    pub fn new(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().set_default("database.path", DEFAULT_DATABASE_PATH)?;

        // Range bounds merge key by key, so a file may set only `min` or `max`
        for (name, range) in SeedPlan::default().ranges() {
            builder = builder
                .set_default(format!("seed.{}.min", name), range.min as i64)?
                .set_default(format!("seed.{}.max", name), range.max as i64)?;
        }

        // 1. Settings file: an explicit one must exist, the implicit one is optional
        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                let current_dir_path = PathBuf::from("seed.toml");
                if current_dir_path.exists() {
                    builder = builder.add_source(File::from(current_dir_path).required(false));
                }
            }
        }

        // 2. Override with environment variables
        if let Ok(db_path) = std::env::var("DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(seed) = std::env::var("SEED_RNG") {
            builder = builder.set_override("seed.rng_seed", seed)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
