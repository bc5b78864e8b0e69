use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use vms_types::{NewUser, RowId, UserRole};

pub struct UserRepository<'a> {
    conn: &'a Connection,
}

impl<'a> UserRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert users in one prepared statement, returning the number of rows written
    pub fn insert_many(&self, users: &[NewUser]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO users (name, email, password_hash, role, profile_image_url)
             VALUES (?, ?, ?, ?, ?)",
        )?;

        let mut inserted = 0;
        for user in users {
            inserted += stmt
                .execute(params![
                    user.name,
                    user.email,
                    user.password_hash,
                    user.role.as_str(),
                    user.profile_image_url,
                ])
                .with_context(|| format!("Failed to insert user {}", user.email))?;
        }
        Ok(inserted)
    }

    /// Ids of every user holding `role`, oldest first
    pub fn ids_by_role(&self, role: UserRole) -> Result<Vec<RowId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM users WHERE role = ? ORDER BY id")?;

        let ids = stmt
            .query_map([role.as_str()], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read user ids")?;

        Ok(ids)
    }

    /// Ids of every user regardless of role
    pub fn all_ids(&self) -> Result<Vec<RowId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM users ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read user ids")?;
        Ok(ids)
    }

    /// Attach skills to a user, ignoring ones the user already has
    pub fn add_skills(&self, user_id: RowId, skills: &[&str]) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT OR IGNORE INTO user_skills (user_id, skill) VALUES (?, ?)")?;

        let mut inserted = 0;
        for skill in skills {
            inserted += stmt
                .execute(params![user_id, skill])
                .with_context(|| format!("Failed to add skill {} to user {}", skill, user_id))?;
        }
        Ok(inserted)
    }
}
