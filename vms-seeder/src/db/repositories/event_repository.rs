use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use vms_types::{NewEvent, RowId};

pub struct EventRepository<'a> {
    conn: &'a Connection,
}

impl<'a> EventRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert_many(&self, events: &[NewEvent]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO events (name, date, description, location_address, image_url, created_by_user_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )?;

        let mut inserted = 0;
        for event in events {
            inserted += stmt
                .execute(params![
                    event.name,
                    event.date.format("%Y-%m-%d").to_string(),
                    event.description,
                    event.location_address,
                    event.image_url,
                    event.created_by_user_id,
                ])
                .with_context(|| format!("Failed to insert event {}", event.name))?;
        }
        Ok(inserted)
    }

    pub fn all_ids(&self) -> Result<Vec<RowId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM events ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read event ids")?;
        Ok(ids)
    }

    /// Register users for events; pairs that already exist are skipped
    pub fn register_many(&self, registrations: &[(RowId, RowId)]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO registrations (user_id, event_id) VALUES (?, ?)",
        )?;

        let mut inserted = 0;
        for (user_id, event_id) in registrations {
            inserted += stmt
                .execute(params![user_id, event_id])
                .with_context(|| {
                    format!("Failed to register user {} for event {}", user_id, event_id)
                })?;
        }
        Ok(inserted)
    }
}
