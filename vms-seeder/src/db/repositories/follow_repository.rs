use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use vms_types::RowId;

pub struct FollowRepository<'a> {
    conn: &'a Connection,
}

impl<'a> FollowRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert follow edges, skipping ones that already exist
    pub fn follow_many(&self, edges: &[(RowId, RowId)]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO follows (follower_id, following_id) VALUES (?, ?)",
        )?;

        let mut inserted = 0;
        for (follower_id, following_id) in edges {
            inserted += stmt
                .execute(params![follower_id, following_id])
                .with_context(|| {
                    format!("Failed to make user {} follow {}", follower_id, following_id)
                })?;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup_test_db() -> Database {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        {
            let conn = db.connection().unwrap();
            conn.execute_batch(
                "INSERT INTO users (name, email, password_hash, role) VALUES
                    ('A', 'a@example.com', 'x', 'Volunteer'),
                    ('B', 'b@example.com', 'x', 'Volunteer'),
                    ('C', 'c@example.com', 'x', 'Organizer');",
            )
            .unwrap();
        }
        db
    }

    fn edges(conn: &Connection) -> Vec<(RowId, RowId)> {
        let mut stmt = conn
            .prepare("SELECT follower_id, following_id FROM follows ORDER BY follower_id, following_id")
            .unwrap();
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_follows_are_one_directional() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        let repo = FollowRepository::new(&conn);

        repo.follow_many(&[(1, 2)]).unwrap();

        assert_eq!(edges(&conn), vec![(1, 2)]);
    }

    #[test]
    fn test_follow_many_skips_existing_edges() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        let repo = FollowRepository::new(&conn);

        assert_eq!(repo.follow_many(&[(1, 3), (2, 3), (1, 3)]).unwrap(), 2);
        assert_eq!(repo.follow_many(&[(2, 3)]).unwrap(), 0);
        assert_eq!(edges(&conn), vec![(1, 3), (2, 3)]);
    }
}
