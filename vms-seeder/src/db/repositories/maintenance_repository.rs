use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

use vms_types::{GroupRef, GroupRole};

use crate::db::connection::missing_tables;
use crate::db::schema::{LEGACY_TABLES, TABLES_IN_DELETE_ORDER};

/// One row reported by `PRAGMA foreign_key_check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyViolation {
    pub table: String,
    pub rowid: Option<i64>,
    pub parent: String,
}

/// What `check-db` found in a database
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseHealth {
    pub missing_tables: Vec<String>,
    pub row_counts: Vec<(&'static str, usize)>,
    pub groups_without_admin_creator: Vec<GroupRef>,
    pub foreign_key_violations: Vec<ForeignKeyViolation>,
}

impl DatabaseHealth {
    pub fn is_healthy(&self) -> bool {
        self.missing_tables.is_empty()
            && self.groups_without_admin_creator.is_empty()
            && self.foreign_key_violations.is_empty()
    }
}

/// Whole-table operations: wiping seeded data and auditing what is left
pub struct MaintenanceRepository<'a> {
    conn: &'a Connection,
}

impl<'a> MaintenanceRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Delete every seeded row, children first, and restart the id counters.
    ///
    /// Returns the number of rows deleted per table in deletion order.
    pub fn clear_seeded_tables(&self) -> Result<Vec<(&'static str, usize)>> {
        let mut deleted = Vec::with_capacity(TABLES_IN_DELETE_ORDER.len());
        for table in LEGACY_TABLES {
            if self.table_exists(table)? {
                let rows = self
                    .conn
                    .execute(&format!("DELETE FROM {}", table), [])
                    .with_context(|| format!("Failed to clear legacy table {}", table))?;
                deleted.push((table, rows));
            }
        }

        for table in TABLES_IN_DELETE_ORDER {
            let rows = self
                .conn
                .execute(&format!("DELETE FROM {}", table), [])
                .with_context(|| format!("Failed to clear {}", table))?;
            tracing::debug!("Cleared {} rows from {}", rows, table);
            deleted.push((table, rows));
        }

        self.reset_sequences()?;
        Ok(deleted)
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;
        Ok(exists)
    }

    /// Forget the AUTOINCREMENT high-water marks of the seeded tables
    fn reset_sequences(&self) -> Result<()> {
        if !self.table_exists("sqlite_sequence")? {
            return Ok(());
        }

        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM sqlite_sequence WHERE name = ?")?;
        for table in TABLES_IN_DELETE_ORDER {
            stmt.execute([table])
                .with_context(|| format!("Failed to reset id counter of {}", table))?;
        }
        Ok(())
    }

    pub fn row_count(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .with_context(|| format!("Failed to count rows in {}", table))?;
        Ok(count as usize)
    }

    /// Row counts of every seeded table, parents first
    pub fn row_counts(&self) -> Result<Vec<(&'static str, usize)>> {
        let mut counts = Vec::with_capacity(TABLES_IN_DELETE_ORDER.len());
        for table in TABLES_IN_DELETE_ORDER.iter().rev() {
            counts.push((*table, self.row_count(table)?));
        }
        Ok(counts)
    }

    /// Groups whose creator is not listed as an `admin` member
    pub fn groups_without_admin_creator(&self) -> Result<Vec<GroupRef>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.id, g.created_by_user_id FROM groups g
             WHERE NOT EXISTS (
                 SELECT 1 FROM group_members m
                 WHERE m.group_id = g.id AND m.user_id = g.created_by_user_id AND m.role = ?
             )
             ORDER BY g.id",
        )?;
        let groups = stmt
            .query_map([GroupRole::Admin.as_str()], |row| {
                Ok(GroupRef {
                    id: row.get(0)?,
                    created_by_user_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to look up group admins")?;
        Ok(groups)
    }

    /// Run every check; the remaining checks are skipped when tables are missing
    pub fn health_check(&self) -> Result<DatabaseHealth> {
        let missing_tables = missing_tables(self.conn)?;
        if !missing_tables.is_empty() {
            return Ok(DatabaseHealth {
                missing_tables,
                ..DatabaseHealth::default()
            });
        }

        Ok(DatabaseHealth {
            missing_tables,
            row_counts: self.row_counts()?,
            groups_without_admin_creator: self.groups_without_admin_creator()?,
            foreign_key_violations: self.foreign_key_violations()?,
        })
    }

    pub fn foreign_key_violations(&self) -> Result<Vec<ForeignKeyViolation>> {
        let mut stmt = self.conn.prepare("PRAGMA foreign_key_check")?;
        let violations = stmt
            .query_map([], |row| {
                Ok(ForeignKeyViolation {
                    table: row.get(0)?,
                    rowid: row.get(1)?,
                    parent: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to run foreign key check")?;
        Ok(violations)
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
                    ('A', 'a@example.com', 'x', 'Organizer'),
                    ('B', 'b@example.com', 'x', 'Volunteer');
                 INSERT INTO events (name, date, created_by_user_id) VALUES ('E', '2030-01-01', 1);
                 INSERT INTO registrations (user_id, event_id) VALUES (2, 1);
                 INSERT INTO groups (name, created_by_user_id) VALUES ('G', 2);
                 INSERT INTO group_members (group_id, user_id, role) VALUES (1, 2, 'admin');",
            )
            .unwrap();
        }
        db
    }

    #[test]
    fn test_clear_respects_foreign_keys_and_resets_ids() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        let repo = MaintenanceRepository::new(&conn);

        let deleted = repo.clear_seeded_tables().unwrap();
        assert!(deleted.contains(&("users", 2)));
        assert!(deleted.contains(&("registrations", 1)));

        for (table, count) in repo.row_counts().unwrap() {
            assert_eq!(count, 0, "{} should be empty", table);
        }

        conn.execute(
            "INSERT INTO users (name, email, password_hash, role) VALUES ('C', 'c@example.com', 'x', 'Volunteer')",
            [],
        )
        .unwrap();
        let id: i64 = conn
            .query_row("SELECT id FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(id, 1, "id counter should restart");
    }

    #[test]
    fn test_legacy_friendships_are_cleared_when_present() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        conn.execute_batch(
            "CREATE TABLE friendships (
                user_id_a INTEGER,
                user_id_b INTEGER,
                PRIMARY KEY (user_id_a, user_id_b),
                FOREIGN KEY (user_id_a) REFERENCES users (id),
                FOREIGN KEY (user_id_b) REFERENCES users (id)
             );
             INSERT INTO friendships VALUES (1, 2), (2, 1);",
        )
        .unwrap();

        let deleted = MaintenanceRepository::new(&conn)
            .clear_seeded_tables()
            .expect("Legacy rows must not block deleting users");
        assert_eq!(deleted[0], ("friendships", 2));
    }

    #[test]
    fn test_row_counts_lists_parents_first() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        let counts = MaintenanceRepository::new(&conn).row_counts().unwrap();

        assert_eq!(counts[0], ("users", 2));
        assert_eq!(counts.len(), TABLES_IN_DELETE_ORDER.len());
    }

    #[test]
    fn test_foreign_key_violations_are_reported() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        let repo = MaintenanceRepository::new(&conn);
        assert!(repo.foreign_key_violations().unwrap().is_empty());

        conn.execute_batch(
            "PRAGMA foreign_keys = OFF;
             INSERT INTO follows (follower_id, following_id) VALUES (1, 99);
             PRAGMA foreign_keys = ON;",
        )
        .unwrap();

        let violations = repo.foreign_key_violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].table, "follows");
        assert_eq!(violations[0].parent, "users");
    }

    #[test]
    fn test_seeded_fixture_is_healthy() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        let health = MaintenanceRepository::new(&conn).health_check().unwrap();

        assert!(health.is_healthy(), "{:?}", health);
        assert_eq!(health.row_counts[0], ("users", 2));
    }

    #[test]
    fn test_creator_listed_as_member_is_reported() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        conn.execute_batch(
            "INSERT INTO groups (name, created_by_user_id) VALUES ('H', 1);
             INSERT INTO group_members (group_id, user_id, role) VALUES (2, 1, 'member');
             INSERT INTO groups (name, created_by_user_id) VALUES ('I', 1);",
        )
        .unwrap();

        let repo = MaintenanceRepository::new(&conn);
        let expected = vec![
            GroupRef { id: 2, created_by_user_id: 1 },
            GroupRef { id: 3, created_by_user_id: 1 },
        ];
        assert_eq!(repo.groups_without_admin_creator().unwrap(), expected);

        let health = repo.health_check().unwrap();
        assert!(!health.is_healthy());
        assert!(health.foreign_key_violations.is_empty());
    }

    #[test]
    fn test_foreign_key_violation_makes_database_unhealthy() {
        let db = setup_test_db();
        let conn = db.connection().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = OFF;
             INSERT INTO registrations (user_id, event_id) VALUES (2, 77);
             PRAGMA foreign_keys = ON;",
        )
        .unwrap();

        let health = MaintenanceRepository::new(&conn).health_check().unwrap();
        assert!(!health.is_healthy());
        assert!(health.groups_without_admin_creator.is_empty());
        assert_eq!(health.foreign_key_violations.len(), 1);
        assert_eq!(health.foreign_key_violations[0].parent, "events");
    }

    #[test]
    fn test_missing_tables_short_circuit_the_check() {
        let db = Database::in_memory().expect("Failed to create test database");
        let conn = db.connection().unwrap();
        conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT);")
            .unwrap();

        let health = MaintenanceRepository::new(&conn).health_check().unwrap();
        assert!(!health.is_healthy());
        assert_eq!(health.missing_tables.len(), TABLES_IN_DELETE_ORDER.len() - 1);
        assert!(health.row_counts.is_empty());
    }
}
