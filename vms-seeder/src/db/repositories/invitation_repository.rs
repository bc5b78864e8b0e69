use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use vms_types::NewInvitation;

pub struct InvitationRepository<'a> {
    conn: &'a Connection,
}

impl<'a> InvitationRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert invitations; a repeated (sender, receiver, type, reference) tuple is ignored
    pub fn insert_many(&self, invitations: &[NewInvitation]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO invitations (sender_id, receiver_id, type, reference_id, status)
             VALUES (?, ?, ?, ?, ?)",
        )?;

        let mut inserted = 0;
        for invitation in invitations {
            inserted += stmt
                .execute(params![
                    invitation.sender_id,
                    invitation.receiver_id,
                    invitation.kind.as_str(),
                    invitation.reference_id,
                    invitation.status.as_str(),
                ])
                .with_context(|| {
                    format!(
                        "Failed to insert {} from user {} to user {}",
                        invitation.kind.as_str(),
                        invitation.sender_id,
                        invitation.receiver_id
                    )
                })?;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use vms_types::{InvitationStatus, InvitationType};

    #[test]
    fn test_duplicate_invitations_are_ignored() {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        let conn = db.connection().unwrap();
        conn.execute_batch(
            "INSERT INTO users (name, email, password_hash, role) VALUES
                ('A', 'a@example.com', 'x', 'Volunteer'),
                ('B', 'b@example.com', 'x', 'Volunteer');",
        )
        .unwrap();

        let repo = InvitationRepository::new(&conn);
        let invite = NewInvitation {
            sender_id: 1,
            receiver_id: 2,
            kind: InvitationType::GroupInvite,
            reference_id: 1,
            status: InvitationStatus::Pending,
        };
        let request = NewInvitation {
            sender_id: 2,
            receiver_id: 1,
            kind: InvitationType::JoinRequest,
            ..invite
        };

        assert_eq!(repo.insert_many(&[invite, invite, request]).unwrap(), 2);
        let mut stmt = conn
            .prepare("SELECT type FROM invitations ORDER BY id")
            .unwrap();
        let kinds: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(kinds, vec!["group_invite", "join_request"]);
    }
}
