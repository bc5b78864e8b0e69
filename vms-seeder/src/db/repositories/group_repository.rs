use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use vms_types::{GroupMember, GroupRef, GroupRole, NewGroup, RowId};

pub struct GroupRepository<'a> {
    conn: &'a Connection,
}

impl<'a> GroupRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert_many(&self, groups: &[NewGroup]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO groups (name, description, image_url, created_by_user_id)
             VALUES (?, ?, ?, ?)",
        )?;

        let mut inserted = 0;
        for group in groups {
            inserted += stmt
                .execute(params![
                    group.name,
                    group.description,
                    group.image_url,
                    group.created_by_user_id,
                ])
                .with_context(|| format!("Failed to insert group {}", group.name))?;
        }
        Ok(inserted)
    }

    /// Every group with its creator, oldest first
    pub fn all_refs(&self) -> Result<Vec<GroupRef>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, created_by_user_id FROM groups ORDER BY id")?;
        let groups = stmt
            .query_map([], |row| {
                Ok(GroupRef {
                    id: row.get(0)?,
                    created_by_user_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read groups")?;
        Ok(groups)
    }

    /// Add members, leaving existing memberships untouched
    pub fn add_members(&self, members: &[GroupMember]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO group_members (group_id, user_id, role) VALUES (?, ?, ?)",
        )?;

        let mut inserted = 0;
        for member in members {
            inserted += stmt
                .execute(params![member.group_id, member.user_id, member.role.as_str()])
                .with_context(|| {
                    format!(
                        "Failed to add user {} to group {}",
                        member.user_id, member.group_id
                    )
                })?;
        }
        Ok(inserted)
    }

    /// Members of a group, admins first
    pub fn members_of(&self, group_id: RowId) -> Result<Vec<GroupMember>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, role FROM group_members WHERE group_id = ?
             ORDER BY CASE role WHEN 'admin' THEN 0 ELSE 1 END, user_id",
        )?;

        let members = stmt
            .query_map([group_id], |row| {
                let role: String = row.get(1)?;
                Ok(GroupMember {
                    group_id,
                    user_id: row.get(0)?,
                    role: GroupRole::parse(&role).unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }
}
