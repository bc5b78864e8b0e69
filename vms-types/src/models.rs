use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{GroupRole, InvitationStatus, InvitationType, UserRole};

/// Identifiers are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` rowids
pub type RowId = i64;

/// A user row before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    /// Stored as ISO `YYYY-MM-DD`
    pub date: NaiveDate,
    pub description: Option<String>,
    pub location_address: Option<String>,
    pub image_url: Option<String>,
    pub created_by_user_id: RowId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_by_user_id: RowId,
}

/// A group id together with its creator, used to pick invitation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: RowId,
    pub created_by_user_id: RowId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: RowId,
    pub user_id: RowId,
    pub role: GroupRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvitation {
    pub sender_id: RowId,
    pub receiver_id: RowId,
    #[serde(rename = "type")]
    pub kind: InvitationType,
    pub reference_id: RowId,
    pub status: InvitationStatus,
}

impl NewInvitation {
    /// Invitations addressed to oneself are never valid
    pub fn is_self_addressed(&self) -> bool {
        self.sender_id == self.receiver_id
    }
}
