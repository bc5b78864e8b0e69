use serde::{Deserialize, Serialize};

/// Account role stored in `users.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Volunteer,
    Organizer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Volunteer => "Volunteer",
            UserRole::Organizer => "Organizer",
        }
    }
}

/// Role of a user inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Admin,
    #[default]
    Member,
}

impl GroupRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Admin => "admin",
            GroupRole::Member => "member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(GroupRole::Admin),
            "member" => Some(GroupRole::Member),
            _ => None,
        }
    }
}

/// What an invitation row refers to.
///
/// Both kinds carry the group id in `reference_id`; they differ in direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationType {
    /// A group member invites someone who is not in the group yet
    GroupInvite,
    /// A non-member asks the group creator to let them in
    JoinRequest,
}

impl InvitationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationType::GroupInvite => "group_invite",
            InvitationType::JoinRequest => "join_request",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_keeps_backend_casing() {
        // The backend compares roles verbatim
        assert_eq!(UserRole::Volunteer.as_str(), "Volunteer");
        assert_eq!(UserRole::Organizer.as_str(), "Organizer");
        let json = serde_json::to_string(&UserRole::Organizer).unwrap();
        assert_eq!(json, "\"Organizer\"");
    }

    #[test]
    fn test_group_role_parse() {
        assert_eq!(GroupRole::parse("ADMIN"), Some(GroupRole::Admin));
        assert_eq!(GroupRole::parse("member"), Some(GroupRole::Member));
        assert_eq!(GroupRole::parse("owner"), None);
        assert_eq!(GroupRole::default(), GroupRole::Member);
    }

    #[test]
    fn test_invitation_type_strings() {
        assert_eq!(InvitationType::GroupInvite.as_str(), "group_invite");
        let json = serde_json::to_string(&InvitationType::JoinRequest).unwrap();
        assert_eq!(json, "\"join_request\"");
    }

    #[test]
    fn test_invitation_status_default_is_pending() {
        assert_eq!(InvitationStatus::default(), InvitationStatus::Pending);
        assert_eq!(InvitationStatus::Declined.as_str(), "declined");
    }
}
