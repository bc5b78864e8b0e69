/// Reference copy of the VMS backend schema.
///
/// The backend owns these tables; the seeder only creates them when asked to
/// bootstrap a fresh database, and tests use it to build in-memory fixtures.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    profile_image_url TEXT
);

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date TEXT NOT NULL,
    description TEXT,
    location_address TEXT,
    image_url TEXT,
    created_by_user_id INTEGER,
    FOREIGN KEY (created_by_user_id) REFERENCES users (id)
);

-- Event registrations (volunteer signs up for event)
CREATE TABLE IF NOT EXISTS registrations (
    user_id INTEGER,
    event_id INTEGER,
    PRIMARY KEY (user_id, event_id),
    FOREIGN KEY (user_id) REFERENCES users (id),
    FOREIGN KEY (event_id) REFERENCES events (id)
);

-- Follows table (one-way relationships)
CREATE TABLE IF NOT EXISTS follows (
    follower_id INTEGER NOT NULL,
    following_id INTEGER NOT NULL,
    PRIMARY KEY (follower_id, following_id),
    FOREIGN KEY (follower_id) REFERENCES users (id),
    FOREIGN KEY (following_id) REFERENCES users (id)
);

CREATE INDEX IF NOT EXISTS idx_follows_following ON follows(following_id);

-- Skills per user, drawn from a fixed vocabulary
CREATE TABLE IF NOT EXISTS user_skills (
    user_id INTEGER,
    skill TEXT NOT NULL,
    PRIMARY KEY (user_id, skill),
    FOREIGN KEY (user_id) REFERENCES users (id)
);

-- Groups table
CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    image_url TEXT,
    created_by_user_id INTEGER NOT NULL,
    FOREIGN KEY (created_by_user_id) REFERENCES users (id)
);

-- Group membership junction table
CREATE TABLE IF NOT EXISTS group_members (
    group_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    role TEXT NOT NULL DEFAULT 'member' CHECK(role IN ('admin', 'member')),
    PRIMARY KEY (group_id, user_id),
    FOREIGN KEY (group_id) REFERENCES groups (id),
    FOREIGN KEY (user_id) REFERENCES users (id)
);

-- Invitations and join requests
CREATE TABLE IF NOT EXISTS invitations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender_id INTEGER NOT NULL,
    receiver_id INTEGER NOT NULL,
    type TEXT NOT NULL CHECK(type IN ('group_invite', 'join_request')),
    reference_id INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending', 'accepted', 'declined')),
    UNIQUE (sender_id, receiver_id, type, reference_id),
    FOREIGN KEY (sender_id) REFERENCES users (id),
    FOREIGN KEY (receiver_id) REFERENCES users (id)
);

CREATE INDEX IF NOT EXISTS idx_invitations_receiver ON invitations(receiver_id);
"#;

/// Every table the seeder writes, children before parents.
///
/// Deleting in this order never trips a foreign key.
pub const TABLES_IN_DELETE_ORDER: [&str; 8] = [
    "invitations",
    "group_members",
    "groups",
    "user_skills",
    "follows",
    "registrations",
    "events",
    "users",
];

/// Tables left behind by earlier backend versions that still point at `users`.
///
/// They are emptied when present so deleting users cannot trip their foreign keys.
pub const LEGACY_TABLES: [&str; 1] = ["friendships"];
