// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so the matching engine can use them without
// depending on rusqlite directly.

use serde::{Deserialize, Serialize};

/// Experience band assumed when a stored profile has none.
pub const DEFAULT_EXPERIENCE: &str = "intermediate";

/// A platform user's declared profile.
///
/// `skills`, `domains` and `goals` are stored as JSON arrays and parsed
/// at the storage boundary, so they are always concrete lists here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

impl UserRecord {
    /// The stored experience band, or "intermediate" when absent.
    pub fn experience_or_default(&self) -> &str {
        self.experience.as_deref().unwrap_or(DEFAULT_EXPERIENCE)
    }
}

/// A community users can join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Single domain identifier, may be empty
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Counts shown by `peerlink status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: i64,
    pub communities: i64,
    pub memberships: i64,
    pub follows: i64,
}
