// Database trait — backend-agnostic async interface for all DB operations.
//
// Implementor: SqliteDatabase (wraps rusqlite behind a tokio Mutex).
// All methods are async so a native async backend could sit behind the same
// interface without touching the pipeline or the web handlers.
//
// The trait mirrors the queries.rs function signatures.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use super::models::{CommunityRecord, StoreStats, UserRecord};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Row counts for users, communities, memberships and follows.
    async fn store_stats(&self) -> Result<StoreStats>;

    // --- Users ---

    /// Insert or update a user's profile.
    async fn upsert_user(&self, user: &UserRecord) -> Result<()>;

    /// Load one user's profile. `None` if the row doesn't exist.
    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>>;

    /// Load every user's profile.
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    // --- Communities ---

    /// Insert or update a community.
    async fn upsert_community(&self, community: &CommunityRecord) -> Result<()>;

    /// Load every community.
    async fn list_communities(&self) -> Result<Vec<CommunityRecord>>;

    // --- Relationships ---

    /// Record a community membership.
    async fn add_membership(&self, community_id: &str, user_id: &str) -> Result<()>;

    /// Ids of communities the user has joined.
    async fn joined_community_ids(&self, user_id: &str) -> Result<HashSet<String>>;

    /// Record a follow edge.
    async fn add_follow(&self, follower_id: &str, followee_id: &str) -> Result<()>;

    /// Ids of users the user follows.
    async fn followed_user_ids(&self, user_id: &str) -> Result<HashSet<String>>;
}
