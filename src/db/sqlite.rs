// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{CommunityRecord, StoreStats, UserRecord};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn store_stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock().await;
        super::queries::store_stats(&conn)
    }

    async fn upsert_user(&self, user: &UserRecord) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::upsert_user(&conn, user)
    }

    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_user(&conn, id)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let conn = self.conn.lock().await;
        super::queries::list_users(&conn)
    }

    async fn upsert_community(&self, community: &CommunityRecord) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::upsert_community(&conn, community)
    }

    async fn list_communities(&self) -> Result<Vec<CommunityRecord>> {
        let conn = self.conn.lock().await;
        super::queries::list_communities(&conn)
    }

    async fn add_membership(&self, community_id: &str, user_id: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::add_membership(&conn, community_id, user_id)
    }

    async fn joined_community_ids(&self, user_id: &str) -> Result<HashSet<String>> {
        let conn = self.conn.lock().await;
        super::queries::joined_community_ids(&conn, user_id)
    }

    async fn add_follow(&self, follower_id: &str, followee_id: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::add_follow(&conn, follower_id, followee_id)
    }

    async fn followed_user_ids(&self, user_id: &str) -> Result<HashSet<String>> {
        let conn = self.conn.lock().await;
        super::queries::followed_user_ids(&conn, user_id)
    }
}
