// Fixture import: load users, communities, memberships and follows from JSON.
//
// The platform's own CRUD endpoints own these tables in production. This
// import exists so a fresh database can be populated for local runs and demos.
//
// File shape:
//   { "users": [...], "communities": [...],
//     "memberships": [{"community_id", "user_id"}],
//     "follows": [{"follower_id", "followee_id"}] }

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::db::models::{CommunityRecord, UserRecord};
use crate::db::Database;

#[derive(Debug, Deserialize)]
pub struct Membership {
    pub community_id: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Follow {
    pub follower_id: String,
    pub followee_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub communities: Vec<CommunityRecord>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default)]
    pub follows: Vec<Follow>,
}

/// What an import wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub communities: usize,
    pub memberships: usize,
    pub follows: usize,
}

impl Fixtures {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Fixture file is not valid JSON")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Upsert every record in `fixtures`. Safe to run repeatedly.
pub async fn import(db: &dyn Database, fixtures: &Fixtures) -> Result<ImportSummary> {
    for user in &fixtures.users {
        db.upsert_user(user)
            .await
            .with_context(|| format!("Failed to import user {}", user.id))?;
    }
    for community in &fixtures.communities {
        db.upsert_community(community)
            .await
            .with_context(|| format!("Failed to import community {}", community.id))?;
    }
    for m in &fixtures.memberships {
        db.add_membership(&m.community_id, &m.user_id).await?;
    }
    for f in &fixtures.follows {
        db.add_follow(&f.follower_id, &f.followee_id).await?;
    }

    let summary = ImportSummary {
        users: fixtures.users.len(),
        communities: fixtures.communities.len(),
        memberships: fixtures.memberships.len(),
        follows: fixtures.follows.len(),
    };
    info!(
        users = summary.users,
        communities = summary.communities,
        memberships = summary.memberships,
        follows = summary.follows,
        "Fixtures imported"
    );
    Ok(summary)
}
