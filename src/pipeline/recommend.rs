// Recommendation pipeline: requester profile -> candidate pool -> matcher -> ranking.
//
// This is the glue between storage and the pure matching engine. For each
// request it:
// 1. Builds the requester's profile vector from the stored record
// 2. Loads the candidate pool and drops entities the requester already has
//    (joined communities, followed users)
// 3. Runs the matcher for the candidate type
// 4. Applies the ranking pass
//
// Vectors are rebuilt from scratch on every call; nothing is cached.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::db::models::UserRecord;
use crate::db::Database;
use crate::matching::{
    find_matching_communities, find_matching_users, rank_recommendations, Recommendation,
    RankingPreferences,
};
use crate::profile::UserProfileVector;

/// Both recommendation lists for one requester.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizedRecommendations {
    pub communities: Vec<Recommendation>,
    pub users: Vec<Recommendation>,
}

/// Recommend communities the requester hasn't joined yet.
pub async fn recommend_communities(
    db: &dyn Database,
    requester: &UserRecord,
    limit: usize,
    preferences: Option<&RankingPreferences>,
) -> Result<Vec<Recommendation>> {
    let vector = UserProfileVector::from_record(requester);

    let joined = db
        .joined_community_ids(&requester.id)
        .await
        .context("Failed to load joined communities")?;
    let mut pool = db
        .list_communities()
        .await
        .context("Failed to load communities")?;
    pool.retain(|community| !joined.contains(&community.id));

    debug!(
        user_id = %requester.id,
        candidates = pool.len(),
        excluded = joined.len(),
        "Matching communities"
    );

    let matches = find_matching_communities(&vector, &pool, limit);
    Ok(rank_recommendations(matches, preferences))
}

/// Recommend users the requester doesn't follow yet.
pub async fn recommend_users(
    db: &dyn Database,
    requester: &UserRecord,
    limit: usize,
    preferences: Option<&RankingPreferences>,
) -> Result<Vec<Recommendation>> {
    let vector = UserProfileVector::from_record(requester);

    let followed = db
        .followed_user_ids(&requester.id)
        .await
        .context("Failed to load followed users")?;
    let mut pool = db.list_users().await.context("Failed to load users")?;
    pool.retain(|user| !followed.contains(&user.id));

    debug!(
        user_id = %requester.id,
        candidates = pool.len(),
        excluded = followed.len(),
        "Matching users"
    );

    let matches = find_matching_users(&vector, &pool, limit);
    Ok(rank_recommendations(matches, preferences))
}

/// Communities and users in one call.
pub async fn recommend_personalized(
    db: &dyn Database,
    requester: &UserRecord,
    community_limit: usize,
    user_limit: usize,
    preferences: Option<&RankingPreferences>,
) -> Result<PersonalizedRecommendations> {
    let communities = recommend_communities(db, requester, community_limit, preferences).await?;
    let users = recommend_users(db, requester, user_limit, preferences).await?;
    Ok(PersonalizedRecommendations { communities, users })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::CommunityRecord;

    fn user(id: &str, skills: &[&str], domains: &[&str]) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: id.to_string(),
            avatar: None,
            bio: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            domains: domains.iter().map(|s| s.to_string()).collect(),
            goals: vec![],
            experience: None,
        }
    }

    fn community(id: &str, domain: &str) -> CommunityRecord {
        CommunityRecord {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            domain: domain.to_string(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_joined_communities_excluded() {
        let db = crate::db::in_memory().unwrap();
        let me = user("me", &["rust"], &["systems"]);
        db.upsert_user(&me).await.unwrap();
        db.upsert_community(&community("joined", "systems")).await.unwrap();
        db.upsert_community(&community("fresh", "systems")).await.unwrap();
        db.add_membership("joined", "me").await.unwrap();

        let recs = recommend_communities(db.as_ref(), &me, 5, None).await.unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_followed_users_excluded() {
        let db = crate::db::in_memory().unwrap();
        let me = user("me", &["rust"], &["systems"]);
        for u in [
            me.clone(),
            user("followed", &["rust"], &["systems"]),
            user("stranger", &["rust"], &["systems"]),
        ] {
            db.upsert_user(&u).await.unwrap();
        }
        db.add_follow("me", "followed").await.unwrap();

        let recs = recommend_users(db.as_ref(), &me, 5, None).await.unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["stranger"]);
    }

    #[tokio::test]
    async fn test_personalized_respects_limits() {
        let db = crate::db::in_memory().unwrap();
        let me = user("me", &["rust"], &["systems"]);
        db.upsert_user(&me).await.unwrap();
        for i in 0..5 {
            db.upsert_community(&community(&format!("c{i}"), "systems"))
                .await
                .unwrap();
            db.upsert_user(&user(&format!("u{i}"), &["rust"], &["systems"]))
                .await
                .unwrap();
        }

        let recs = recommend_personalized(db.as_ref(), &me, 3, 2, None)
            .await
            .unwrap();
        assert_eq!(recs.communities.len(), 3);
        assert_eq!(recs.users.len(), 2);
    }
}
