// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.
//
// List columns (skills, domains, goals, tags) are JSON string arrays. They are
// parsed here, at the storage boundary, so the matching engine only ever sees
// typed records.

use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{CommunityRecord, StoreStats, UserRecord};

/// Parse a JSON-encoded string array column. NULL parses to an empty list.
pub fn parse_string_list(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        None => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json)
            .with_context(|| format!("Malformed JSON string array: {json}")),
    }
}

/// Raw user row before the list columns are parsed.
struct UserRow {
    id: String,
    name: String,
    avatar: Option<String>,
    bio: Option<String>,
    skills: Option<String>,
    domains: Option<String>,
    goals: Option<String>,
    experience: Option<String>,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            avatar: row.get(2)?,
            bio: row.get(3)?,
            skills: row.get(4)?,
            domains: row.get(5)?,
            goals: row.get(6)?,
            experience: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<UserRecord> {
        let context = || format!("Failed to parse profile lists for user {}", self.id);
        let skills = parse_string_list(self.skills.as_deref()).with_context(context)?;
        let domains = parse_string_list(self.domains.as_deref()).with_context(context)?;
        let goals = parse_string_list(self.goals.as_deref()).with_context(context)?;
        Ok(UserRecord {
            id: self.id,
            name: self.name,
            avatar: self.avatar,
            bio: self.bio,
            skills,
            domains,
            goals,
            experience: self.experience,
        })
    }
}

const USER_COLUMNS: &str = "id, name, avatar, bio, skills, domains, goals, experience";

// --- Users ---

/// Insert or update a user's profile.
pub fn upsert_user(conn: &Connection, user: &UserRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, avatar, bio, skills, domains, goals, experience, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now'))
         ON CONFLICT(id) DO UPDATE SET
            name = ?2,
            avatar = ?3,
            bio = ?4,
            skills = ?5,
            domains = ?6,
            goals = ?7,
            experience = ?8,
            updated_at = datetime('now')",
        params![
            user.id,
            user.name,
            user.avatar,
            user.bio,
            serde_json::to_string(&user.skills)?,
            serde_json::to_string(&user.domains)?,
            serde_json::to_string(&user.goals)?,
            user.experience,
        ],
    )?;
    Ok(())
}

/// Load a single user by id.
pub fn get_user(conn: &Connection, id: &str) -> Result<Option<UserRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
    let row = stmt.query_row(params![id], UserRow::from_row).optional()?;
    row.map(UserRow::into_record).transpose()
}

/// Load every user, ordered by id so candidate order is stable.
pub fn list_users(conn: &Connection) -> Result<Vec<UserRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
    let rows = stmt.query_map([], UserRow::from_row)?;

    let mut users = Vec::new();
    for row in rows {
        users.push(row?.into_record()?);
    }
    Ok(users)
}

// --- Communities ---

/// Insert or update a community.
pub fn upsert_community(conn: &Connection, community: &CommunityRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO communities (id, name, description, domain, tags)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            name = ?2,
            description = ?3,
            domain = ?4,
            tags = ?5",
        params![
            community.id,
            community.name,
            community.description,
            community.domain,
            serde_json::to_string(&community.tags)?,
        ],
    )?;
    Ok(())
}

/// Load every community, ordered by id.
pub fn list_communities(conn: &Connection) -> Result<Vec<CommunityRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, domain, tags FROM communities ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;

    let mut communities = Vec::new();
    for row in rows {
        let (id, name, description, domain, tags_json) = row?;
        let tags = parse_string_list(tags_json.as_deref())
            .with_context(|| format!("Failed to parse tags for community {id}"))?;
        communities.push(CommunityRecord {
            id,
            name,
            description,
            domain,
            tags,
        });
    }
    Ok(communities)
}

// --- Memberships and follows ---

/// Record that a user joined a community. Joining twice is a no-op.
pub fn add_membership(conn: &Connection, community_id: &str, user_id: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO community_members (community_id, user_id) VALUES (?1, ?2)",
        params![community_id, user_id],
    )?;
    Ok(())
}

/// Ids of the communities a user has already joined.
pub fn joined_community_ids(conn: &Connection, user_id: &str) -> Result<HashSet<String>> {
    let mut stmt =
        conn.prepare("SELECT community_id FROM community_members WHERE user_id = ?1")?;
    let ids = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;
    Ok(ids)
}

/// Record that `follower_id` follows `followee_id`. Following twice is a no-op.
pub fn add_follow(conn: &Connection, follower_id: &str, followee_id: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO follows (follower_id, followee_id) VALUES (?1, ?2)",
        params![follower_id, followee_id],
    )?;
    Ok(())
}

/// Ids of the users a user already follows.
pub fn followed_user_ids(conn: &Connection, user_id: &str) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT followee_id FROM follows WHERE follower_id = ?1")?;
    let ids = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;
    Ok(ids)
}

// --- Stats ---

/// Row counts for the status display.
pub fn store_stats(conn: &Connection) -> Result<StoreStats> {
    let count = |table: &str| -> Result<i64> {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n)
    };
    Ok(StoreStats {
        users: count("users")?,
        communities: count("communities")?,
        memberships: count("community_members")?,
        follows: count("follows")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn user(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: format!("User {id}"),
            avatar: None,
            bio: Some("likes compilers".to_string()),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            domains: vec!["systems".to_string()],
            goals: vec!["find a mentor".to_string()],
            experience: Some("beginner".to_string()),
        }
    }

    #[test]
    fn test_parse_string_list_null_is_empty() {
        assert!(parse_string_list(None).unwrap().is_empty());
        assert!(parse_string_list(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_string_list_malformed_errors() {
        assert!(parse_string_list(Some("not json")).is_err());
        assert!(parse_string_list(Some(r#"{"a": 1}"#)).is_err());
    }

    #[test]
    fn test_user_upsert_and_get() {
        let conn = test_conn();
        assert!(get_user(&conn, "u1").unwrap().is_none());

        upsert_user(&conn, &user("u1")).unwrap();
        let loaded = get_user(&conn, "u1").unwrap().unwrap();
        assert_eq!(loaded, user("u1"));

        let renamed = UserRecord {
            name: "Renamed".to_string(),
            ..user("u1")
        };
        upsert_user(&conn, &renamed).unwrap();
        assert_eq!(get_user(&conn, "u1").unwrap().unwrap().name, "Renamed");
    }

    #[test]
    fn test_null_list_columns_parse_empty() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO users (id, name) VALUES ('bare', 'Bare Profile')",
            [],
        )
        .unwrap();
        let loaded = get_user(&conn, "bare").unwrap().unwrap();
        assert!(loaded.skills.is_empty());
        assert!(loaded.domains.is_empty());
        assert!(loaded.goals.is_empty());
        assert_eq!(loaded.experience, None);
    }

    #[test]
    fn test_malformed_list_column_errors() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO users (id, name, skills) VALUES ('broken', 'Broken', 'rust,sql')",
            [],
        )
        .unwrap();
        assert!(get_user(&conn, "broken").is_err());
        assert!(list_users(&conn).is_err());
    }

    #[test]
    fn test_list_users_ordered_by_id() {
        let conn = test_conn();
        upsert_user(&conn, &user("b")).unwrap();
        upsert_user(&conn, &user("a")).unwrap();
        let ids: Vec<String> = list_users(&conn).unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_communities_roundtrip() {
        let conn = test_conn();
        let community = CommunityRecord {
            id: "c1".to_string(),
            name: "Web Builders".to_string(),
            description: "Frontend and backend".to_string(),
            domain: "web-dev".to_string(),
            tags: vec!["React".to_string(), "Vue".to_string()],
        };
        upsert_community(&conn, &community).unwrap();
        assert_eq!(list_communities(&conn).unwrap(), vec![community]);
    }

    #[test]
    fn test_memberships_and_follows() {
        let conn = test_conn();
        add_membership(&conn, "c1", "u1").unwrap();
        add_membership(&conn, "c1", "u1").unwrap();
        add_membership(&conn, "c2", "u1").unwrap();
        add_membership(&conn, "c3", "u2").unwrap();
        let joined = joined_community_ids(&conn, "u1").unwrap();
        assert_eq!(joined.len(), 2);
        assert!(joined.contains("c1") && joined.contains("c2"));

        add_follow(&conn, "u1", "u2").unwrap();
        add_follow(&conn, "u2", "u3").unwrap();
        let followed = followed_user_ids(&conn, "u1").unwrap();
        assert_eq!(followed.into_iter().collect::<Vec<_>>(), vec!["u2"]);
    }

    #[test]
    fn test_store_stats() {
        let conn = test_conn();
        upsert_user(&conn, &user("u1")).unwrap();
        upsert_user(&conn, &user("u2")).unwrap();
        add_follow(&conn, "u1", "u2").unwrap();
        let stats = store_stats(&conn).unwrap();
        assert_eq!(
            stats,
            StoreStats {
                users: 2,
                communities: 0,
                memberships: 0,
                follows: 1,
            }
        );
    }
}
