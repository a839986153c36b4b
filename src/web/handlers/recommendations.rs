// Recommendation handlers.
//
// GET /api/recommendations/communities  — ?limit= (default 5)
// GET /api/recommendations/users        — ?limit= (default 5)
// GET /api/recommendations/personalized — ?community_limit= &user_limit= (default 3 each)
//
// All three accept ?preferred_domains=a,b for the ranking bonus. Limits are
// clamped to 1..=50, so ?limit=0 returns at most one recommendation rather
// than an empty list. An empty result is a normal 200.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::matching::{RankingPreferences, DEFAULT_TOP_N};
use crate::pipeline::recommend;
use crate::web::{api_error, AppState, AuthUser};

use super::load_requester;

const MAX_LIMIT: usize = 50;
const FAILURE: &str = "Failed to generate recommendations";

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
    /// Comma-separated domains that earn the ranking bonus
    pub preferred_domains: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct PersonalizedQuery {
    pub community_limit: Option<usize>,
    pub user_limit: Option<usize>,
    pub preferred_domains: Option<String>,
}

/// GET /api/recommendations/communities — communities the user hasn't joined.
pub async fn communities(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<ListQuery>,
) -> Response {
    let requester = match load_requester(&state, &auth.user_id, FAILURE).await {
        Ok(user) => user,
        Err(response) => return response,
    };
    let limit = clamp_limit(params.limit, DEFAULT_TOP_N);
    let prefs = preferences(&state, params.preferred_domains.as_deref());

    match recommend::recommend_communities(state.db.as_ref(), &requester, limit, prefs.as_ref())
        .await
    {
        Ok(recs) => Json(serde_json::json!({
            "count": recs.len(),
            "recommendations": recs,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user_id, "Community recommendations failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, FAILURE)
        }
    }
}

/// GET /api/recommendations/users — users the requester doesn't follow.
pub async fn users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<ListQuery>,
) -> Response {
    let requester = match load_requester(&state, &auth.user_id, FAILURE).await {
        Ok(user) => user,
        Err(response) => return response,
    };
    let limit = clamp_limit(params.limit, DEFAULT_TOP_N);
    let prefs = preferences(&state, params.preferred_domains.as_deref());

    match recommend::recommend_users(state.db.as_ref(), &requester, limit, prefs.as_ref()).await {
        Ok(recs) => Json(serde_json::json!({
            "count": recs.len(),
            "recommendations": recs,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user_id, "User recommendations failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, FAILURE)
        }
    }
}

/// GET /api/recommendations/personalized — both lists in one response.
pub async fn personalized(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<PersonalizedQuery>,
) -> Response {
    let requester = match load_requester(&state, &auth.user_id, FAILURE).await {
        Ok(user) => user,
        Err(response) => return response,
    };
    let community_limit = clamp_limit(params.community_limit, 3);
    let user_limit = clamp_limit(params.user_limit, 3);
    let prefs = preferences(&state, params.preferred_domains.as_deref());

    match recommend::recommend_personalized(
        state.db.as_ref(),
        &requester,
        community_limit,
        user_limit,
        prefs.as_ref(),
    )
    .await
    {
        Ok(recs) => Json(recs).into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user_id, "Personalized recommendations failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, FAILURE)
        }
    }
}

// --- Helpers ---

fn clamp_limit(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// Ranking preferences from the query string, using the configured match mode.
fn preferences(state: &AppState, csv: Option<&str>) -> Option<RankingPreferences> {
    csv.map(|csv| RankingPreferences::from_csv(csv, state.config.domain_match))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, DEFAULT_TOP_N), DEFAULT_TOP_N);
        assert_eq!(clamp_limit(Some(0), 5), 1);
        assert_eq!(clamp_limit(Some(500), 5), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(7), 3), 7);
    }
}
