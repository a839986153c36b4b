// GET /api/profile/vector — the requester's weighted profile terms.
//
// Shows exactly what the matchers see, which is the quickest way to answer
// "why am I being recommended this?".

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::profile::{ExperienceLevel, UserProfileVector};
use crate::web::{AppState, AuthUser};

use super::load_requester;

pub async fn get_vector(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Response {
    let user = match load_requester(&state, &auth.user_id, "Failed to load profile").await {
        Ok(user) => user,
        Err(response) => return response,
    };

    let experience = ExperienceLevel::from_band(user.experience_or_default());
    let vector = UserProfileVector::from_record(&user);

    Json(serde_json::json!({
        "vector": vector,
        "experience": experience,
        "skill_multiplier": experience.multiplier(),
    }))
    .into_response()
}
