// User matcher — scores other users against the requester's profile vector.
//
// Similarity is the blended profile score from similarity.rs. The overlaps
// computed here only feed the explanation string.

use std::collections::HashSet;

use crate::db::models::UserRecord;
use crate::profile::UserProfileVector;

use super::recommendation::{join_reasons, Category, Recommendation};
use super::similarity::calculate_profile_similarity;
use super::sort_by_similarity;

/// Users at or below this similarity are dropped. Higher than the community
/// floor because three mixed signals make low scores less meaningful.
pub const USER_NOISE_FLOOR: f64 = 0.15;

/// Score and explain one candidate against the requester. Applies no filtering.
pub fn score_user(requester: &UserProfileVector, candidate: &UserRecord) -> Recommendation {
    let other = UserProfileVector::from_record(candidate);
    let similarity = calculate_profile_similarity(requester, &other);

    let other_terms: HashSet<&str> = other.all_terms.iter().map(String::as_str).collect();
    let shared_terms: Vec<&str> = requester
        .all_terms
        .iter()
        .map(String::as_str)
        .filter(|term| other_terms.contains(term))
        .collect();

    // all_terms keeps first-seen order, so walking it gives domains in the
    // order the requester declared them.
    let shared_domains: Vec<String> = requester
        .all_terms
        .iter()
        .filter(|term| requester.domains.contains_key(*term) && other.domains.contains_key(*term))
        .cloned()
        .collect();

    let shares_goals = requester
        .goals
        .keys()
        .any(|goal| other.goals.contains_key(goal));

    let mut clauses = Vec::new();
    if !shared_terms.is_empty() {
        let shown: Vec<&str> = shared_terms.iter().take(2).copied().collect();
        clauses.push(format!("shared skills: {}", shown.join(", ")));
    }
    if !shared_domains.is_empty() {
        let shown: Vec<&str> = shared_domains.iter().take(2).map(String::as_str).collect();
        clauses.push(format!("common interest in {}", shown.join(", ")));
    }
    if shares_goals {
        clauses.push("similar goals".to_string());
    }

    Recommendation {
        id: candidate.id.clone(),
        name: candidate.name.clone(),
        description: candidate.bio.clone().unwrap_or_default(),
        similarity,
        reason: join_reasons(clauses, "similar profile"),
        category: Category::User,
        matched_domains: shared_domains,
    }
}

/// Rank other users for the requester: skip self, score, drop the noise
/// floor, sort, take `top_n`.
///
/// Users the requester already follows must be filtered out by the caller.
pub fn find_matching_users(
    requester: &UserProfileVector,
    others: &[UserRecord],
    top_n: usize,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = others
        .iter()
        .filter(|candidate| candidate.id != requester.user_id)
        .map(|candidate| score_user(requester, candidate))
        .filter(|rec| rec.similarity > USER_NOISE_FLOOR)
        .collect();

    sort_by_similarity(&mut recommendations);
    recommendations.truncate(top_n);
    recommendations
}
