// Community matcher — scores communities against a user's profile vector.
//
// A community scores on two signals:
//   - its domain is one of the user's declared domains (+0.6)
//   - its tags overlap the user's skills (fraction of tags * 0.4, plus a flat
//     0.1 for having any overlap at all)
//
// The terms can add up past 1.0 on purpose, so a domain match plus skill
// overlap outranks either alone; the final min(score, 1.0) is a clamp, not a
// normalization.

use crate::db::models::CommunityRecord;
use crate::profile::{normalize_term, UserProfileVector};

use super::recommendation::{join_reasons, Category, Recommendation};
use super::sort_by_similarity;

pub const DOMAIN_MATCH_SCORE: f64 = 0.6;
pub const SKILL_OVERLAP_WEIGHT: f64 = 0.4;
pub const ANY_SKILL_BONUS: f64 = 0.1;

/// Communities at or below this similarity are dropped.
pub const COMMUNITY_NOISE_FLOOR: f64 = 0.1;

/// Score and explain a single community. Applies no filtering.
pub fn score_community(user: &UserProfileVector, community: &CommunityRecord) -> Recommendation {
    let domain = normalize_term(&community.domain);
    let domain_match = if domain.is_empty() {
        0.0
    } else {
        user.domains.get(&domain).copied().unwrap_or(0.0)
    };

    let matching_tags: Vec<String> = community
        .tags
        .iter()
        .map(|tag| normalize_term(tag))
        .filter(|tag| user.skills.contains_key(tag))
        .collect();
    let skill_matches = matching_tags.len();
    let skill_score = skill_matches as f64 / community.tags.len().max(1) as f64;

    let domain_score = if domain_match > 0.0 { DOMAIN_MATCH_SCORE } else { 0.0 };
    let any_skill = if skill_matches > 0 { ANY_SKILL_BONUS } else { 0.0 };
    let score = domain_score + skill_score * SKILL_OVERLAP_WEIGHT + any_skill;

    let mut clauses = Vec::new();
    let mut matched_domains = Vec::new();
    if domain_match > 0.0 {
        clauses.push(format!("matches your interest in {}", community.domain.trim()));
        matched_domains.push(domain);
    }
    if skill_matches > 0 {
        let shown: Vec<&str> = matching_tags.iter().take(2).map(String::as_str).collect();
        clauses.push(format!("relevant to your skills: {}", shown.join(", ")));
    }

    Recommendation {
        id: community.id.clone(),
        name: community.name.clone(),
        description: community.description.clone(),
        similarity: score.min(1.0),
        reason: join_reasons(clauses, "relevant community"),
        category: Category::Community,
        matched_domains,
    }
}

/// Rank communities for a user: score, drop the noise floor, sort, take `top_n`.
///
/// Communities the user already joined must be filtered out by the caller.
pub fn find_matching_communities(
    user: &UserProfileVector,
    communities: &[CommunityRecord],
    top_n: usize,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = communities
        .iter()
        .map(|community| score_community(user, community))
        .filter(|rec| rec.similarity > COMMUNITY_NOISE_FLOOR)
        .collect();

    sort_by_similarity(&mut recommendations);
    recommendations.truncate(top_n);
    recommendations
}
