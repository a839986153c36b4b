// Similarity primitives and the profile-to-profile blend.
//
// Cosine similarity compares weighted term maps (skills carry experience-scaled
// magnitude). Jaccard similarity compares plain key sets (domains and goals are
// closer to boolean tags). The profile score blends the three:
//
//   0.5 * cosine(skills) + 0.3 * jaccard(domains) + 0.2 * jaccard(goals)
//
// The weights sum to 1.0 so the result stays in [0, 1].

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::profile::UserProfileVector;

pub const SKILL_WEIGHT: f64 = 0.5;
pub const DOMAIN_WEIGHT: f64 = 0.3;
pub const GOAL_WEIGHT: f64 = 0.2;

/// Cosine similarity between two term -> weight maps.
///
/// Missing keys count as 0. Returns 0.0 when either side has zero magnitude.
/// Sums run over the sorted key union, so swapping the arguments gives a
/// bit-identical result.
pub fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;

    for key in keys {
        let wa = a.get(key).copied().unwrap_or(0.0);
        let wb = b.get(key).copied().unwrap_or(0.0);
        dot += wa * wb;
        mag_a += wa * wa;
        mag_b += wb * wb;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b).sqrt()
    }
}

/// Jaccard similarity |a ∩ b| / |a ∪ b|. Returns 0.0 when both sets are empty.
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Jaccard over the key sets of two term maps.
pub fn key_jaccard(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let keys_a: HashSet<&String> = a.keys().collect();
    let keys_b: HashSet<&String> = b.keys().collect();
    jaccard_similarity(&keys_a, &keys_b)
}

/// Blended similarity between two profiles, in [0, 1]. Symmetric.
pub fn calculate_profile_similarity(v1: &UserProfileVector, v2: &UserProfileVector) -> f64 {
    SKILL_WEIGHT * cosine_similarity(&v1.skills, &v2.skills)
        + DOMAIN_WEIGHT * key_jaccard(&v1.domains, &v2.domains)
        + GOAL_WEIGHT * key_jaccard(&v1.goals, &v2.goals)
}
