// UserProfileVector — the weighted-term representation of a declared profile.
//
// Each of the three profile lists becomes a map from normalized term to
// occurrence count. Skills are additionally scaled by an experience
// multiplier; domains and goals are presence signals and stay unweighted.
//
// Vectors are derived per request and thrown away afterwards.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::db::models::UserRecord;

/// Lower-case and trim a term. Every key in a profile vector goes through this.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Declared experience band, mapped to a skill weight multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Parse a band case-insensitively. Anything that isn't "beginner" or
    /// "intermediate" counts as advanced.
    pub fn from_band(band: &str) -> Self {
        match normalize_term(band).as_str() {
            "beginner" => ExperienceLevel::Beginner,
            "intermediate" => ExperienceLevel::Intermediate,
            _ => ExperienceLevel::Advanced,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ExperienceLevel::Beginner => 0.5,
            ExperienceLevel::Intermediate => 1.0,
            ExperienceLevel::Advanced => 1.5,
        }
    }
}

/// Weighted term maps for one user's skills, domains and goals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfileVector {
    /// Only used to exclude self-matches
    pub user_id: String,
    /// Skill term -> occurrence count * experience multiplier
    pub skills: HashMap<String, f64>,
    /// Domain -> occurrence count
    pub domains: HashMap<String, f64>,
    /// Goal phrase -> occurrence count
    pub goals: HashMap<String, f64>,
    /// De-duplicated union of all keys, in first-seen order
    /// (skills, then domains, then goals)
    pub all_terms: Vec<String>,
}

impl UserProfileVector {
    /// Build a vector from raw profile lists.
    ///
    /// `experience` scales skill weights only when present. Blank entries
    /// are skipped. Never fails: empty lists give empty maps.
    pub fn new<S: AsRef<str>>(
        user_id: &str,
        skills: &[S],
        domains: &[S],
        goals: &[S],
        experience: Option<&str>,
    ) -> Self {
        let mut all_terms = Vec::new();
        let mut seen = HashSet::new();

        let mut skills = count_terms(skills, &mut all_terms, &mut seen);
        let domains = count_terms(domains, &mut all_terms, &mut seen);
        let goals = count_terms(goals, &mut all_terms, &mut seen);

        if let Some(band) = experience {
            let factor = ExperienceLevel::from_band(band).multiplier();
            for weight in skills.values_mut() {
                *weight *= factor;
            }
        }

        Self {
            user_id: user_id.to_string(),
            skills,
            domains,
            goals,
            all_terms,
        }
    }

    /// Build a vector from a stored profile, defaulting experience to
    /// "intermediate" when the row has none.
    pub fn from_record(user: &UserRecord) -> Self {
        Self::new(
            &user.id,
            &user.skills,
            &user.domains,
            &user.goals,
            Some(user.experience_or_default()),
        )
    }

    /// True when the profile declares nothing at all.
    pub fn is_empty(&self) -> bool {
        self.all_terms.is_empty()
    }
}

/// Count normalized occurrences, recording first sightings in `order`.
fn count_terms<S: AsRef<str>>(
    items: &[S],
    order: &mut Vec<String>,
    seen: &mut HashSet<String>,
) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for item in items {
        let term = normalize_term(item.as_ref());
        if term.is_empty() {
            continue;
        }
        if seen.insert(term.clone()) {
            order.push(term.clone());
        }
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}
