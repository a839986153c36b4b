// Ranking pass — a small post-hoc nudge toward preferred domains.
//
// Recommendations matching a preferred domain get a flat +0.1 (clamped at
// 1.0) and the list is re-sorted. Nothing is dropped.
//
// Two ways to decide "matches":
//   ReasonSubstring  the preferred domain appears anywhere in the reason text.
//                    This is the long-standing behavior and the default; it
//                    also fires on unrelated words that contain the domain.
//   MatchedDomains   the normalized preferred domain equals one of the
//                    recommendation's matched_domains.

use serde::{Deserialize, Serialize};

use crate::profile::normalize_term;

use super::recommendation::Recommendation;
use super::sort_by_similarity;

pub const PREFERRED_DOMAIN_BONUS: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainMatchMode {
    #[default]
    ReasonSubstring,
    MatchedDomains,
}

/// Caller-supplied ranking preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingPreferences {
    #[serde(default)]
    pub preferred_domains: Vec<String>,
    #[serde(default)]
    pub mode: DomainMatchMode,
}

impl RankingPreferences {
    /// Parse a comma-separated domain list (as sent in a query string).
    /// Blank entries are dropped.
    pub fn from_csv(csv: &str, mode: DomainMatchMode) -> Self {
        let preferred_domains = csv
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            preferred_domains,
            mode,
        }
    }

    fn matches(&self, rec: &Recommendation) -> bool {
        match self.mode {
            DomainMatchMode::ReasonSubstring => self
                .preferred_domains
                .iter()
                .any(|domain| rec.reason.contains(domain.as_str())),
            DomainMatchMode::MatchedDomains => self.preferred_domains.iter().any(|domain| {
                let domain = normalize_term(domain);
                rec.matched_domains.iter().any(|m| *m == domain)
            }),
        }
    }
}

/// Apply the preferred-domain bonus and re-sort, descending and stable.
///
/// Output length always equals input length.
pub fn rank_recommendations(
    mut recommendations: Vec<Recommendation>,
    preferences: Option<&RankingPreferences>,
) -> Vec<Recommendation> {
    if let Some(prefs) = preferences.filter(|p| !p.preferred_domains.is_empty()) {
        for rec in &mut recommendations {
            if prefs.matches(rec) {
                rec.similarity = (rec.similarity + PREFERRED_DOMAIN_BONUS).min(1.0);
            }
        }
    }

    sort_by_similarity(&mut recommendations);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::recommendation::Category;

    fn rec(id: &str, similarity: f64, reason: &str, matched: &[&str]) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            similarity,
            reason: reason.to_string(),
            category: Category::Community,
            matched_domains: matched.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn prefs(domains: &[&str], mode: DomainMatchMode) -> RankingPreferences {
        RankingPreferences {
            preferred_domains: domains.iter().map(|d| d.to_string()).collect(),
            mode,
        }
    }

    #[test]
    fn test_bonus_and_resort() {
        let input = vec![
            rec("a", 0.5, "relevant to your skills: rust", &[]),
            rec("b", 0.45, "matches your interest in web-dev", &["web-dev"]),
        ];
        let ranked = rank_recommendations(
            input,
            Some(&prefs(&["web-dev"], DomainMatchMode::ReasonSubstring)),
        );
        assert_eq!(ranked[0].id, "b");
        assert!((ranked[0].similarity - 0.55).abs() < 1e-9);
        assert_eq!(ranked[1].similarity, 0.5);
    }

    #[test]
    fn test_bonus_clamped() {
        let input = vec![rec("a", 0.95, "matches your interest in ai", &["ai"])];
        let ranked =
            rank_recommendations(input, Some(&prefs(&["ai"], DomainMatchMode::ReasonSubstring)));
        assert_eq!(ranked[0].similarity, 1.0);
    }

    #[test]
    fn test_substring_false_positive_vs_structured() {
        // "ai" is a substring of "maintain"
        let input = vec![rec("a", 0.4, "shared skills: maintainability", &[])];
        let substring = rank_recommendations(
            input.clone(),
            Some(&prefs(&["ai"], DomainMatchMode::ReasonSubstring)),
        );
        assert!((substring[0].similarity - 0.5).abs() < 1e-9);

        let structured =
            rank_recommendations(input, Some(&prefs(&["AI"], DomainMatchMode::MatchedDomains)));
        assert_eq!(structured[0].similarity, 0.4);
    }

    #[test]
    fn test_structured_mode_normalizes_preference() {
        let input = vec![rec("a", 0.4, "whatever", &["web-dev"])];
        let ranked =
            rank_recommendations(input, Some(&prefs(&[" Web-Dev "], DomainMatchMode::MatchedDomains)));
        assert!((ranked[0].similarity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_preferences_only_sorts() {
        let input = vec![rec("low", 0.2, "", &[]), rec("high", 0.8, "", &[])];
        let ranked = rank_recommendations(input, None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "high");
        assert_eq!(ranked[0].similarity, 0.8);
    }

    #[test]
    fn test_from_csv() {
        let p = RankingPreferences::from_csv(" web-dev, ,ai,", DomainMatchMode::default());
        assert_eq!(p.preferred_domains, vec!["web-dev", "ai"]);
        assert_eq!(p.mode, DomainMatchMode::ReasonSubstring);
    }
}
