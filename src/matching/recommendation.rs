// Recommendation — the engine's output record.

use serde::{Deserialize, Serialize};

/// What kind of entity a recommendation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Community,
    User,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Community => "community",
            Category::User => "user",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A scored, explained recommendation. Built fresh per response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Similarity in [0, 1]
    pub similarity: f64,
    /// Human-readable justification
    pub reason: String,
    pub category: Category,
    /// Normalized domains that contributed to the score. Not part of the
    /// wire format; the structured ranking mode reads it.
    #[serde(skip)]
    pub matched_domains: Vec<String>,
}

/// Join reason clauses with " and ", falling back to `default` when empty.
pub(crate) fn join_reasons(clauses: Vec<String>, default: &str) -> String {
    if clauses.is_empty() {
        default.to_string()
    } else {
        clauses.join(" and ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_wire_shape() {
        let rec = Recommendation {
            id: "c1".to_string(),
            name: "Web Builders".to_string(),
            description: "".to_string(),
            similarity: 0.9,
            reason: "relevant community".to_string(),
            category: Category::Community,
            matched_domains: vec!["web-dev".to_string()],
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["category"], "community");
        assert!(json.get("matched_domains").is_none());
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_category_display_matches_wire_name() {
        for category in [Category::Community, Category::User] {
            let wire = serde_json::to_value(category).unwrap();
            assert_eq!(wire, category.to_string());
        }
        assert_eq!(format!("{:<6}|", Category::User), "user  |");
    }

    #[test]
    fn test_join_reasons() {
        assert_eq!(join_reasons(vec![], "similar profile"), "similar profile");
        assert_eq!(
            join_reasons(vec!["a".to_string(), "b".to_string()], "x"),
            "a and b"
        );
    }
}
