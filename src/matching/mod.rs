// Matching engine — similarity scoring, candidate matchers and the ranking pass.
//
// Everything here is pure and synchronous: no I/O, no shared state, no errors.

pub mod communities;
pub mod ranking;
pub mod recommendation;
pub mod similarity;
pub mod users;

pub use communities::find_matching_communities;
pub use ranking::{rank_recommendations, DomainMatchMode, RankingPreferences};
pub use recommendation::{Category, Recommendation};
pub use similarity::{calculate_profile_similarity, cosine_similarity, jaccard_similarity};
pub use users::find_matching_users;

/// Default number of recommendations returned by the matchers.
pub const DEFAULT_TOP_N: usize = 5;

/// Stable descending sort by similarity. Ties keep their input order.
pub(crate) fn sort_by_similarity(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}
