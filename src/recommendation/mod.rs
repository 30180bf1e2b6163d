pub mod candidates;
pub mod features;
pub mod manager;
pub mod scoring;

pub use features::ReferenceListing;
pub use manager::{rank_candidates, recommend, recommend_ids, ScoredCandidate, MAX_RECOMMENDATIONS};
pub use scoring::{score_candidate, ScoreBreakdown};
