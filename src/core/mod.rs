// Core algorithm exports
pub mod filters;
pub mod gatekeeper;
pub mod matcher;
pub mod prompts;
pub mod scoring;

pub use filters::{expertise_matches, name_matches, matches_search, normalize_query};
pub use gatekeeper::{Gatekeeper, TopicPolicy, ChatReply, DEFAULT_QUERY};
pub use matcher::{Recommender, RecommenderSettings, RankingStrategy, RecommendError, reconcile};
pub use scoring::{calculate_relevance_score, tokenize};
