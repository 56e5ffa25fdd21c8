// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{MentorProfile, RecommendedMentor, MatchResult, ChatTurn, ChatRole, ScoringWeights};
pub use requests::{RecommendRequest, ChatRequest, SearchQuery, FieldQuery, NameQuery};
pub use responses::{MentorListResponse, ChatResponse, HealthResponse, ErrorResponse};
