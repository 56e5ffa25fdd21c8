//! Wisdom Bridge - mentor directory and AI-assisted mentor matching
//!
//! This library provides the mentor store, the recommendation engine that
//! ranks mentors for a free-text need, and the single-topic chat gatekeeper.
//! Both AI-backed components talk to a text completion service through a
//! narrow trait and never surface its failures to their callers.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Gatekeeper, Recommender, RecommenderSettings, TopicPolicy};
pub use crate::models::{MentorProfile, MatchResult, RecommendedMentor, ChatTurn};
pub use crate::services::{CompletionService, InMemoryMentorStore, MentorStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let store = InMemoryMentorStore::with_default_seed();
        assert_eq!(store.len(), 9);
    }
}
