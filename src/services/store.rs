use async_trait::async_trait;
use crate::core::filters::{expertise_matches, matches_search, name_matches, normalize_query};
use crate::models::MentorProfile;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when building or reading from a mentor store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

/// Read-only access to the mentor catalogue
///
/// Absent ids and blank queries are not errors: they yield `None` or an
/// empty list. `Err` is reserved for backend failures; the in-memory store
/// never returns one from a read, while a persistent backend adds its own
/// variants to [`StoreError`] for connection and query failures.
#[async_trait]
pub trait MentorStore: Send + Sync {
    /// Snapshot of every profile in store order
    async fn get_all(&self) -> Result<Vec<MentorProfile>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<MentorProfile>, StoreError>;

    /// Profiles with an expertise field containing `field` (case-insensitive)
    async fn find_by_field(&self, field: &str) -> Result<Vec<MentorProfile>, StoreError>;

    /// Profiles whose name or any expertise field contains `query` (case-insensitive)
    async fn search(&self, query: &str) -> Result<Vec<MentorProfile>, StoreError>;

    /// First profile whose name contains `name` (case-insensitive)
    async fn find_by_name(&self, name: &str) -> Result<Option<MentorProfile>, StoreError>;
}

/// Mentor store backed by an immutable in-process list
#[derive(Debug, Clone)]
pub struct InMemoryMentorStore {
    mentors: Arc<Vec<MentorProfile>>,
    latency: Duration,
}

impl InMemoryMentorStore {
    /// Create a store from seed profiles, rejecting inconsistent seeds
    pub fn new(mentors: Vec<MentorProfile>) -> Result<Self, StoreError> {
        validate_seed(&mentors)?;
        Ok(Self {
            mentors: Arc::new(mentors),
            latency: Duration::ZERO,
        })
    }

    /// Create a store holding the built-in catalogue
    pub fn with_default_seed() -> Self {
        Self::new(super::seed::default_mentors()).expect("built-in mentor catalogue is valid")
    }

    /// Delay every read by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.mentors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn validate_seed(mentors: &[MentorProfile]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(mentors.len());

    for mentor in mentors {
        if mentor.id.trim().is_empty() {
            return Err(StoreError::InvalidSeed("mentor with empty id".into()));
        }
        if !seen.insert(mentor.id.as_str()) {
            return Err(StoreError::InvalidSeed(format!("duplicate mentor id {}", mentor.id)));
        }
        if mentor.name.trim().is_empty() {
            return Err(StoreError::InvalidSeed(format!("mentor {} has no name", mentor.id)));
        }
        if mentor.experience_summary.trim().is_empty() {
            return Err(StoreError::InvalidSeed(format!(
                "mentor {} has no experience summary",
                mentor.id
            )));
        }
        if mentor.expertise_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(StoreError::InvalidSeed(format!(
                "mentor {} has an empty expertise field",
                mentor.id
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl MentorStore for InMemoryMentorStore {
    async fn get_all(&self) -> Result<Vec<MentorProfile>, StoreError> {
        self.simulate_latency().await;
        Ok(self.mentors.as_ref().clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<MentorProfile>, StoreError> {
        self.simulate_latency().await;
        Ok(self.mentors.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_field(&self, field: &str) -> Result<Vec<MentorProfile>, StoreError> {
        let Some(needle) = normalize_query(field) else {
            return Ok(Vec::new());
        };
        self.simulate_latency().await;

        Ok(self
            .mentors
            .iter()
            .filter(|m| expertise_matches(m, &needle))
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<MentorProfile>, StoreError> {
        let Some(needle) = normalize_query(query) else {
            return Ok(Vec::new());
        };
        self.simulate_latency().await;

        let results: Vec<MentorProfile> = self
            .mentors
            .iter()
            .filter(|m| matches_search(m, &needle))
            .cloned()
            .collect();

        tracing::debug!("Search {:?} matched {} mentors", query, results.len());
        Ok(results)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MentorProfile>, StoreError> {
        let Some(needle) = normalize_query(name) else {
            return Ok(None);
        };
        self.simulate_latency().await;

        Ok(self.mentors.iter().find(|m| name_matches(m, &needle)).cloned())
    }
}
