use serde::{Deserialize, Serialize};
use crate::models::domain::{ChatTurn, MentorProfile};

/// Response for mentor listing and search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorListResponse {
    pub mentors: Vec<MentorProfile>,
    pub total: usize,
}

impl From<Vec<MentorProfile>> for MentorListResponse {
    fn from(mentors: Vec<MentorProfile>) -> Self {
        let total = mentors.len();
        Self { mentors, total }
    }
}

/// Response for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub message: ChatTurn,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub mentors: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
