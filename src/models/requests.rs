use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for AI mentor recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1, max = 2000))]
    #[serde(alias = "user_query", rename = "userQuery")]
    pub user_query: String,
}

/// Request to the chat widget.
///
/// `query` is kept as raw JSON: anything that is not a string is treated as a
/// missing query rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<serde_json::Value>,
}

impl ChatRequest {
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_ref().and_then(|q| q.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldQuery {
    #[serde(default)]
    pub field: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}
