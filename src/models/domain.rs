use serde::{Deserialize, Serialize};

/// Mentor profile as held by the mentor store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: String,
    pub name: String,
    #[serde(rename = "expertiseFields", alias = "expertise_fields")]
    pub expertise_fields: Vec<String>,
    #[serde(rename = "experienceSummary", alias = "experience_summary")]
    pub experience_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl MentorProfile {
    /// Availability text, or the placeholder used when none was given
    pub fn availability_or_default(&self) -> &str {
        self.availability
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or("Not specified")
    }
}

/// A single ranked suggestion inside a [`MatchResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedMentor {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    #[serde(rename = "mentorName")]
    pub mentor_name: String,
    pub justification: String,
    #[serde(rename = "expertiseFields", default, skip_serializing_if = "Option::is_none")]
    pub expertise_fields: Option<Vec<String>>,
    #[serde(
        rename = "experienceSummarySnippet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub experience_summary_snippet: Option<String>,
}

/// Ranked recommendations, best first, plus an optional overall analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub recommendations: Vec<RecommendedMentor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl MatchResult {
    /// Empty recommendation list carrying an explanatory message
    pub fn empty_with_analysis(analysis: impl Into<String>) -> Self {
        Self {
            recommendations: Vec::new(),
            analysis: Some(analysis.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of a chat conversation.
///
/// Conversations are held by the caller; the gatekeeper itself is stateless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }
}

/// Weights for the local lexical ranker
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub name: f64,
    pub expertise: f64,
    pub summary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name: 0.20,
            expertise: 0.55,
            summary: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_wire_names() {
        let json = r#"{
            "recommendations": [
                {"mentorId": "mentor-5", "mentorName": "John Doe", "justification": "Knows Python."}
            ]
        }"#;

        let result: MatchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].mentor_id, "mentor-5");
        assert!(result.recommendations[0].expertise_fields.is_none());
        assert!(result.analysis.is_none());
    }

    #[test]
    fn test_match_result_requires_recommendations() {
        let json = r#"{"analysis": "nothing here"}"#;
        assert!(serde_json::from_str::<MatchResult>(json).is_err());
    }

    #[test]
    fn test_availability_placeholder() {
        let profile = MentorProfile {
            id: "m".to_string(),
            name: "M".to_string(),
            expertise_fields: vec!["Art".to_string()],
            experience_summary: "Painter.".to_string(),
            availability: None,
        };
        assert_eq!(profile.availability_or_default(), "Not specified");
    }

    #[test]
    fn test_chat_turn_roles() {
        let turn = ChatTurn::assistant("hi");
        assert_eq!(turn.role, ChatRole::Assistant);
        assert_eq!(serde_json::to_value(turn.role).unwrap(), "assistant");
    }
}
