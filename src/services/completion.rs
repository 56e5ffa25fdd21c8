use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when calling a text completion service
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Prompt was blocked: {0}")]
    Blocked(String),

    #[error("Completion service not configured: {0}")]
    NotConfigured(String),
}

/// Requested shape of the generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_CIVIC_INTEGRITY")]
    CivicIntegrity,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 5] = [
        HarmCategory::HateSpeech,
        HarmCategory::DangerousContent,
        HarmCategory::Harassment,
        HarmCategory::SexuallyExplicit,
        HarmCategory::CivicIntegrity,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: BlockThreshold,
}

/// Content-filtering policy passed along with every prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyPolicy {
    pub settings: Vec<SafetySetting>,
}

impl SafetyPolicy {
    /// Every harm category set to `BLOCK_NONE`
    pub fn permissive() -> Self {
        Self::uniform(BlockThreshold::BlockNone)
    }

    pub fn uniform(threshold: BlockThreshold) -> Self {
        Self {
            settings: HarmCategory::ALL
                .iter()
                .map(|&category| SafetySetting { category, threshold })
                .collect(),
        }
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

/// A single stateless prompt
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub format: ResponseFormat,
    pub safety: SafetyPolicy,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: ResponseFormat::Text,
            safety: SafetyPolicy::default(),
        }
    }

    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            format: ResponseFormat::Json,
            ..Self::text(prompt)
        }
    }

    pub fn with_safety(mut self, safety: SafetyPolicy) -> Self {
        self.safety = safety;
        self
    }
}

/// Best-effort text generation. Callers must treat the output as untrusted.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_policy_covers_all_categories() {
        let policy = SafetyPolicy::permissive();
        assert_eq!(policy.settings.len(), HarmCategory::ALL.len());
        assert!(policy
            .settings
            .iter()
            .all(|s| s.threshold == BlockThreshold::BlockNone));
    }

    #[test]
    fn test_safety_setting_wire_format() {
        let setting = SafetySetting {
            category: HarmCategory::CivicIntegrity,
            threshold: BlockThreshold::BlockNone,
        };
        let json = serde_json::to_value(setting).unwrap();
        assert_eq!(json["category"], "HARM_CATEGORY_CIVIC_INTEGRITY");
        assert_eq!(json["threshold"], "BLOCK_NONE");
    }

    #[test]
    fn test_json_request() {
        let request = CompletionRequest::json("hi");
        assert_eq!(request.format, ResponseFormat::Json);
        assert_eq!(request.safety, SafetyPolicy::permissive());
    }
}
