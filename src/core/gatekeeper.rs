use crate::core::prompts::topic_restricted_prompt;
use crate::services::{CompletionRequest, CompletionService, SafetyPolicy};
use std::sync::Arc;

/// Query used when the caller supplied nothing usable
pub const DEFAULT_QUERY: &str = "Is this Python related?";

/// Single-topic conversational policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPolicy {
    /// Permitted topic, as phrased inside the instruction
    pub topic: String,
    pub on_topic_examples: String,
    pub off_topic_examples: String,
    /// Sentence the model must answer with for off-topic input
    pub refusal: String,
    /// Reply when the model returned no text
    pub fallback: String,
    /// Reply when the completion call failed
    pub error_reply: String,
}

impl TopicPolicy {
    pub fn python() -> Self {
        Self {
            topic: "the Python programming language".to_string(),
            on_topic_examples: r#""how to define a function in python?", "what are python lists?", "explain python decorators""#.to_string(),
            off_topic_examples: r#""hello", "what is Java?", "tell me a joke", "who are you?", "what is Wisdom Bridge?""#.to_string(),
            refusal: "Sorry, I can only discuss topics related to the Python programming language.".to_string(),
            fallback: "I'm sorry, I couldn't generate a response for that. I can only discuss Python topics.".to_string(),
            error_reply: "An unexpected error occurred. Please try again later. I can only assist with Python-related queries.".to_string(),
        }
    }
}

impl Default for TopicPolicy {
    fn default() -> Self {
        Self::python()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

/// Answers chat messages, restricted to one topic by the prompt
///
/// The restriction is enforced by the model; this type only shapes input and
/// guards the output. Each call is independent of any previous one.
#[derive(Clone)]
pub struct Gatekeeper {
    completion: Arc<dyn CompletionService>,
    policy: TopicPolicy,
    safety: SafetyPolicy,
}

impl Gatekeeper {
    pub fn new(completion: Arc<dyn CompletionService>, policy: TopicPolicy) -> Self {
        Self {
            completion,
            policy,
            safety: SafetyPolicy::permissive(),
        }
    }

    pub fn with_safety(mut self, safety: SafetyPolicy) -> Self {
        self.safety = safety;
        self
    }

    pub fn policy(&self) -> &TopicPolicy {
        &self.policy
    }

    /// Render the instruction sent for a (sanitized) query
    pub fn build_prompt(&self, query: &str) -> String {
        topic_restricted_prompt(
            &self.policy.topic,
            &self.policy.on_topic_examples,
            &self.policy.off_topic_examples,
            &self.policy.refusal,
            query,
        )
    }

    /// Reply to a user message. Never fails.
    pub async fn reply(&self, query: Option<&str>) -> ChatReply {
        let query = sanitize_query(query);
        tracing::info!("Chat query received ({} chars)", query.len());

        let request = CompletionRequest::text(self.build_prompt(query)).with_safety(self.safety.clone());

        match self.completion.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!("Chat reply: {}", text.chars().take(100).collect::<String>());
                ChatReply { text }
            }
            Ok(_) => {
                tracing::warn!("Completion returned empty text, using fallback reply");
                ChatReply {
                    text: self.policy.fallback.clone(),
                }
            }
            Err(e) => {
                tracing::error!("Chat completion failed: {}", e);
                ChatReply {
                    text: self.policy.error_reply.clone(),
                }
            }
        }
    }
}

/// Use the caller's query, or the default when it is missing or blank
pub fn sanitize_query(query: Option<&str>) -> &str {
    match query {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            tracing::warn!("Missing or empty chat query, using default");
            DEFAULT_QUERY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query(None), DEFAULT_QUERY);
        assert_eq!(sanitize_query(Some("   ")), DEFAULT_QUERY);
        assert_eq!(sanitize_query(Some("what is a tuple?")), "what is a tuple?");
    }

    #[test]
    fn test_python_policy_prompt() {
        let policy = TopicPolicy::python();
        let prompt = topic_restricted_prompt(
            &policy.topic,
            &policy.on_topic_examples,
            &policy.off_topic_examples,
            &policy.refusal,
            "what are generators?",
        );

        assert!(prompt.contains(&format!("\"{}\"", policy.refusal)));
        assert!(prompt.ends_with("User query: what are generators?"));
        assert!(prompt.contains("Your ONLY function is to answer questions about the Python programming language."));
    }
}
