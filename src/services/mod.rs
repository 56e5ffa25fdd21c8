// Service exports
pub mod completion;
pub mod gemini;
pub mod seed;
pub mod store;

pub use completion::{CompletionService, CompletionRequest, CompletionError, ResponseFormat, SafetyPolicy, HarmCategory, BlockThreshold};
pub use gemini::GeminiClient;
pub use seed::{default_mentors, load_seed_file};
pub use store::{MentorStore, InMemoryMentorStore, StoreError};
