//! Job-search assistant engines: an intent-routing dialogue engine and a
//! resume-vs-job match scorer, both consuming a pluggable text-completion
//! capability. HTTP, auth, and data plumbing live with the caller.

pub mod assistant;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod matching;
pub mod models;
pub mod service;
pub mod store;

pub use assistant::{Assistant, TurnOutcome};
pub use config::Config;
pub use errors::EngineError;
pub use llm_client::{CompletionError, CompletionParams, CompletionProvider, LlmClient};
pub use matching::{score_jobs, MatchEngine, MatchExplanation, MatchScore};
pub use service::AssistantService;
pub use store::{ConversationStore, JsonFileStore, StoreError};
