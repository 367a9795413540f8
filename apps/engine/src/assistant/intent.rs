//! Intent detection — classifies a user message into one of four intents
//! via the completion capability, with a hard fallback to general chat.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::assistant::prompts::INTENT_PROMPT_TEMPLATE;
use crate::llm_client::{strip_json_fences, CompletionParams, CompletionProvider};

/// The four things a user turn can ask for. Closed set: anything the
/// classifier returns outside it collapses to `GeneralChat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    SearchJobs,
    UpdateFilters,
    Help,
    GeneralChat,
}

impl IntentKind {
    /// Maps the classifier's `type` string onto the closed set,
    /// defaulting to `GeneralChat` for anything missing or unrecognized.
    pub fn parse(s: &str) -> Self {
        match s {
            "search_jobs" => IntentKind::SearchJobs,
            "update_filters" => IntentKind::UpdateFilters,
            "help" => IntentKind::Help,
            _ => IntentKind::GeneralChat,
        }
    }
}

/// A classified turn. `parameters` is the classifier's untyped bag; the
/// handlers validate and coerce it into typed filter fields, and it
/// never leaks past them.
#[derive(Debug, Clone)]
pub struct Intent {
    pub kind: IntentKind,
    pub parameters: Map<String, Value>,
    pub confidence: f64,
}

impl Intent {
    /// The fallback produced when classification fails for any reason.
    pub fn general_chat_fallback() -> Self {
        Self {
            kind: IntentKind::GeneralChat,
            parameters: Map::new(),
            confidence: 0.5,
        }
    }
}

/// Wire shape of the classifier's JSON reply.
#[derive(Debug, Deserialize)]
struct RawIntent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    parameters: Map<String, Value>,
    confidence: Option<f64>,
}

/// Classifies the latest user message.
///
/// This is the sole place capability errors are swallowed rather than
/// surfaced: intent classification must never fail the whole turn.
pub async fn detect_intent(llm: &dyn CompletionProvider, message: &str) -> Intent {
    let prompt = INTENT_PROMPT_TEMPLATE.replace("{message}", message);

    let reply = match llm
        .complete(&prompt, CompletionParams { temperature: 0.7 })
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            warn!("intent classification call failed, falling back to general chat: {e}");
            return Intent::general_chat_fallback();
        }
    };

    match serde_json::from_str::<RawIntent>(strip_json_fences(&reply)) {
        Ok(raw) => Intent {
            kind: IntentKind::parse(&raw.kind),
            parameters: raw.parameters,
            confidence: raw.confidence.unwrap_or(0.8),
        },
        Err(e) => {
            warn!("intent classification reply was not valid JSON, falling back to general chat: {e}");
            Intent::general_chat_fallback()
        }
    }
}
