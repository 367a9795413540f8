//! Intent Router — turns a free-text chat message into a reply and an
//! optional filter patch.
//!
//! A turn is a fixed pipeline over an accumulator threaded by value:
//! detect intent, dispatch on the intent kind, run exactly one handler,
//! finalize the reply. Handlers return only the fields they changed and
//! the driver merges them last-write-wins.

pub mod filters;
pub mod handlers;
pub mod intent;
pub mod prompts;

use std::sync::Arc;

use anyhow::Result;
use tracing::error;

use crate::llm_client::CompletionProvider;
use crate::models::{ConversationState, FilterUpdate};
use self::intent::IntentKind;

/// Reply shown when the pipeline fails unexpectedly. Model-capability
/// errors never reach this path — each call site degrades to its own
/// documented fallback instead.
const APOLOGY: &str = "I encountered an error processing your request. Please try again!";

/// What a single turn produced. The caller owns persistence: it appends
/// the user and assistant messages to the conversation and merges
/// `filter_update` into the accumulated filters.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub response: String,
    pub filter_update: Option<FilterUpdate>,
}

/// Accumulator threaded through the pipeline stages.
#[derive(Debug, Default)]
pub(crate) struct TurnState {
    pub response: Option<String>,
    pub filter_update: Option<FilterUpdate>,
}

impl TurnState {
    /// Last-write-wins merge of a stage's partial output.
    fn apply(&mut self, partial: TurnState) {
        if partial.response.is_some() {
            self.response = partial.response;
        }
        if partial.filter_update.is_some() {
            self.filter_update = partial.filter_update;
        }
    }
}

/// The dialogue engine. Stateless across turns: conversation history is
/// supplied by the caller and never mutated in place.
#[derive(Clone)]
pub struct Assistant {
    llm: Arc<dyn CompletionProvider>,
}

impl Assistant {
    pub fn new(llm: Arc<dyn CompletionProvider>) -> Self {
        Self { llm }
    }

    /// Processes one user turn. Never fails: unexpected internal errors
    /// collapse to a fixed apology with no partial result.
    pub async fn process_message(
        &self,
        user_id: &str,
        message: &str,
        conversation: &ConversationState,
    ) -> TurnOutcome {
        match self.run_pipeline(message, conversation).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("assistant pipeline error for user {user_id}: {e:?}");
                TurnOutcome {
                    response: APOLOGY.to_string(),
                    filter_update: None,
                }
            }
        }
    }

    async fn run_pipeline(
        &self,
        message: &str,
        _conversation: &ConversationState,
    ) -> Result<TurnOutcome> {
        // Stage 1: classify. Failures are swallowed inside detect_intent;
        // this stage always yields a usable intent.
        let intent = intent::detect_intent(self.llm.as_ref(), message).await;

        // Stages 2 and 3: exhaustive dispatch to exactly one handler.
        let partial = match intent.kind {
            IntentKind::SearchJobs => handlers::search_jobs(&intent),
            IntentKind::UpdateFilters => handlers::update_filters(&intent),
            IntentKind::Help => handlers::help(message),
            IntentKind::GeneralChat => handlers::general_chat(self.llm.as_ref(), message).await,
        };

        let mut turn = TurnState::default();
        turn.apply(partial);

        // Stage 4: render the final reply.
        let response = finalize_response(&turn);

        Ok(TurnOutcome {
            response,
            filter_update: turn.filter_update,
        })
    }
}

/// Stage 4: appends a machine-readable filter summary to the handler's
/// reply, or falls back to a generic acknowledgement.
fn finalize_response(turn: &TurnState) -> String {
    if let Some(update) = &turn.filter_update {
        if let Some(summary) = filter_summary(update) {
            return match &turn.response {
                Some(response) => format!("{response}\n\n{summary}"),
                None => summary,
            };
        }
    }

    turn.response
        .clone()
        .unwrap_or_else(|| "I'm processing your request...".to_string())
}

/// Renders `Filters updated: key: value, ...` for a non-empty update.
/// Empty-string and empty-list values are omitted; list values are
/// comma-joined. Field order is fixed. Returns None when nothing renders.
fn filter_summary(update: &FilterUpdate) -> Option<String> {
    let mut pairs: Vec<String> = Vec::new();

    if let Some(role) = &update.role {
        if !role.is_empty() {
            pairs.push(format!("role: {role}"));
        }
    }
    if let Some(skills) = &update.skills {
        if !skills.is_empty() {
            pairs.push(format!("skills: {}", skills.join(", ")));
        }
    }
    if let Some(date_posted) = &update.date_posted {
        pairs.push(format!("datePosted: {}", date_posted.as_str()));
    }
    if let Some(job_type) = &update.job_type {
        if !job_type.is_empty() {
            pairs.push(format!("jobType: {}", job_type.join(", ")));
        }
    }
    if let Some(work_mode) = &update.work_mode {
        if !work_mode.is_empty() {
            pairs.push(format!("workMode: {}", work_mode.join(", ")));
        }
    }
    if let Some(location) = &update.location {
        if !location.is_empty() {
            pairs.push(format!("location: {location}"));
        }
    }
    if let Some(match_score) = &update.match_score {
        pairs.push(format!("matchScore: {}", match_score.as_str()));
    }

    if pairs.is_empty() {
        None
    } else {
        Some(format!("Filters updated: {}", pairs.join(", ")))
    }
}
