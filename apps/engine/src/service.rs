//! Owning service — the caller-side choreography around the router:
//! load the conversation, run the turn, append both messages, merge the
//! filter patch into the accumulated filters, save.
//!
//! Assumes at most one in-flight turn per user; callers wanting
//! concurrency must serialize per user id.

use std::sync::Arc;

use tracing::info;

use crate::assistant::{Assistant, TurnOutcome};
use crate::errors::EngineError;
use crate::models::{ConversationState, Message};
use crate::store::ConversationStore;

pub struct AssistantService {
    assistant: Assistant,
    store: Arc<dyn ConversationStore>,
}

impl AssistantService {
    pub fn new(assistant: Assistant, store: Arc<dyn ConversationStore>) -> Self {
        Self { assistant, store }
    }

    /// Runs one chat turn for a user and persists the updated
    /// conversation.
    pub async fn process_message(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<TurnOutcome, EngineError> {
        let mut state = self
            .store
            .load(user_id)
            .await?
            .unwrap_or_else(|| ConversationState::new(user_id));

        let outcome = self.assistant.process_message(user_id, message, &state).await;

        state.messages.push(Message::user(message));
        state.messages.push(Message::assistant(
            outcome.response.clone(),
            outcome.filter_update.clone(),
        ));

        if let Some(update) = &outcome.filter_update {
            state.current_filters.merge(update);
        }

        self.store.save(user_id, &state).await?;

        Ok(outcome)
    }

    /// Returns the stored conversation, or a fresh empty one.
    pub async fn get_conversation(
        &self,
        user_id: &str,
    ) -> Result<ConversationState, EngineError> {
        Ok(self
            .store
            .load(user_id)
            .await?
            .unwrap_or_else(|| ConversationState::new(user_id)))
    }

    /// Resets a user's conversation to empty. A user never seen before
    /// is left untouched.
    pub async fn clear_conversation(&self, user_id: &str) -> Result<(), EngineError> {
        if self.store.load(user_id).await?.is_some() {
            self.store
                .save(user_id, &ConversationState::new(user_id))
                .await?;
            info!("cleared conversation for user {user_id}");
        }
        Ok(())
    }
}
