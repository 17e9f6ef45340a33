//! Per-turn orchestration: classify → (retrieve → assemble) → generate →
//! remember.
//!
//! One sequential path per user turn. Retrieval and generation failures
//! propagate to the caller; an empty retrieval is not a failure and falls
//! back to the ungrounded prompt.

use std::sync::Arc;

use crate::core::errors::ApiError;
use crate::history::{HistoryStore, Role, DEFAULT_CONTEXT_TURNS};
use crate::llm::LlmProvider;
use crate::prompts;
use crate::query::classifier;
use crate::rag::{ContextBuilder, Retriever};

pub struct QueryProcessor {
    retriever: Retriever,
    context_builder: ContextBuilder,
    llm: Arc<dyn LlmProvider>,
    history: Arc<HistoryStore>,
}

impl QueryProcessor {
    pub fn new(
        retriever: Retriever,
        context_builder: ContextBuilder,
        llm: Arc<dyn LlmProvider>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            retriever,
            context_builder,
            llm,
            history,
        }
    }

    /// Process one user turn and return the assistant response.
    ///
    /// Both the user message and the response are appended to the session
    /// log; the recent-context window therefore includes the current query.
    pub async fn process(&self, session_id: &str, user_query: &str) -> Result<String, ApiError> {
        self.history.append(session_id, Role::User, user_query).await;
        let conversation = self
            .history
            .recent_context(session_id, DEFAULT_CONTEXT_TURNS)
            .await;

        let prompt = if classifier::is_domain_relevant(user_query) {
            let candidates = self.retriever.retrieve(user_query).await?;
            let context = self.context_builder.assemble(&candidates);
            if context.is_empty() {
                tracing::debug!("no grounding found for domain query, answering ungrounded");
                prompts::ungrounded(&conversation, user_query)
            } else {
                prompts::grounded(&context, &conversation, user_query)
            }
        } else {
            prompts::ungrounded(&conversation, user_query)
        };

        let response = self.llm.generate(&prompt).await?;

        self.history
            .append(session_id, Role::Assistant, &response)
            .await;

        Ok(response)
    }
}
