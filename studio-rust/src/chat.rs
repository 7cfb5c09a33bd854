use std::sync::Arc;

use marketgenius_sdk::{LanguageModel, LanguageModelInput, Message, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    export,
    opentelemetry::{trace_step, Workflow, WorkflowSpan},
    prompts::STRATEGIST_SYSTEM_PROMPT,
    StudioError, StudioResult,
};

pub const GREETING: &str =
    "Hello! I'm Gaim, your AI marketing strategist. How can I help you today?";
pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Ai,
    User,
}

/// One bubble of the visible conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }
}

/// Conversation with the strategist persona.
///
/// `messages` is what a front end shows, including the greeting and error
/// replies. Only completed exchanges are sent back to the model as history.
pub struct ChatSession {
    model: Arc<dyn LanguageModel>,
    messages: Vec<ChatMessage>,
    history: Vec<Message>,
    is_loading: bool,
}

impl ChatSession {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            messages: vec![ChatMessage::ai(GREETING)],
            history: Vec::new(),
            is_loading: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Sends `text` with the conversation so far and appends the reply.
    /// On failure the apology reply is appended and the error returned.
    pub async fn send(&mut self, text: &str) -> StudioResult<&str> {
        if text.trim().is_empty() || self.is_loading {
            return Err(StudioError::InvalidState(
                "a message is required to chat".to_string(),
            ));
        }

        self.messages.push(ChatMessage::user(text));
        self.is_loading = true;

        let user_turn = Message::user(vec![Part::text(text)]);
        let mut messages = self.history.clone();
        messages.push(user_turn.clone());
        let input = LanguageModelInput {
            system_prompt: Some(STRATEGIST_SYSTEM_PROMPT.to_string()),
            messages,
            ..Default::default()
        };

        debug!(model = %self.model.model_id(), turns = self.history.len(), "sending chat message");
        let span = WorkflowSpan::new(Workflow::Chat, "send")
            .with_attribute("gen_ai.request.model", self.model.model_id());
        let outcome = trace_step(span, async {
            self.model.generate(input).await.map_err(StudioError::from)
        })
        .await;
        self.is_loading = false;

        match outcome {
            Ok(response) => {
                let reply = response.text();
                self.history.push(user_turn);
                self.history.push(Message::assistant(response.content));
                self.messages.push(ChatMessage::ai(reply));
                Ok(&self.messages[self.messages.len() - 1].text)
            }
            Err(error) => {
                tracing::error!(%error, "chat message failed");
                self.messages.push(ChatMessage::ai(CHAT_ERROR_REPLY));
                Err(error)
            }
        }
    }

    #[must_use]
    pub fn transcript(&self) -> String {
        export::chat_transcript(&self.messages)
    }
}
