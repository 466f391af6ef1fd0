//! Conversational learning assistant. One prompt round-trip per message.

use std::sync::Arc;

use tracing::warn;

use crate::domain::AssistantReply;
use crate::ports::TextCompletionPort;

const BASE_PROMPT: &str = "You are an AI learning assistant helping users understand concepts \
and achieve their learning goals. Your responses should be:\n\
1. Clear and concise\n\
2. Include practical examples\n\
3. Break down complex concepts\n\
4. Encourage active learning\n\
5. Validate understanding through questions\n\
\n\
Always maintain a supportive and encouraging tone.";

pub struct AssistantService {
    ai: Arc<dyn TextCompletionPort>,
}

impl AssistantService {
    pub fn new(ai: Arc<dyn TextCompletionPort>) -> Self {
        Self { ai }
    }

    /// Send one chat message, optionally carrying prior conversation context.
    pub async fn chat(&self, message: &str, context: Option<&str>) -> AssistantReply {
        let prompt = match context {
            Some(ctx) => format!("{BASE_PROMPT}\nPrevious context: {ctx}\nUser: {message}"),
            None => format!("{BASE_PROMPT}\nUser: {message}"),
        };

        match self.ai.complete(&prompt).await {
            Ok(reply) => AssistantReply::ok(reply),
            Err(e) => {
                warn!(error = %e, "assistant chat failed");
                AssistantReply::err(e.to_string())
            }
        }
    }
}
