use config::CompletionsConfig;
use jiff::Timestamp;

use crate::{
    id::generate_completion_id,
    messages::{
        AssistantMessage, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessageDelta, ChatRole,
        Completion, FinishReason, Usage,
    },
    token_counter::estimate_prompt_tokens,
};

/// Model reported when the request does not name one.
pub(crate) const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Prompt tokens reported when the request carries no message list.
pub(crate) const DEFAULT_PROMPT_TOKENS: u32 = 57;

/// Completion tokens reported for every reply.
pub(crate) const COMPLETION_TOKENS: u32 = 8;

/// The one reply the emulator ever gives.
pub(crate) const PLACEHOLDER_REPLY: &str = "Blank response from OpenAI API emulator.";

#[derive(Debug, Clone)]
pub(crate) struct CompletionServer {
    debug: bool,
}

impl CompletionServer {
    pub fn new(config: &CompletionsConfig) -> Self {
        Self { debug: config.debug }
    }

    /// Whether request and response bodies are echoed to the log.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Build the canned reply for a chat completion request.
    ///
    /// A request with `stream: true` gets the chunk shape, anything else the
    /// full message shape. Both carry the same identifier, model and usage
    /// rules.
    pub fn completions(&self, request: &ChatCompletionRequest) -> ChatCompletionResponse {
        let completion = if request.is_stream() {
            Completion::Chunk(ChatMessageDelta {
                role: None,
                content: Some(PLACEHOLDER_REPLY.to_string()),
            })
        } else {
            Completion::Full(AssistantMessage {
                role: ChatRole::Assistant,
                content: PLACEHOLDER_REPLY.to_string(),
            })
        };

        let prompt_tokens = request
            .messages
            .as_deref()
            .map(estimate_prompt_tokens)
            .unwrap_or(DEFAULT_PROMPT_TOKENS);

        ChatCompletionResponse {
            id: generate_completion_id(),
            object: completion.object_type(),
            created: Timestamp::now().as_second(),
            model: request.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            choices: vec![ChatChoice {
                index: 0,
                completion,
                finish_reason: FinishReason::Stop,
            }],
            usage: Usage::new(prompt_tokens, COMPLETION_TOKENS),
        }
    }
}
