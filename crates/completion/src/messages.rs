use serde::{
    Deserialize, Deserializer, Serialize,
    de::{DeserializeOwned, Error as _},
};
use serde_json::{Map, Value};

/// OpenAI-compatible chat completion request.
///
/// Every field is optional. A field holding a value of an unexpected type is
/// treated as if it was not sent at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatCompletionRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) messages: Option<Vec<ChatMessage>>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) stream: Option<bool>,
}

impl ChatCompletionRequest {
    /// Decodes a request body, which must start with a JSON object.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD, and anything after the first
    /// value is ignored.
    pub(crate) fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let body = String::from_utf8_lossy(body);

        let object = serde_json::Deserializer::from_str(&body)
            .into_iter::<Map<String, Value>>()
            .next()
            .unwrap_or_else(|| Err(serde_json::Error::custom("request body holds no JSON value")))?;

        Self::deserialize(Value::Object(object))
    }

    /// Whether the caller asked for the chunk-shaped response.
    pub(crate) fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

/// Chat message in OpenAI format.
///
/// Only the content is kept. Elements of the `messages` array that are not
/// objects, or whose content is not a string, decode into an empty message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub(crate) struct ChatMessage {
    pub(crate) content: Option<String>,
}

impl From<Value> for ChatMessage {
    fn from(value: Value) -> Self {
        let content = value.get("content").and_then(Value::as_str).map(str::to_owned);

        Self { content }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Object type discriminator of a completion response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum ObjectType {
    #[serde(rename = "chat.completion")]
    ChatCompletion,
    #[serde(rename = "chat.completion.chunk")]
    ChatCompletionChunk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ChatRole {
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum FinishReason {
    #[serde(rename = "STOP")]
    Stop,
}

/// A complete assistant message.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AssistantMessage {
    pub(crate) role: ChatRole,
    pub(crate) content: String,
}

/// Incremental message fragment of a chunk.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessageDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role: Option<ChatRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) content: Option<String>,
}

/// The body of the single choice, which decides the response shape.
///
/// Serialized flattened into the choice, so `Full` renders as a `message`
/// key and `Chunk` as a `delta` key.
#[derive(Debug, Clone, Serialize)]
pub(crate) enum Completion {
    #[serde(rename = "message")]
    Full(AssistantMessage),
    #[serde(rename = "delta")]
    Chunk(ChatMessageDelta),
}

impl Completion {
    pub(crate) fn object_type(&self) -> ObjectType {
        match self {
            Completion::Full(_) => ObjectType::ChatCompletion,
            Completion::Chunk(_) => ObjectType::ChatCompletionChunk,
        }
    }
}

/// Chat completion choice.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatChoice {
    pub(crate) index: u32,
    #[serde(flatten)]
    pub(crate) completion: Completion,
    pub(crate) finish_reason: FinishReason,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Usage {
    pub(crate) prompt_tokens: u32,
    pub(crate) completion_tokens: u32,
    pub(crate) total_tokens: u32,
}

impl Usage {
    pub(crate) fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// OpenAI-compatible chat completion response, in either the full or the chunk shape.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionResponse {
    pub(crate) id: String,
    pub(crate) object: ObjectType,
    pub(crate) created: i64,
    pub(crate) model: String,
    pub(crate) choices: Vec<ChatChoice>,
    pub(crate) usage: Usage,
}
