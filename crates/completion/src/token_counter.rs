//! Prompt token estimation.

use crate::messages::ChatMessage;

/// Average number of bytes of text per token.
const BYTES_PER_TOKEN: f64 = 3.5;

/// Estimate the number of prompt tokens in a list of messages.
///
/// The total byte length of every string `content` is divided by
/// [`BYTES_PER_TOKEN`] and truncated. This is a crude stand-in for a real
/// tokenizer and matches none in particular. Messages without content
/// contribute nothing.
pub(crate) fn estimate_prompt_tokens(messages: &[ChatMessage]) -> u32 {
    let length: usize = messages
        .iter()
        .filter_map(|message| message.content.as_deref())
        .map(str::len)
        .sum();

    (length as f64 / BYTES_PER_TOKEN) as u32
}
