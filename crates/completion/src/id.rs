//! Completion identifiers.

use rand::{Rng, distributions::Alphanumeric};

/// Prefix shared by every completion identifier.
pub(crate) const COMPLETION_ID_PREFIX: &str = "chatcmpl-";

const RANDOM_PART_LEN: usize = 30;

/// Generates an identifier in the `chatcmpl-<30 alphanumerics>` format.
///
/// The random part comes from the thread-local generator and is not meant to
/// be unguessable.
pub(crate) fn generate_completion_id() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_PART_LEN)
        .map(char::from)
        .collect();

    format!("{COMPLETION_ID_PREFIX}{random}")
}
