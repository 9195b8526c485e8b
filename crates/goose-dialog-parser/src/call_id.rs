//! Content-addressed `callId` computation.
//!
//! Grounded in `crates/goose/src/tracing/client_fingerprint.rs`, which
//! derives a stable identifier the same way: hash normalized input bytes
//! with `sha2` and render them with `hex`. Both crates are already workspace
//! dependencies, are deterministic across platforms, and need no
//! cross-platform-hash caveats the way a language-provided hasher would.

use sha2::{Digest, Sha256};

/// Number of hex characters the id is truncated to (128 bits of the
/// underlying SHA-256 digest). Collision resistance at this width is far
/// beyond what correlating calls within a single conversation requires.
const CALL_ID_HEX_LEN: usize = 32;

/// Normalizes a headline or body for hashing: CRLF is folded to LF and
/// trailing whitespace is stripped. Leading content is left untouched,
/// since the grammar already strips leading whitespace itself before this
/// text reaches the call record.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

/// Computes the `callId` for a finished call.
///
/// The hash input is the trimmed first mention, the normalized headline, and
/// the normalized body, joined by single newlines, with the per-parser call
/// counter appended as a final field rather than carried separately — this
/// keeps call-id computation to a single hash invocation on the hot path
/// while still making a replay of identical bytes produce identical ids and
/// two textually identical calls within one stream produce distinct ones.
pub(crate) fn compute(first_mention: &str, head_line: &str, body: Option<&str>, counter: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(first_mention.trim().as_bytes());
    hasher.update(b"\n");
    hasher.update(normalize(head_line).as_bytes());
    hasher.update(b"\n");
    hasher.update(normalize(body.unwrap_or("")).as_bytes());
    hasher.update(b"\n");
    hasher.update(counter.to_le_bytes());
    let digest = hasher.finalize();
    let full_hex = hex::encode(digest);
    full_hex[..CALL_ID_HEX_LEN].to_string()
}
