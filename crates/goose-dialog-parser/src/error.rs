//! Error types returned by the parser.

/// Errors the parser can return.
///
/// Grammatical ambiguity is never represented here: per the grammar, anything
/// the state machine cannot classify as a call simply becomes markdown. Only
/// the two fatal kinds below reach a caller, and both are terminal: once
/// either is returned, the parser that produced it must be discarded.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
    /// The parser's own bookkeeping disagreed with itself (for example, a
    /// `callStart` mention that does not match the call already under
    /// construction). This can only indicate a bug in the parser.
    #[error("internal consistency violation: {0}")]
    Inconsistent(String),

    /// A receiver callback returned an error. The parser's internal state is
    /// undefined afterward; the caller must not call `consume` or `finish`
    /// again on this instance.
    #[error("receiver callback failed: {0}")]
    Receiver(#[source] Box<dyn std::error::Error + Send + Sync>),
}
