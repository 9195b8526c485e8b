//! Call record types.

/// A call as recorded while its headline and body are still streaming in.
///
/// This mirrors the emitted event stream rather than duplicating it: the
/// headline and body text accumulated here exist only so that
/// [`crate::call_id::compute`] has the exact normalized bytes to hash once
/// the call finishes, not because the parser needs to re-deliver them.
#[derive(Debug, Default, Clone)]
pub(crate) struct CallInProgress {
    pub first_mention: String,
    pub head_line: String,
    pub body: String,
    pub has_body: bool,
    pub is_triple_quoted_body: bool,
}

impl CallInProgress {
    pub fn new(first_mention: String) -> Self {
        Self {
            first_mention,
            head_line: String::new(),
            body: String::new(),
            has_body: false,
            is_triple_quoted_body: false,
        }
    }
}

/// A finalized call: the target mention, its headline, an optional body, and
/// the content-addressed id computed at the moment it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCall {
    pub first_mention: String,
    pub head_line: String,
    pub body: Option<String>,
    pub call_id: String,
}
