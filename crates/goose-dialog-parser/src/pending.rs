//! Tagged representation of a deferred lookahead decision.
//!
//! The grammar has several points where one character is not enough to
//! decide what is happening (a newline inside a headline might start
//! continuation indentation, a body, a fresh call, or a terminator; a
//! backtick might start an inline span or a triple fence). Rather than a
//! handful of independently-settable boolean flags, the pending decision is
//! always exactly one of these variants at a time, which makes the mutual
//! exclusion of "what are we waiting to find out" explicit at the type
//! level.

/// A lookahead decision in progress, carried across `consume` calls when a
/// chunk boundary lands before enough input has arrived to resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingLookahead {
    /// No lookahead decision is in progress.
    None,

    /// Saw `@` immediately followed by end of input at a line-start
    /// position; waiting to see whether the next character is `/` (a
    /// terminator) or something else (a new call).
    AtAtEol { was_line_start: bool },

    /// Saw a newline while reading a call headline; accumulating leading
    /// whitespace (tabs/spaces) while deciding whether this is headline
    /// continuation, a body start, a fresh call, or a terminator.
    HeadlineNewline { indent: String },

    /// Same as `HeadlineNewline`, but the character after the indentation
    /// was `@`; waiting on one more character to distinguish a fresh call
    /// (`@mention`) from a terminator (`@/`).
    HeadlineNewlineSawAt { indent: String },

    /// Counting an initial run of backticks at a position that could open a
    /// fenced code block or a triple-fenced call body.
    InitialBackticks { count: u32 },
}

impl Default for PendingLookahead {
    fn default() -> Self {
        PendingLookahead::None
    }
}
