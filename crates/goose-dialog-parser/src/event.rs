//! The receiver capability the parser emits events through.
//!
//! The source this crate is modeled on passed a dynamic object with many
//! optional callbacks. That makes a missing handler a silent no-op instead
//! of a compile error, and gives no static guarantee events arrive in the
//! order §3 promises. Here every operation is a required trait method on an
//! explicit capability, the same shape `mcp-core`'s transport traits take:
//! a caller that only cares about markdown still has to write (possibly
//! trivial) implementations of every other method, so an event-order bug
//! shows up as a type error in the receiver, not a missing call at runtime.

use async_trait::async_trait;

/// Ordered event callbacks the parser drives a receiver through.
///
/// Every method may suspend (for example to await I/O); the parser awaits
/// each call before advancing its own state, so the receiver observes
/// events in the same serial order the single-threaded state machine
/// produces them in.
#[async_trait]
pub trait Receiver: Send {
    /// The error type a callback may fail with. Propagated to the parser's
    /// caller as [`crate::ParserError::Receiver`]; once any callback fails
    /// the parser instance must be discarded.
    type Error: std::error::Error + Send + Sync + 'static;

    async fn markdown_start(&mut self) -> Result<(), Self::Error>;
    async fn markdown_chunk(&mut self, text: &str) -> Result<(), Self::Error>;
    async fn markdown_finish(&mut self) -> Result<(), Self::Error>;

    async fn call_start(&mut self, first_mention: &str) -> Result<(), Self::Error>;
    async fn call_head_line_chunk(&mut self, text: &str) -> Result<(), Self::Error>;
    async fn call_head_line_finish(&mut self) -> Result<(), Self::Error>;

    /// `info_line` is present iff the body is wholly triple-fenced; its
    /// value is the opening fence, verbatim (exactly three backticks; the
    /// current grammar carries no language tag on a call body).
    async fn call_body_start(&mut self, info_line: Option<&str>) -> Result<(), Self::Error>;
    async fn call_body_chunk(&mut self, text: &str) -> Result<(), Self::Error>;
    /// `end_quote` is present iff the body was triple-fenced.
    async fn call_body_finish(&mut self, end_quote: Option<&str>) -> Result<(), Self::Error>;

    async fn call_finish(&mut self, call_id: &str) -> Result<(), Self::Error>;

    async fn code_block_start(&mut self, info_line: &str) -> Result<(), Self::Error>;
    async fn code_block_chunk(&mut self, text: &str) -> Result<(), Self::Error>;
    async fn code_block_finish(&mut self, end_quote: &str) -> Result<(), Self::Error>;
}
