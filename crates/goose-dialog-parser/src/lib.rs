//! Streaming parser for the dialog tool-invocation grammar.
//!
//! A single pipeline turns partial text produced incrementally by a
//! language model into a strictly ordered stream of structured events: free
//! text (markdown), tool/agent invocation calls (`@mention ...`), and
//! triple-backtick-fenced code blocks. The defining property of the parser
//! is that the emitted event sequence is invariant under arbitrary
//! re-chunking of the input — a caller can feed it one byte at a time or
//! the whole stream at once and a receiver observes the same sequence of
//! calls either way.
//!
//! This crate does not resolve mentions to agents, does not execute or
//! validate call semantics, and does not buffer the full input; it is
//! purely the grammar layer other subsystems build on.
//!
//! ```
//! # use goose_dialog_parser::{Parser, Receiver};
//! # use async_trait::async_trait;
//! # #[derive(Debug, thiserror::Error)]
//! # #[error("unreachable")]
//! # struct Never;
//! # #[derive(Default)]
//! # struct Collector { markdown: String }
//! # #[async_trait]
//! # impl Receiver for Collector {
//! #     type Error = Never;
//! #     async fn markdown_start(&mut self) -> Result<(), Never> { Ok(()) }
//! #     async fn markdown_chunk(&mut self, text: &str) -> Result<(), Never> {
//! #         self.markdown.push_str(text);
//! #         Ok(())
//! #     }
//! #     async fn markdown_finish(&mut self) -> Result<(), Never> { Ok(()) }
//! #     async fn call_start(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! #     async fn call_head_line_chunk(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! #     async fn call_head_line_finish(&mut self) -> Result<(), Never> { Ok(()) }
//! #     async fn call_body_start(&mut self, _: Option<&str>) -> Result<(), Never> { Ok(()) }
//! #     async fn call_body_chunk(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! #     async fn call_body_finish(&mut self, _: Option<&str>) -> Result<(), Never> { Ok(()) }
//! #     async fn call_finish(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! #     async fn code_block_start(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! #     async fn code_block_chunk(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! #     async fn code_block_finish(&mut self, _: &str) -> Result<(), Never> { Ok(()) }
//! # }
//! # async fn run() -> Result<(), goose_dialog_parser::ParserError> {
//! let mut parser = Parser::new(Collector::default());
//! parser.consume("hello world\n").await?;
//! parser.finish().await?;
//! # Ok(())
//! # }
//! ```

mod call;
mod call_id;
mod classify;
mod error;
mod event;
mod fence;
mod mentions;
mod pending;
mod state;

pub use call::CompletedCall;
pub use error::ParserError;
pub use event::Receiver;
pub use mentions::{extract_mentions, extract_mentions_iter};
pub use state::{Mode, Parser};
