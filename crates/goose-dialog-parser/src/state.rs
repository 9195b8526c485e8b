//! The six-mode state machine driving [`Parser::consume`] and
//! [`Parser::finish`].
//!
//! Every public behavior here is driven character by character. Lookahead
//! decisions that need one more character than is currently available (a
//! `@` that might be `@/`, a newline in a headline that might start
//! continuation indentation, three backticks that might close a
//! triple-fenced body) are represented as a [`PendingLookahead`] value
//! carried on the parser. A pending decision is resolved by peeking — never
//! consuming — the next character; if no next character is available
//! within the current chunk, resolution simply waits for the next call to
//! [`Parser::consume`], which is what keeps a parser's memory use bounded
//! regardless of where chunk boundaries fall.

use std::str::Chars;
use std::iter::Peekable;

use crate::call::{CallInProgress, CompletedCall};
use crate::call_id;
use crate::classify::{self, is_mention_char, Class};
use crate::error::ParserError;
use crate::event::Receiver;
use crate::fence::FenceTracker;
use crate::pending::PendingLookahead;

/// Which of the six grammar modes the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FreeText,
    TextingCallHeadline,
    TextingCallBeforeBody,
    TextingCallBody,
    CodeBlockInfo,
    CodeBlockContent,
}

fn recv_err<E>(e: E) -> ParserError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ParserError::Receiver(Box::new(e))
}

fn is_indent_char(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Streaming parser for the dialog tool-invocation grammar.
///
/// Constructed once with a [`Receiver`], fed zero or more chunks via
/// [`Parser::consume`], then finalized exactly once via [`Parser::finish`].
/// After `finish` returns successfully the parser is terminal: feeding it
/// more chunks is a contract violation the caller is responsible for
/// avoiding, the same way `ToolMonitor` documents caller obligations in
/// prose rather than enforcing them in the type system.
pub struct Parser<R: Receiver> {
    receiver: R,
    mode: Mode,
    fence: FenceTracker,
    pending: PendingLookahead,
    pending_at_mid_run: bool,
    at_line_start: bool,
    fence_run_line_start: bool,

    mention_acc: String,
    call_start_emitted: bool,
    headline_buf: String,
    body_buf: String,
    markdown_buf: String,
    markdown_open: bool,
    code_info_buf: String,
    code_content_buf: String,

    current_call: Option<CallInProgress>,
    completed_calls: Vec<CompletedCall>,
    call_counter: u64,
    finished: bool,
}

impl<R: Receiver> Parser<R> {
    /// Buffer capacities are not configurable: the grammar bounds each of
    /// these to, at most, one mention/headline/body/code-block segment
    /// between flush points, so a fixed starting reservation is enough to
    /// avoid repeated small reallocations without inviting unbounded growth.
    const STARTING_BUFFER_CAPACITY: usize = 64;

    /// Builds a new parser around `receiver`. The receiver is driven
    /// exclusively through [`Parser::consume`] and [`Parser::finish`].
    pub fn new(receiver: R) -> Self {
        Self {
            receiver,
            mode: Mode::FreeText,
            fence: FenceTracker::new(),
            pending: PendingLookahead::None,
            pending_at_mid_run: false,
            at_line_start: true,
            fence_run_line_start: true,
            mention_acc: String::new(),
            call_start_emitted: false,
            headline_buf: String::with_capacity(Self::STARTING_BUFFER_CAPACITY),
            body_buf: String::with_capacity(Self::STARTING_BUFFER_CAPACITY),
            markdown_buf: String::with_capacity(Self::STARTING_BUFFER_CAPACITY),
            markdown_open: false,
            code_info_buf: String::new(),
            code_content_buf: String::with_capacity(Self::STARTING_BUFFER_CAPACITY),
            current_call: None,
            completed_calls: Vec::new(),
            call_counter: 0,
            finished: false,
        }
    }

    /// The mode the parser is currently in. Read-only introspection for a
    /// host that wants to show, e.g., "streaming a code block" in a status
    /// line without re-deriving it from the event stream.
    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    /// A snapshot of every call finalized so far, in completion order.
    pub fn collected_calls(&self) -> &[CompletedCall] {
        &self.completed_calls
    }

    /// Bytes currently held in the markdown buffer, awaiting a flush.
    pub fn pending_markdown_len(&self) -> usize {
        self.markdown_buf.len()
    }

    /// Bytes currently held in the code-block content buffer, awaiting a
    /// flush.
    pub fn pending_code_block_len(&self) -> usize {
        self.code_content_buf.len()
    }

    /// Feeds one chunk of input through the state machine, awaiting every
    /// receiver callback it produces before returning.
    pub async fn consume(&mut self, chunk: &str) -> Result<(), ParserError> {
        if self.finished {
            return Err(ParserError::Inconsistent(
                "consume called after finish".to_string(),
            ));
        }
        tracing::trace!(len = chunk.len(), mode = ?self.mode, "consume");
        let mut chars = chunk.chars().peekable();
        loop {
            if !matches!(self.pending, PendingLookahead::None) {
                let Some(&next) = chars.peek() else {
                    break;
                };
                self.resolve_pending(next, &mut chars).await?;
                continue;
            }
            let Some(ch) = chars.next() else {
                break;
            };
            let was_line_start = self.at_line_start;
            self.at_line_start = match classify::class(ch) {
                Class::Newline => true,
                Class::Space => was_line_start,
                _ => false,
            };
            self.dispatch(ch, was_line_start).await?;
        }
        self.flush_chunk_boundary().await?;
        Ok(())
    }

    /// Drains all buffers and closes out whatever mode the stream ended in.
    /// Calling this twice is a contract violation (see [`Parser::new`]).
    pub async fn finish(&mut self) -> Result<(), ParserError> {
        if self.finished {
            return Err(ParserError::Inconsistent(
                "finish called more than once".to_string(),
            ));
        }
        self.resolve_pending_at_eof().await?;

        match self.mode {
            Mode::FreeText => {
                // A trailing backtick run (1 or 2 backticks, or 3+ that
                // never got a following character) is still sitting in the
                // fence tracker, not yet pushed into `markdown_buf` — mirror
                // the non-backtick branch of `step_free_text` so those bytes
                // aren't silently dropped.
                let run = self.fence.end_run();
                if run >= 3 && self.fence_run_line_start {
                    self.finish_markdown_segment().await?;
                    self.emit_code_block_start("").await?;
                    self.emit_code_block_finish("").await?;
                } else {
                    for _ in 0..run {
                        self.markdown_buf.push('`');
                    }
                    self.finish_markdown_segment().await?;
                }
            }
            Mode::TextingCallHeadline => {
                if self.call_start_emitted {
                    self.finish_headline().await?;
                    self.complete_call_no_body().await?;
                } else if !self.mention_acc.is_empty() {
                    let mut normalized = self.mention_acc.clone();
                    if normalized.ends_with('.') {
                        normalized.pop();
                    }
                    if !normalized.is_empty() {
                        self.current_call = Some(CallInProgress::new(normalized.clone()));
                        self.emit_call_start(&normalized).await?;
                        self.finish_headline().await?;
                        self.complete_call_no_body().await?;
                    }
                }
                self.mention_acc.clear();
            }
            Mode::TextingCallBeforeBody => {
                if self.current_call.is_some() {
                    // A pending backtick run here is body content, not
                    // whitespace — `step_before_body` would have opened a
                    // body with it had another character followed. Resolve
                    // it the same way before deciding the call has no body.
                    let run = self.fence.end_run();
                    if run >= 3 {
                        self.emit_call_body_start(Some("```")).await?;
                        if let Some(call) = self.current_call.as_mut() {
                            call.has_body = true;
                            call.is_triple_quoted_body = true;
                        }
                        self.body_buf.push_str("```");
                        self.complete_call_with_body(Some("```")).await?;
                    } else if run > 0 {
                        self.emit_call_body_start(None).await?;
                        if let Some(call) = self.current_call.as_mut() {
                            call.has_body = true;
                            call.is_triple_quoted_body = false;
                        }
                        for _ in 0..run {
                            self.body_buf.push('`');
                        }
                        self.complete_call_with_body(None).await?;
                    } else {
                        self.complete_call_no_body().await?;
                    }
                }
            }
            Mode::TextingCallBody => {
                if self.current_call.is_some() {
                    let is_triple = self
                        .current_call
                        .as_ref()
                        .map(|c| c.is_triple_quoted_body)
                        .unwrap_or(false);
                    let end_quote = if is_triple { Some("```") } else { None };
                    self.complete_call_with_body(end_quote).await?;
                }
            }
            Mode::CodeBlockInfo => {
                let info = std::mem::take(&mut self.code_info_buf);
                self.emit_code_block_start(&info).await?;
                self.emit_code_block_finish("").await?;
            }
            Mode::CodeBlockContent => {
                self.flush_code_content().await?;
                self.emit_code_block_finish("").await?;
            }
        }

        self.mode = Mode::FreeText;
        self.finished = true;
        tracing::debug!(
            calls = self.completed_calls.len(),
            "parser finished"
        );
        Ok(())
    }

    // ---- dispatch -------------------------------------------------------

    async fn dispatch(&mut self, ch: char, was_line_start: bool) -> Result<(), ParserError> {
        let mut ch = ch;
        loop {
            let reprocess = match self.mode {
                Mode::FreeText => self.step_free_text(ch, was_line_start).await?,
                Mode::TextingCallHeadline => self.step_headline(ch).await?,
                Mode::TextingCallBeforeBody => self.step_before_body(ch, was_line_start).await?,
                Mode::TextingCallBody => self.step_body(ch, was_line_start).await?,
                Mode::CodeBlockInfo => self.step_code_info(ch).await?,
                Mode::CodeBlockContent => self.step_code_content(ch).await?,
            };
            match reprocess {
                Some(next) => {
                    tracing::trace!(mode = ?self.mode, "reprocessing character in new mode");
                    ch = next;
                }
                None => return Ok(()),
            }
        }
    }

    // ---- FREE_TEXT --------------------------------------------------------

    async fn step_free_text(
        &mut self,
        ch: char,
        was_line_start: bool,
    ) -> Result<Option<char>, ParserError> {
        if classify::class(ch) == Class::Backtick {
            if self.fence.pending_count() == 0 {
                self.fence_run_line_start = was_line_start;
            }
            self.fence.backtick();
            return Ok(None);
        }

        let run = self.fence.end_run();
        if run >= 3 && self.fence_run_line_start {
            self.finish_markdown_segment().await?;
            self.mode = Mode::CodeBlockInfo;
            self.code_info_buf.clear();
            return Ok(Some(ch));
        }
        if run > 0 {
            for _ in 0..run {
                self.markdown_buf.push('`');
            }
        }

        if ch == '@'
            && was_line_start
            && !self.fence.in_single_backtick()
            && self.fence.pending_count() == 0
        {
            self.pending = PendingLookahead::AtAtEol { was_line_start };
            return Ok(None);
        }

        self.markdown_buf.push(ch);
        Ok(None)
    }

    // ---- TEXTING_CALL_HEADLINE ---------------------------------------------

    async fn step_headline(&mut self, ch: char) -> Result<Option<char>, ParserError> {
        if !self.call_start_emitted {
            if ch == '@' && self.mention_acc.is_empty() {
                // The marker that entered this mode; not mention content.
                return Ok(None);
            }
            if is_mention_char(ch) {
                self.mention_acc.push(ch);
                return Ok(None);
            }

            let original = std::mem::take(&mut self.mention_acc);
            let mut normalized = original.clone();
            if normalized.ends_with('.') {
                normalized.pop();
            }
            if normalized.is_empty() {
                self.mode = Mode::FreeText;
                self.markdown_buf.push('@');
                self.markdown_buf.push_str(&original);
                return Ok(Some(ch));
            }

            self.call_start_emitted = true;
            self.current_call = Some(CallInProgress::new(normalized.clone()));
            self.emit_call_start(&normalized).await?;
            // `ch` still needs to be processed as headline content below.
        }

        match classify::class(ch) {
            Class::Newline => {
                self.pending = PendingLookahead::HeadlineNewline {
                    indent: String::new(),
                };
                Ok(None)
            }
            _ => {
                self.headline_buf.push(ch);
                Ok(None)
            }
        }
    }

    // ---- TEXTING_CALL_BEFORE_BODY -------------------------------------------

    async fn step_before_body(
        &mut self,
        ch: char,
        was_line_start: bool,
    ) -> Result<Option<char>, ParserError> {
        match classify::class(ch) {
            Class::Space | Class::Newline => Ok(None),
            Class::Backtick => {
                if self.fence.pending_count() == 0 {
                    self.fence_run_line_start = was_line_start;
                }
                self.fence.backtick();
                Ok(None)
            }
            Class::At if was_line_start => {
                self.pending = PendingLookahead::AtAtEol { was_line_start };
                Ok(None)
            }
            _ => {
                let run = self.fence.end_run();
                if run >= 3 {
                    self.emit_call_body_start(Some("```")).await?;
                    if let Some(call) = self.current_call.as_mut() {
                        call.has_body = true;
                        call.is_triple_quoted_body = true;
                    }
                    self.body_buf.push_str("```");
                    self.mode = Mode::TextingCallBody;
                    Ok(Some(ch))
                } else {
                    self.emit_call_body_start(None).await?;
                    if let Some(call) = self.current_call.as_mut() {
                        call.has_body = true;
                        call.is_triple_quoted_body = false;
                    }
                    for _ in 0..run {
                        self.body_buf.push('`');
                    }
                    self.mode = Mode::TextingCallBody;
                    Ok(Some(ch))
                }
            }
        }
    }

    // ---- TEXTING_CALL_BODY --------------------------------------------------

    async fn step_body(
        &mut self,
        ch: char,
        was_line_start: bool,
    ) -> Result<Option<char>, ParserError> {
        let is_triple = self
            .current_call
            .as_ref()
            .map(|c| c.is_triple_quoted_body)
            .unwrap_or(false);

        if classify::class(ch) == Class::Backtick {
            self.fence.backtick();
            self.body_buf.push(ch);
            if is_triple && self.fence.pending_count() == 3 {
                self.pending = PendingLookahead::InitialBackticks { count: 3 };
            }
            return Ok(None);
        }

        if !is_triple && ch == '@' {
            self.pending_at_mid_run = self.fence.mid_run();
            self.fence.end_run();
            self.pending = PendingLookahead::AtAtEol { was_line_start };
            return Ok(None);
        }

        self.fence.end_run();
        self.body_buf.push(ch);
        Ok(None)
    }

    // ---- CODE_BLOCK_INFO / CODE_BLOCK_CONTENT -------------------------------

    async fn step_code_info(&mut self, ch: char) -> Result<Option<char>, ParserError> {
        if classify::class(ch) == Class::Newline {
            let info = std::mem::take(&mut self.code_info_buf);
            self.emit_code_block_start(&info).await?;
            self.mode = Mode::CodeBlockContent;
            self.fence = FenceTracker::new();
            self.code_content_buf.push('\n');
            Ok(None)
        } else {
            self.code_info_buf.push(ch);
            Ok(None)
        }
    }

    async fn step_code_content(&mut self, ch: char) -> Result<Option<char>, ParserError> {
        if classify::class(ch) == Class::Backtick {
            self.fence.backtick();
            if self.fence.pending_count() == 3 {
                self.code_content_buf.pop();
                self.code_content_buf.pop();
                let content = std::mem::take(&mut self.code_content_buf);
                if !content.is_empty() {
                    self.receiver
                        .code_block_chunk(&content)
                        .await
                        .map_err(recv_err)?;
                }
                self.emit_code_block_finish("").await?;
                self.mode = Mode::FreeText;
                self.fence = FenceTracker::new();
                return Ok(None);
            }
            self.code_content_buf.push(ch);
            return Ok(None);
        }
        self.fence.end_run();
        self.code_content_buf.push(ch);
        Ok(None)
    }

    // ---- pending resolution --------------------------------------------

    async fn resolve_pending(
        &mut self,
        next: char,
        chars: &mut Peekable<Chars<'_>>,
    ) -> Result<(), ParserError> {
        let pending = std::mem::replace(&mut self.pending, PendingLookahead::None);
        match pending {
            PendingLookahead::None => Ok(()),
            PendingLookahead::AtAtEol { was_line_start } => {
                self.resolve_at_at_eol(was_line_start, next, chars).await
            }
            PendingLookahead::HeadlineNewline { indent } => {
                self.resolve_headline_newline(indent, next, chars).await
            }
            PendingLookahead::HeadlineNewlineSawAt { indent } => {
                self.resolve_headline_newline_saw_at(indent, next, chars).await
            }
            PendingLookahead::InitialBackticks { count } => {
                self.resolve_initial_backticks(count, next, chars).await
            }
        }
    }

    async fn resolve_at_at_eol(
        &mut self,
        was_line_start: bool,
        next: char,
        chars: &mut Peekable<Chars<'_>>,
    ) -> Result<(), ParserError> {
        if next == '/' {
            chars.next();
            self.at_line_start = false;
            match self.mode {
                Mode::FreeText => {
                    self.markdown_buf.push_str("@/");
                }
                Mode::TextingCallBody => {
                    self.complete_call_with_body(None).await?;
                    self.mode = Mode::FreeText;
                }
                Mode::TextingCallBeforeBody => {
                    self.complete_call_no_body().await?;
                    self.mode = Mode::FreeText;
                }
                _ => {
                    return Err(ParserError::Inconsistent(
                        "@/ lookahead resolved in an unexpected mode".to_string(),
                    ));
                }
            }
            return Ok(());
        }

        match self.mode {
            Mode::FreeText => {
                self.finish_markdown_segment().await?;
                self.mode = Mode::TextingCallHeadline;
                self.call_start_emitted = false;
                self.mention_acc.clear();
                self.dispatch('@', was_line_start).await?;
            }
            Mode::TextingCallBody => {
                if was_line_start && !self.pending_at_mid_run {
                    self.complete_call_with_body(None).await?;
                    self.mode = Mode::TextingCallHeadline;
                    self.call_start_emitted = false;
                    self.mention_acc.clear();
                    self.dispatch('@', was_line_start).await?;
                } else {
                    self.body_buf.push('@');
                }
            }
            Mode::TextingCallBeforeBody => {
                self.complete_call_no_body().await?;
                self.mode = Mode::TextingCallHeadline;
                self.call_start_emitted = false;
                self.mention_acc.clear();
                self.dispatch('@', was_line_start).await?;
            }
            _ => {
                return Err(ParserError::Inconsistent(
                    "@ lookahead resolved in an unexpected mode".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn resolve_headline_newline(
        &mut self,
        mut indent: String,
        next: char,
        chars: &mut Peekable<Chars<'_>>,
    ) -> Result<(), ParserError> {
        if next == '\n' {
            chars.next();
            indent.push('\n');
            self.pending = PendingLookahead::HeadlineNewline { indent };
        } else if is_indent_char(next) {
            chars.next();
            indent.push(next);
            self.pending = PendingLookahead::HeadlineNewline { indent };
        } else if next == '@' {
            chars.next();
            self.pending = PendingLookahead::HeadlineNewlineSawAt { indent };
        } else if next == '`' {
            self.finish_headline().await?;
            self.mode = Mode::TextingCallBeforeBody;
            self.fence = FenceTracker::new();
        } else if indent.is_empty() {
            self.finish_headline().await?;
            self.mode = Mode::TextingCallBeforeBody;
        } else {
            self.headline_buf.push('\n');
            self.headline_buf.push_str(&indent);
        }
        Ok(())
    }

    async fn resolve_headline_newline_saw_at(
        &mut self,
        _indent: String,
        next: char,
        chars: &mut Peekable<Chars<'_>>,
    ) -> Result<(), ParserError> {
        self.finish_headline().await?;
        if next == '/' {
            chars.next();
            self.complete_call_no_body().await?;
            self.mode = Mode::FreeText;
        } else {
            self.complete_call_no_body().await?;
            self.mode = Mode::TextingCallHeadline;
            self.call_start_emitted = false;
            self.mention_acc.clear();
            self.dispatch('@', true).await?;
        }
        Ok(())
    }

    async fn resolve_initial_backticks(
        &mut self,
        count: u32,
        next: char,
        chars: &mut Peekable<Chars<'_>>,
    ) -> Result<(), ParserError> {
        debug_assert_eq!(count, 3);
        if classify::class(next) == Class::Newline {
            chars.next();
            self.at_line_start = true;
            // The closing fence is kept as literal body chunk content (see
            // the worked triple-fenced-body scenario): only `callBodyStart`
            // and `callBodyFinish`'s parameters double as the "logical"
            // fence markers, the chunk stream itself carries everything
            // verbatim including both fences.
            self.complete_call_with_body(Some("```")).await?;
            self.mode = Mode::FreeText;
            self.fence = FenceTracker::new();
        }
        // Anything else: the three backticks were already literal body
        // content (pushed as encountered); simply resume reading the body.
        Ok(())
    }

    async fn resolve_pending_at_eof(&mut self) -> Result<(), ParserError> {
        match std::mem::replace(&mut self.pending, PendingLookahead::None) {
            PendingLookahead::None => {}
            PendingLookahead::AtAtEol { .. } => match self.mode {
                Mode::FreeText => {
                    self.markdown_buf.push('@');
                }
                Mode::TextingCallBody => {
                    self.body_buf.push('@');
                }
                Mode::TextingCallBeforeBody => {
                    self.complete_call_no_body().await?;
                    self.mode = Mode::FreeText;
                }
                _ => {}
            },
            PendingLookahead::HeadlineNewline { .. } => {
                self.finish_headline().await?;
                self.complete_call_no_body().await?;
                self.mode = Mode::FreeText;
            }
            PendingLookahead::HeadlineNewlineSawAt { .. } => {
                self.finish_headline().await?;
                self.complete_call_no_body().await?;
                self.mode = Mode::FreeText;
            }
            PendingLookahead::InitialBackticks { .. } => {
                self.complete_call_with_body(Some("```")).await?;
                self.mode = Mode::FreeText;
            }
        }
        Ok(())
    }

    // ---- flush / finish helpers ------------------------------------------

    async fn flush_chunk_boundary(&mut self) -> Result<(), ParserError> {
        match self.mode {
            Mode::FreeText => self.flush_markdown().await,
            Mode::TextingCallHeadline => self.flush_headline().await,
            Mode::TextingCallBeforeBody => Ok(()),
            Mode::TextingCallBody => self.flush_body().await,
            Mode::CodeBlockInfo => Ok(()),
            Mode::CodeBlockContent => self.flush_code_content().await,
        }
    }

    async fn flush_markdown(&mut self) -> Result<(), ParserError> {
        if self.markdown_buf.is_empty() {
            return Ok(());
        }
        if !self.markdown_open {
            self.receiver.markdown_start().await.map_err(recv_err)?;
            self.markdown_open = true;
        }
        let text = std::mem::take(&mut self.markdown_buf);
        self.receiver.markdown_chunk(&text).await.map_err(recv_err)?;
        Ok(())
    }

    async fn finish_markdown_segment(&mut self) -> Result<(), ParserError> {
        self.flush_markdown().await?;
        if self.markdown_open {
            self.receiver.markdown_finish().await.map_err(recv_err)?;
            self.markdown_open = false;
        }
        Ok(())
    }

    async fn flush_headline(&mut self) -> Result<(), ParserError> {
        if self.headline_buf.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.headline_buf);
        if let Some(call) = self.current_call.as_mut() {
            call.head_line.push_str(&text);
        }
        self.receiver
            .call_head_line_chunk(&text)
            .await
            .map_err(recv_err)?;
        Ok(())
    }

    async fn finish_headline(&mut self) -> Result<(), ParserError> {
        self.flush_headline().await?;
        self.receiver.call_head_line_finish().await.map_err(recv_err)?;
        Ok(())
    }

    async fn flush_body(&mut self) -> Result<(), ParserError> {
        if self.body_buf.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.body_buf);
        if let Some(call) = self.current_call.as_mut() {
            call.body.push_str(&text);
        }
        self.receiver.call_body_chunk(&text).await.map_err(recv_err)?;
        Ok(())
    }

    async fn flush_code_content(&mut self) -> Result<(), ParserError> {
        if self.code_content_buf.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.code_content_buf);
        self.receiver
            .code_block_chunk(&text)
            .await
            .map_err(recv_err)?;
        Ok(())
    }

    async fn emit_call_start(&mut self, first_mention: &str) -> Result<(), ParserError> {
        tracing::trace!(mention = first_mention, "call start");
        self.receiver.call_start(first_mention).await.map_err(recv_err)
    }

    async fn emit_call_body_start(&mut self, info_line: Option<&str>) -> Result<(), ParserError> {
        self.receiver.call_body_start(info_line).await.map_err(recv_err)
    }

    async fn emit_code_block_start(&mut self, info_line: &str) -> Result<(), ParserError> {
        self.receiver
            .code_block_start(info_line)
            .await
            .map_err(recv_err)
    }

    async fn emit_code_block_finish(&mut self, end_quote: &str) -> Result<(), ParserError> {
        self.receiver
            .code_block_finish(end_quote)
            .await
            .map_err(recv_err)
    }

    async fn complete_call_no_body(&mut self) -> Result<(), ParserError> {
        let call = self.current_call.take().ok_or_else(|| {
            ParserError::Inconsistent("callFinish reached with no call in progress".to_string())
        })?;
        let call_id = call_id::compute(&call.first_mention, &call.head_line, None, self.call_counter);
        self.call_counter += 1;
        self.receiver.call_finish(&call_id).await.map_err(recv_err)?;
        self.completed_calls.push(CompletedCall {
            first_mention: call.first_mention,
            head_line: call.head_line,
            body: None,
            call_id,
        });
        self.call_start_emitted = false;
        Ok(())
    }

    async fn complete_call_with_body(&mut self, end_quote: Option<&str>) -> Result<(), ParserError> {
        self.flush_body().await?;
        let call = self.current_call.take().ok_or_else(|| {
            ParserError::Inconsistent("callFinish reached with no call in progress".to_string())
        })?;
        self.receiver
            .call_body_finish(end_quote)
            .await
            .map_err(recv_err)?;
        let call_id = call_id::compute(
            &call.first_mention,
            &call.head_line,
            Some(&call.body),
            self.call_counter,
        );
        self.call_counter += 1;
        self.receiver.call_finish(&call_id).await.map_err(recv_err)?;
        self.completed_calls.push(CompletedCall {
            first_mention: call.first_mention,
            head_line: call.head_line,
            body: Some(call.body),
            call_id,
        });
        self.call_start_emitted = false;
        Ok(())
    }
}
