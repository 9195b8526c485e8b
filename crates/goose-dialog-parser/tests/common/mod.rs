use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use goose_dialog_parser::Receiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MarkdownStart,
    MarkdownChunk(String),
    MarkdownFinish,
    CallStart(String),
    CallHeadLineChunk(String),
    CallHeadLineFinish,
    CallBodyStart(Option<String>),
    CallBodyChunk(String),
    CallBodyFinish(Option<String>),
    CallFinish(String),
    CodeBlockStart(String),
    CodeBlockChunk(String),
    CodeBlockFinish(String),
}

#[derive(Debug, thiserror::Error)]
#[error("recorder never fails")]
pub struct Never;

/// A [`Receiver`] that appends every event to a shared, lock-protected log,
/// so a test can keep its own handle to the log after handing the receiver
/// itself to a [`goose_dialog_parser::Parser`].
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn concatenated_markdown(&self) -> String {
        self.events()
            .iter()
            .filter_map(|e| match e {
                Event::MarkdownChunk(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn concatenated_headlines(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = String::new();
        for e in self.events() {
            match e {
                Event::CallStart(_) => current.clear(),
                Event::CallHeadLineChunk(t) => current.push_str(&t),
                Event::CallHeadLineFinish => out.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        out
    }

    /// Concatenates only the `callBodyChunk` text of each call, in order.
    /// The opening/closing fences of a triple-quoted body are carried both
    /// as `callBodyStart`/`callBodyFinish` parameters *and*, verbatim,
    /// inside the chunk stream itself (see the triple-fenced-body
    /// scenario), so this helper does not additionally prepend them.
    pub fn concatenated_bodies(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = String::new();
        let mut in_body = false;
        for e in self.events() {
            match e {
                Event::CallBodyStart(_) => {
                    in_body = true;
                    current.clear();
                }
                Event::CallBodyChunk(t) if in_body => current.push_str(&t),
                Event::CallBodyFinish(_) => {
                    in_body = false;
                    out.push(std::mem::take(&mut current));
                }
                _ => {}
            }
        }
        out
    }

    /// The event kinds only, discarding payloads, useful for asserting
    /// ordering invariants irrespective of exact chunk boundaries.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e {
                Event::MarkdownStart => "markdownStart",
                Event::MarkdownChunk(_) => "markdownChunk",
                Event::MarkdownFinish => "markdownFinish",
                Event::CallStart(_) => "callStart",
                Event::CallHeadLineChunk(_) => "callHeadLineChunk",
                Event::CallHeadLineFinish => "callHeadLineFinish",
                Event::CallBodyStart(_) => "callBodyStart",
                Event::CallBodyChunk(_) => "callBodyChunk",
                Event::CallBodyFinish(_) => "callBodyFinish",
                Event::CallFinish(_) => "callFinish",
                Event::CodeBlockStart(_) => "codeBlockStart",
                Event::CodeBlockChunk(_) => "codeBlockChunk",
                Event::CodeBlockFinish(_) => "codeBlockFinish",
            })
            .collect()
    }
}

#[async_trait]
impl Receiver for Recorder {
    type Error = Never;

    async fn markdown_start(&mut self) -> Result<(), Never> {
        self.events.lock().unwrap().push(Event::MarkdownStart);
        Ok(())
    }
    async fn markdown_chunk(&mut self, text: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::MarkdownChunk(text.to_string()));
        Ok(())
    }
    async fn markdown_finish(&mut self) -> Result<(), Never> {
        self.events.lock().unwrap().push(Event::MarkdownFinish);
        Ok(())
    }
    async fn call_start(&mut self, first_mention: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CallStart(first_mention.to_string()));
        Ok(())
    }
    async fn call_head_line_chunk(&mut self, text: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CallHeadLineChunk(text.to_string()));
        Ok(())
    }
    async fn call_head_line_finish(&mut self) -> Result<(), Never> {
        self.events.lock().unwrap().push(Event::CallHeadLineFinish);
        Ok(())
    }
    async fn call_body_start(&mut self, info_line: Option<&str>) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CallBodyStart(info_line.map(str::to_string)));
        Ok(())
    }
    async fn call_body_chunk(&mut self, text: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CallBodyChunk(text.to_string()));
        Ok(())
    }
    async fn call_body_finish(&mut self, end_quote: Option<&str>) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CallBodyFinish(end_quote.map(str::to_string)));
        Ok(())
    }
    async fn call_finish(&mut self, call_id: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CallFinish(call_id.to_string()));
        Ok(())
    }
    async fn code_block_start(&mut self, info_line: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CodeBlockStart(info_line.to_string()));
        Ok(())
    }
    async fn code_block_chunk(&mut self, text: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CodeBlockChunk(text.to_string()));
        Ok(())
    }
    async fn code_block_finish(&mut self, end_quote: &str) -> Result<(), Never> {
        self.events
            .lock()
            .unwrap()
            .push(Event::CodeBlockFinish(end_quote.to_string()));
        Ok(())
    }
}

/// Feeds `input` through a fresh parser, split into chunks of `chunk_size`
/// characters (the final chunk may be shorter), and returns the recorder.
pub async fn run_chunked(input: &str, chunk_size: usize) -> Recorder {
    let recorder = Recorder::new();
    let mut parser = goose_dialog_parser::Parser::new(recorder.clone());
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    let step = chunk_size.max(1);
    if chars.is_empty() {
        parser.consume("").await.expect("consume should not fail");
    }
    while i < chars.len() {
        let end = (i + step).min(chars.len());
        let chunk: String = chars[i..end].iter().collect();
        parser.consume(&chunk).await.expect("consume should not fail");
        i = end;
    }
    parser.finish().await.expect("finish should not fail");
    recorder
}

/// Runs the whole input as a single chunk.
pub async fn run_whole(input: &str) -> Recorder {
    run_chunked(input, usize::MAX / 2).await
}
