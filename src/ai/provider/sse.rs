//! Server-sent event stream decoding
//!
//! Network chunks arrive at arbitrary byte offsets, so bytes are held until a
//! full line is available and only complete lines are decoded as UTF-8.

use bytes::{Buf, Bytes, BytesMut};
use serde::Deserialize;

/// Extracts text from the `data:` payloads of one provider's events
pub trait SseEventParser: Send + Sync {
    /// Text carried by a `data:` payload, if any
    fn parse_data(&self, data: &str) -> Option<String>;

    /// Whether the payload marks the end of the stream
    fn is_done(&self, data: &str) -> bool;
}

/// Line splitter over a chunked event stream
pub struct SseParser<P: SseEventParser> {
    pending: BytesMut,
    parser: P,
}

impl<P: SseEventParser> SseParser<P> {
    pub fn new(parser: P) -> Self {
        Self {
            pending: BytesMut::new(),
            parser,
        }
    }

    /// Feed one network chunk, returning the text of every event it completes
    pub fn parse_chunk(&mut self, bytes: &Bytes) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut texts = Vec::new();
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let line = self.pending.split_to(end);
            self.pending.advance(1);

            // A line that is not UTF-8 is dropped on its own
            let Ok(line) = std::str::from_utf8(&line) else {
                log::debug!("Skipping non UTF-8 event line ({} bytes)", line.len());
                continue;
            };
            if let Some(text) = self.text_of_line(line.trim()) {
                texts.push(text);
            }
        }
        texts
    }

    fn text_of_line(&self, line: &str) -> Option<String> {
        let data = line.strip_prefix("data:")?.trim_start();
        if self.parser.is_done(data) {
            return None;
        }
        self.parser.parse_data(data).filter(|text| !text.is_empty())
    }
}

/// One Messages API stream event; only text deltas matter here
#[derive(Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    kind: String,
    delta: Option<TextDelta>,
}

#[derive(Deserialize)]
struct TextDelta {
    text: Option<String>,
}

/// Reads `content_block_delta` events from the Anthropic Messages stream
pub struct AnthropicEventParser;

impl SseEventParser for AnthropicEventParser {
    fn parse_data(&self, data: &str) -> Option<String> {
        let event: StreamEvent = serde_json::from_str(data).ok()?;
        if event.kind != "content_block_delta" {
            return None;
        }
        event.delta?.text
    }

    fn is_done(&self, data: &str) -> bool {
        data == "[DONE]"
    }
}

#[cfg(test)]
#[path = "sse_tests.rs"]
mod sse_tests;
