//! SSE relay
//!
//! Consumes the upstream Gemini event stream, extracts incremental text
//! deltas, and re-frames them as this server's own server-sent events.
//! Upstream chunks can split lines at arbitrary byte boundaries, so a small
//! decoder buffers partial lines; lines that fail to parse as JSON are
//! skipped to tolerate framing noise.

use axum::response::sse::Event;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use super::gateway::GenerateResponse;

/// Marker prefixing every upstream payload line
const DATA_PREFIX: &str = "data: ";

/// Buffers upstream bytes and yields complete lines
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    buf: Vec<u8>,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk; returns every line completed by it, without trailing
    /// newline characters. A partial final line stays buffered.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop(); // '\n'
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }
}

/// Extract the text delta carried by one upstream SSE line, if any.
/// Non-payload lines and malformed JSON yield `None`.
pub fn extract_text_delta(line: &str) -> Option<String> {
    let payload = line.strip_prefix(DATA_PREFIX)?;
    let parsed: GenerateResponse = serde_json::from_str(payload).ok()?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
}

/// One downstream frame of the relayed stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFrame {
    /// Incremental text delta: `{"text": ...}`
    Text(String),
    /// Clean upstream completion: `{"done": true}`; emitted exactly once
    Done,
    /// Upstream failure: `{"error": ...}`; terminates the stream
    Error(String),
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct DonePayload {
    done: bool,
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    error: &'a str,
}

impl RelayFrame {
    /// Frame as a downstream SSE event
    pub fn into_event(self) -> Event {
        let event = match &self {
            RelayFrame::Text(text) => Event::default().json_data(TextPayload { text }),
            RelayFrame::Done => Event::default().json_data(DonePayload { done: true }),
            RelayFrame::Error(error) => Event::default().json_data(ErrorPayload { error }),
        };
        // These payloads always serialize; keep the stream alive regardless.
        event.unwrap_or_default()
    }
}

/// Re-frame an upstream SSE byte stream as relay frames.
///
/// Terminates with exactly one `Done` on clean upstream completion, or one
/// `Error` if the upstream transport fails mid-stream. The relay task stops
/// as soon as the downstream consumer is dropped.
pub fn relay_frames<S, E>(upstream: S) -> impl Stream<Item = RelayFrame> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<RelayFrame>(32);

    tokio::spawn(async move {
        let mut upstream = std::pin::pin!(upstream);
        let mut decoder = SseLineDecoder::new();

        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(bytes) => {
                    for line in decoder.push(&bytes) {
                        if let Some(text) = extract_text_delta(&line) {
                            if tx.send(RelayFrame::Text(text)).await.is_err() {
                                // Downstream client disconnected
                                return;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Upstream stream error");
                    let _ = tx.send(RelayFrame::Error(e.to_string())).await;
                    return;
                }
            }
        }

        let _ = tx.send(RelayFrame::Done).await;
    });

    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|frame| (frame, rx))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::convert::Infallible;

    fn delta_line(text: &str) -> String {
        format!(
            "data: {{\"candidates\":[{{\"content\":{{\"parts\":[{{\"text\":\"{text}\"}}]}}}}]}}"
        )
    }

    #[test]
    fn test_decoder_handles_split_lines() {
        let mut decoder = SseLineDecoder::new();
        assert!(decoder.push(b"data: {\"a\"").is_empty());
        let lines = decoder.push(b": 1}\ndata: part");
        assert_eq!(lines, vec!["data: {\"a\": 1}".to_string()]);
        let lines = decoder.push(b"ial\n\n");
        assert_eq!(lines, vec!["data: partial".to_string(), String::new()]);
    }

    #[test]
    fn test_decoder_strips_crlf() {
        let mut decoder = SseLineDecoder::new();
        let lines = decoder.push(b"data: x\r\n");
        assert_eq!(lines, vec!["data: x".to_string()]);
    }

    #[test]
    fn test_extract_text_delta() {
        assert_eq!(
            extract_text_delta(&delta_line("hello")),
            Some("hello".to_string())
        );
        // Not a payload line
        assert_eq!(extract_text_delta(""), None);
        assert_eq!(extract_text_delta(": keep-alive"), None);
        // Malformed JSON is skipped
        assert_eq!(extract_text_delta("data: {not json"), None);
        // Valid JSON without a text field
        assert_eq!(extract_text_delta("data: {\"candidates\":[]}"), None);
    }

    #[tokio::test]
    async fn test_relay_skips_malformed_and_emits_done_once() {
        let chunks: Vec<Result<Bytes, Infallible>> = vec![
            Ok(Bytes::from(format!("{}\n", delta_line("one")))),
            Ok(Bytes::from("data: {broken\n".to_string())),
            Ok(Bytes::from(format!("{}\n", delta_line("two")))),
        ];

        let frames: Vec<RelayFrame> = relay_frames(stream::iter(chunks)).collect().await;
        assert_eq!(
            frames,
            vec![
                RelayFrame::Text("one".to_string()),
                RelayFrame::Text("two".to_string()),
                RelayFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_relay_reassembles_interleaved_chunks() {
        let full = format!("{}\n{}\n", delta_line("alpha"), delta_line("beta"));
        let (head, tail) = full.split_at(full.len() / 2);
        let chunks: Vec<Result<Bytes, Infallible>> = vec![
            Ok(Bytes::copy_from_slice(head.as_bytes())),
            Ok(Bytes::copy_from_slice(tail.as_bytes())),
        ];

        let frames: Vec<RelayFrame> = relay_frames(stream::iter(chunks)).collect().await;
        assert_eq!(
            frames,
            vec![
                RelayFrame::Text("alpha".to_string()),
                RelayFrame::Text("beta".to_string()),
                RelayFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_relay_upstream_error_terminates_stream() {
        let chunks: Vec<Result<Bytes, String>> = vec![
            Ok(Bytes::from(format!("{}\n", delta_line("one")))),
            Err("connection reset".to_string()),
        ];

        let frames: Vec<RelayFrame> = relay_frames(stream::iter(chunks)).collect().await;
        assert_eq!(
            frames,
            vec![
                RelayFrame::Text("one".to_string()),
                RelayFrame::Error("connection reset".to_string()),
            ]
        );
    }
}
