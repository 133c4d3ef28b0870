//! Logging hook for generation service traffic.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture every request
//! and response passing through the [`Gemini`](crate::Gemini) client, and
//! [`JsonLinesLogger`], which appends them to a file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::types::{GenerateContentRequest, GenerateContentResponse, Model};

/// A trait for logging client traffic.
///
/// Implementations are called synchronously from the request path, so they should be quick and
/// must never panic.
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, model: &Model, request: &GenerateContentRequest);

    /// Log a successfully parsed response.
    fn log_response(&self, model: &Model, response: &GenerateContentResponse);

    /// Log a failed request.
    fn log_error(&self, model: &Model, error: &Error) {
        let _ = (model, error);
    }
}

/// Appends one JSON object per line to a file.
///
/// Each line carries `kind` (`request`, `response`, or `error`), the `model`, and the `body`.
/// Write failures are swallowed: losing a log line never fails a conversation.
pub struct JsonLinesLogger {
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesLogger {
    /// Opens `path` for appending, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|err| Error::io("failed to open log file", err))?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_line<T: Serialize>(&self, kind: &str, model: &Model, body: &T) {
        let line = json!({
            "kind": kind,
            "model": model.to_string(),
            "body": body,
        });
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *writer, &line).is_ok() {
            let _ = writer.write_all(b"\n");
            let _ = writer.flush();
        }
    }
}

impl ClientLogger for JsonLinesLogger {
    fn log_request(&self, model: &Model, request: &GenerateContentRequest) {
        self.write_line("request", model, request);
    }

    fn log_response(&self, model: &Model, response: &GenerateContentResponse) {
        self.write_line("response", model, response);
    }

    fn log_error(&self, model: &Model, error: &Error) {
        self.write_line("error", model, &error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenerationConfig, Turn};

    #[test]
    fn writes_one_line_per_event() {
        let path = std::env::temp_dir().join(format!(
            "rental-assistant-log-{}.jsonl",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let logger = JsonLinesLogger::open(&path).unwrap();
        let model = Model::default();
        let request =
            GenerateContentRequest::from_transcript(&[Turn::user("hi")], &GenerationConfig::default());
        logger.log_request(&model, &request);
        logger.log_response(&model, &GenerateContentResponse::default());
        logger.log_error(&model, &Error::authentication("bad key"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["kind"], "request");
        assert_eq!(lines[0]["model"], "gemini-2.0-flash");
        assert_eq!(lines[0]["body"]["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(lines[1]["kind"], "response");
        assert_eq!(lines[2]["body"], "Authentication error: bad key");

        let _ = std::fs::remove_file(&path);
    }
}
