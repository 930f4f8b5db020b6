//! In-memory log capture for the TUI log panel

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Maximum number of log lines kept in memory
const MAX_LOG_LINES: usize = 1000;

/// Bounded ring of log lines shared by the tracing subscriber and the TUI
#[derive(Clone)]
pub struct LogRing {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogRing {
    /// Create an empty ring
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES))),
        }
    }

    /// Append a line, dropping the oldest when full
    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() >= MAX_LOG_LINES {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Get the most recent `count` lines, oldest first (copies so no lock
    /// is held during rendering)
    #[must_use]
    pub fn tail(&self, count: usize) -> Vec<String> {
        if let Ok(lines) = self.lines.lock() {
            lines.iter().rev().take(count).rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Number of lines currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    /// Whether the ring is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that splits byte output into lines and appends them to a [`LogRing`]
pub struct LogRingWriter {
    ring: LogRing,
    pending: String,
}

impl LogRingWriter {
    /// Create a writer feeding the given ring
    #[must_use]
    pub fn new(ring: LogRing) -> Self {
        Self {
            ring,
            pending: String::with_capacity(256),
        }
    }
}

impl Write for LogRingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        for c in s.chars() {
            if c == '\n' {
                if !self.pending.is_empty() {
                    self.ring.push(std::mem::take(&mut self.pending));
                }
            } else {
                self.pending.push(c);
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.ring.push(std::mem::take(&mut self.pending));
        }
        Ok(())
    }
}

/// MakeWriter implementation for tracing_subscriber
pub struct MakeLogRingWriter {
    ring: LogRing,
}

impl MakeLogRingWriter {
    /// Create a MakeWriter feeding the given ring
    #[must_use]
    pub fn new(ring: LogRing) -> Self {
        Self { ring }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for MakeLogRingWriter {
    type Writer = LogRingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogRingWriter::new(self.ring.clone())
    }
}
