//! Console sinks for client output.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::domain::Console;

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&self, message: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // a closed stdout is not worth failing the process over
        let _ = writeln!(handle, "{message}");
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// All captured output joined by newlines.
    pub fn output(&self) -> String {
        self.lines().join("\n")
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Console for BufferConsole {
    fn line(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}
