// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optional plain-text routing trace.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Line-oriented diagnostic log of one routing run.
///
/// A disabled trace accepts and drops every line. Write failures disable the
/// trace for the rest of the run.
#[derive(Default)]
pub struct TraceLog {
    out: Option<BufWriter<File>>,
}

impl TraceLog {
    pub fn disabled() -> Self {
        Self { out: None }
    }

    /// Create or truncate the trace file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
        })
    }

    /// Trace to `path` if given, degrading to no trace when it can't be opened.
    pub fn open(path: Option<&Path>) -> Self {
        match path {
            None => Self::disabled(),
            Some(path) => Self::create(path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Routing trace disabled");
                Self::disabled()
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Some(out) = self.out.as_mut() {
            if let Err(e) = writeln!(out, "{args}") {
                tracing::warn!(error = %e, "Routing trace write failed");
                self.out = None;
            }
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if let Err(e) = out.flush() {
                tracing::warn!(error = %e, "Routing trace flush failed");
            }
        }
    }
}

impl Drop for TraceLog {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_trace_drops_lines() {
        let mut trace = TraceLog::open(None);
        trace.line(format_args!("bounds {}", 1));
        assert!(!trace.is_enabled());
    }

    #[test]
    fn writes_one_line_per_call() {
        let path = std::env::temp_dir().join(format!("autoroute-trace-{}.log", std::process::id()));
        {
            let mut trace = TraceLog::open(Some(&path));
            assert!(trace.is_enabled());
            trace.line(format_args!("first"));
            trace.line(format_args!("second {}", 2));
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "first\nsecond 2\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unopenable_path_degrades() {
        let path = std::env::temp_dir().join("no-such-dir-for-trace").join("trace.log");
        let trace = TraceLog::open(Some(&path));
        assert!(!trace.is_enabled());
    }
}
