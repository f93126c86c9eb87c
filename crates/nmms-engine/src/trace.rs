//! Proof-trace capture.
//!
//! Trace capture is a caller-controlled side channel: the search reports
//! each step to a [`TraceSink`] passed in by the caller, not to any global
//! logging facility. Traces are diagnostics only; nothing in the calculus
//! depends on them.

/// Observer for proof-search steps.
pub trait TraceSink {
    /// Called once per step with the search depth at which it happened.
    fn record(&mut self, depth: usize, message: &str);
}

/// Sink that discards every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _depth: usize, _message: &str) {}
}

/// Sink that collects steps as indented lines.
#[derive(Debug, Clone, Default)]
pub struct CollectedTrace {
    lines: Vec<String>,
}

impl CollectedTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl TraceSink for CollectedTrace {
    fn record(&mut self, depth: usize, message: &str) {
        self.lines.push(format!("{:indent$}{}", "", message, indent = depth * 2));
    }
}
