//! Pipe-friendly JSON output envelopes.

use nmms_engine::ProofResult;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub status: &'static str,
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub depth_reached: usize,
    pub cache_hits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
}

impl AskResponse {
    pub fn new<T: ToString + Ord>(
        result: &ProofResult,
        antecedent: &BTreeSet<T>,
        consequent: &BTreeSet<T>,
        with_trace: bool,
    ) -> Self {
        AskResponse {
            status: result.status(),
            antecedent: antecedent.iter().map(|s| s.to_string()).collect(),
            consequent: consequent.iter().map(|s| s.to_string()).collect(),
            depth_reached: result.depth_reached,
            cache_hits: result.cache_hits,
            trace: with_trace.then(|| result.trace.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TellResponse {
    pub status: &'static str,
    pub detail: String,
}

impl TellResponse {
    pub fn ok(detail: impl Into<String>) -> Self {
        TellResponse {
            status: "ok",
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

pub fn emit_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(error) => eprintln!("error: {}", error),
    }
}

/// Report an error in the requested mode. Quiet suppresses everything;
/// JSON mode emits a machine-readable envelope on stdout.
pub fn emit_error(message: &str, json_mode: bool, quiet: bool) {
    if quiet {
        return;
    }
    if json_mode {
        emit_json(&ErrorResponse {
            status: "error",
            message: message.to_string(),
        });
    } else {
        eprintln!("error: {}", message);
    }
}
