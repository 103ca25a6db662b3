//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Genesis could not be built
    #[error("Genesis error: {0}")]
    Genesis(#[from] kbx_ledger::GenesisError),

    /// Malformed replay script
    #[error("Script error: {0}")]
    Script(String),

    /// A scripted step did not end the way the script said it would
    #[error("Step {step} ({op}): expected {expected}, got {actual}")]
    UnexpectedOutcome {
        /// 1-based step number
        step: usize,
        /// Operation name
        op: &'static str,
        /// Outcome named in the script
        expected: String,
        /// Outcome observed
        actual: String,
    },

    /// Replay stopped early; carries the reports of the steps that did run
    #[error("{source}")]
    ReplayStopped {
        /// Per-step reports up to and including the failing step
        steps: Vec<serde_json::Value>,
        /// Why the replay stopped
        source: Box<CliError>,
    },

    /// Ledger invariant broken after replay
    #[error("Invariant violated: {0}")]
    Invariant(#[from] kbx_ledger::InvariantViolation),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// JSON error object printed in `--json` mode
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "error": self.to_string(),
            "success": false
        });
        if let CliError::ReplayStopped { steps, .. } = self {
            value["steps"] = serde_json::json!(steps);
        }
        value
    }
}
