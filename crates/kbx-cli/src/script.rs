//! Replay scripts: a JSON array of operations with optional expected outcomes
//!
//! ```json
//! [
//!   {"op": "pause", "caller": "0x..01"},
//!   {"op": "transfer", "caller": "0x..01", "to": "0x..02", "amount": "10", "expect": "paused"}
//! ]
//! ```

use crate::error::CliError;
use kbx_ledger::{ErrorKind, LedgerResult, Operation};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Outcome a script step asserts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The operation succeeds
    Ok,
    /// The operation fails with this kind
    Fails(ErrorKind),
}

impl Expectation {
    fn parse(s: &str) -> Option<Self> {
        if s == "ok" {
            return Some(Expectation::Ok);
        }
        serde_json::from_value(Value::String(s.to_string()))
            .ok()
            .map(Expectation::Fails)
    }

    /// Whether `result` matches
    pub fn matches(&self, result: &LedgerResult<()>) -> bool {
        match (self, result) {
            (Expectation::Ok, Ok(())) => true,
            (Expectation::Fails(kind), Err(e)) => e.kind() == *kind,
            _ => false,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Ok => f.write_str("ok"),
            Expectation::Fails(kind) => write!(f, "{}", kind),
        }
    }
}

/// One scripted operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// Operation to apply
    pub op: Operation,
    /// Outcome to check, if any
    pub expect: Option<Expectation>,
}

/// Outcome label used in step reports: `ok` or the failure kind
pub fn outcome_label(result: &LedgerResult<()>) -> String {
    match result {
        Ok(()) => "ok".to_string(),
        Err(e) => e.kind().to_string(),
    }
}

/// Parse a script document
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, CliError> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, mut value)| {
            let step = i + 1;
            let expect = match value.as_object_mut().and_then(|o| o.remove("expect")) {
                None => None,
                Some(Value::String(s)) => Some(Expectation::parse(&s).ok_or_else(|| {
                    CliError::Script(format!("step {}: unknown expected outcome {:?}", step, s))
                })?),
                Some(other) => {
                    return Err(CliError::Script(format!(
                        "step {}: expect must be a string, got {}",
                        step, other
                    )))
                }
            };
            let op: Operation = serde_json::from_value(value)
                .map_err(|e| CliError::Script(format!("step {}: {}", step, e)))?;
            Ok(ScriptStep { op, expect })
        })
        .collect()
}

/// Load and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, CliError> {
    tracing::debug!("Loading script from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbx_ledger::LedgerError;
    use kbx_primitives::{Address, Amount};

    #[test]
    fn test_parse_script_with_expectations() {
        let json = r#"[
            {"op": "pause", "caller": "0x0000000000000000000000000000000000000001", "expect": "ok"},
            {"op": "burn", "caller": "0x0000000000000000000000000000000000000001", "amount": "5", "expect": "paused"},
            {"op": "unpause", "caller": "0x0000000000000000000000000000000000000001"}
        ]"#;
        let steps = parse_script(json).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].expect, Some(Expectation::Ok));
        assert_eq!(
            steps[1],
            ScriptStep {
                op: Operation::Burn { caller: Address::from_low_u8(1), amount: Amount::from(5u64) },
                expect: Some(Expectation::Fails(ErrorKind::Paused)),
            }
        );
        assert_eq!(steps[2].expect, None);
    }

    #[test]
    fn test_parse_script_reports_step_number() {
        let json = r#"[
            {"op": "pause", "caller": "0x0000000000000000000000000000000000000001"},
            {"op": "pause", "caller": "0x01", "expect": "ok"}
        ]"#;
        match parse_script(json) {
            Err(CliError::Script(msg)) => assert!(msg.starts_with("step 2:"), "{}", msg),
            other => panic!("expected script error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_script_rejects_unknown_expectation() {
        let json = r#"[{"op": "pause", "caller": "0x0000000000000000000000000000000000000001", "expect": "boom"}]"#;
        assert!(matches!(parse_script(json), Err(CliError::Script(_))));
    }

    #[test]
    fn test_expectation_matches() {
        assert!(Expectation::Ok.matches(&Ok(())));
        assert!(!Expectation::Ok.matches(&Err(LedgerError::Paused)));
        assert!(Expectation::Fails(ErrorKind::Paused).matches(&Err(LedgerError::Paused)));
        assert!(!Expectation::Fails(ErrorKind::NotOwner).matches(&Err(LedgerError::Paused)));
        assert!(!Expectation::Fails(ErrorKind::Paused).matches(&Ok(())));
    }
}
