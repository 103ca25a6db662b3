//! CLI command implementations

pub mod genesis;
pub mod query;
pub mod replay;

use crate::error::CliError;
use crate::script::{outcome_label, ScriptStep};
use kbx_ledger::{GenesisConfig, Ledger, LedgerResult};
use kbx_primitives::Address;
use std::path::Path;

/// Parse an address argument
pub fn parse_address(s: &str) -> Result<Address, CliError> {
    Address::from_hex(s).map_err(|e| CliError::InvalidAddress(format!("{}: {}", s, e)))
}

/// Build the genesis ledger from a file, or the KubitCoin defaults held by `owner`
pub fn load_ledger(genesis: Option<&Path>, owner: Option<&str>) -> Result<Ledger, CliError> {
    let config = match (genesis, owner) {
        (Some(path), None) => GenesisConfig::load(path)?,
        (None, Some(owner)) => GenesisConfig::kubitcoin(parse_address(owner)?),
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidInput(
                "--genesis and --owner are mutually exclusive".to_string(),
            ))
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "either --genesis or --owner is required".to_string(),
            ))
        }
    };
    Ok(Ledger::from_genesis(&config)?)
}

/// Apply every step in order, stopping at the first outcome that contradicts its expectation.
///
/// `on_step` sees each step number, step and result as it is applied.
pub fn run_steps(
    ledger: &mut Ledger,
    steps: &[ScriptStep],
    mut on_step: impl FnMut(usize, &ScriptStep, &LedgerResult<()>),
) -> Result<(), CliError> {
    for (i, step) in steps.iter().enumerate() {
        let result = ledger.apply(&step.op);
        on_step(i + 1, step, &result);

        if let Some(expect) = step.expect {
            if !expect.matches(&result) {
                return Err(CliError::UnexpectedOutcome {
                    step: i + 1,
                    op: step.op.name(),
                    expected: expect.to_string(),
                    actual: outcome_label(&result),
                });
            }
        }
    }
    ledger.check_invariants()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Expectation;
    use kbx_ledger::{ErrorKind, Operation};
    use kbx_primitives::Amount;

    const OWNER: &str = "0x0000000000000000000000000000000000000001";

    #[test]
    fn test_load_ledger_requires_exactly_one_source() {
        assert!(matches!(load_ledger(None, None), Err(CliError::InvalidInput(_))));
        assert!(matches!(
            load_ledger(Some(Path::new("genesis.json")), Some(OWNER)),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(load_ledger(None, Some("0xbad")), Err(CliError::InvalidAddress(_))));

        let ledger = load_ledger(None, Some(OWNER)).unwrap();
        assert_eq!(ledger.symbol(), "KBX");
    }

    #[test]
    fn test_run_steps_stops_at_mismatch() {
        let owner = parse_address(OWNER).unwrap();
        let mut ledger = load_ledger(None, Some(OWNER)).unwrap();
        let steps = vec![
            ScriptStep { op: Operation::Pause { caller: owner }, expect: Some(Expectation::Ok) },
            ScriptStep {
                op: Operation::Burn { caller: owner, amount: Amount::one() },
                expect: Some(Expectation::Ok),
            },
            ScriptStep { op: Operation::Unpause { caller: owner }, expect: None },
        ];

        let mut seen = Vec::new();
        let err = run_steps(&mut ledger, &steps, |n, _, r| seen.push((n, outcome_label(r)))).unwrap_err();
        match err {
            CliError::UnexpectedOutcome { step, op, expected, actual } => {
                assert_eq!(step, 2);
                assert_eq!(op, "burn");
                assert_eq!(expected, "ok");
                assert_eq!(actual, ErrorKind::Paused.as_str());
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(seen, vec![(1, "ok".to_string()), (2, "paused".to_string())]);
        assert!(ledger.is_paused());
    }
}
