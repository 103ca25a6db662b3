//! Script replay command

use crate::commands::{load_ledger, run_steps};
use crate::error::CliError;
use crate::output::{ledger_summary, Output};
use crate::script::{load_script, outcome_label};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

/// Replay a script of operations against a fresh genesis ledger.
///
/// If a step contradicts its `expect`, the error carries every step report
/// so far; `--json` prints them under `steps` next to the error.
#[derive(Debug, Args)]
pub struct ReplayCommand {
    /// Genesis file (JSON)
    #[arg(long)]
    pub genesis: Option<PathBuf>,

    /// Use the KubitCoin defaults with this owner instead of a genesis file
    #[arg(long)]
    pub owner: Option<String>,

    /// Script file (JSON array of operations)
    #[arg(long)]
    pub script: PathBuf,
}

impl ReplayCommand {
    /// Execute the command
    pub fn execute(&self, json: bool) -> Result<(), CliError> {
        let mut ledger = load_ledger(self.genesis.as_deref(), self.owner.as_deref())?;
        let steps = load_script(&self.script)?;

        let mut reports = Vec::with_capacity(steps.len());
        let replayed = run_steps(&mut ledger, &steps, |n, step, result| {
            let outcome = outcome_label(result);
            if !json {
                println!("[{:>3}] {} by {}: {}", n, step.op.name(), step.op.caller(), outcome);
            }
            reports.push(json!({
                "step": n,
                "op": step.op.name(),
                "caller": step.op.caller().to_hex(),
                "outcome": outcome,
            }));
        });
        if let Err(e) = replayed {
            return Err(CliError::ReplayStopped {
                steps: reports,
                source: Box::new(e),
            });
        }

        tracing::info!("Replayed {} steps", steps.len());
        ledger_summary(Output::new(json), &ledger)
            .field_value("steps", json!(reports))
            .print();
        Ok(())
    }
}
