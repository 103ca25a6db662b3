//! Genesis inspection command

use crate::commands::load_ledger;
use crate::error::CliError;
use crate::output::{ledger_summary, Output};
use clap::Args;
use std::path::PathBuf;

/// Build the genesis ledger and print its summary
#[derive(Debug, Args)]
pub struct GenesisCommand {
    /// Genesis file (JSON)
    #[arg(long)]
    pub genesis: Option<PathBuf>,

    /// Use the KubitCoin defaults with this owner instead of a genesis file
    #[arg(long)]
    pub owner: Option<String>,
}

impl GenesisCommand {
    /// Execute the command
    pub fn execute(&self, json: bool) -> Result<(), CliError> {
        let ledger = load_ledger(self.genesis.as_deref(), self.owner.as_deref())?;
        ledger_summary(Output::new(json), &ledger).print();
        Ok(())
    }
}
