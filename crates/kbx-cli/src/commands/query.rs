//! Read-only ledger queries

use crate::commands::{load_ledger, parse_address, run_steps};
use crate::error::CliError;
use crate::output::Output;
use crate::script::load_script;
use clap::{Args, Subcommand};
use kbx_ledger::Ledger;
use serde_json::json;
use std::path::PathBuf;

/// Answer one query, optionally after replaying a script
#[derive(Debug, Args)]
pub struct QueryCommand {
    /// Genesis file (JSON)
    #[arg(long, global = true)]
    pub genesis: Option<PathBuf>,

    /// Use the KubitCoin defaults with this owner instead of a genesis file
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Script to replay before answering
    #[arg(long, global = true)]
    pub script: Option<PathBuf>,

    #[command(subcommand)]
    pub query: Query,
}

/// Available queries
#[derive(Debug, Subcommand)]
pub enum Query {
    /// Balance of an account
    Balance {
        /// Account address
        account: String,
    },
    /// Remaining allowance of a spender over an owner's balance
    Allowance {
        /// Balance owner
        holder: String,
        /// Spender
        spender: String,
    },
    /// Whitelist membership
    Whitelisted {
        /// Account address
        account: String,
    },
    /// Blacklist membership
    Blacklisted {
        /// Account address
        account: String,
    },
    /// Total supply
    Supply,
    /// Pause flag
    Paused,
}

impl QueryCommand {
    /// Execute the command
    pub fn execute(&self, json: bool) -> Result<(), CliError> {
        let mut ledger = load_ledger(self.genesis.as_deref(), self.owner.as_deref())?;
        if let Some(script) = &self.script {
            let steps = load_script(script)?;
            run_steps(&mut ledger, &steps, |_, _, _| {})?;
        }
        self.query.answer(&ledger, Output::new(json))?.print();
        Ok(())
    }
}

impl Query {
    fn answer(&self, ledger: &Ledger, out: Output) -> Result<Output, CliError> {
        let out = match self {
            Query::Balance { account } => {
                let account = parse_address(account)?;
                let balance = ledger.balance_of(&account);
                out.field("account", account)
                    .field("balance", balance)
                    .line(balance.to_string())
            }
            Query::Allowance { holder, spender } => {
                let holder = parse_address(holder)?;
                let spender = parse_address(spender)?;
                let allowance = ledger.allowance(&holder, &spender);
                out.field("owner", holder)
                    .field("spender", spender)
                    .field("allowance", allowance)
                    .line(allowance.to_string())
            }
            Query::Whitelisted { account } => {
                let account = parse_address(account)?;
                let member = ledger.is_whitelisted(&account);
                out.field("account", account)
                    .field_value("whitelisted", json!(member))
                    .field_value("number_of_whitelists", json!(ledger.number_of_whitelists()))
                    .line(member.to_string())
            }
            Query::Blacklisted { account } => {
                let account = parse_address(account)?;
                let member = ledger.is_blacklisted(&account);
                out.field("account", account)
                    .field_value("blacklisted", json!(member))
                    .line(member.to_string())
            }
            Query::Supply => out
                .field("total_supply", ledger.total_supply())
                .line(ledger.total_supply().to_string()),
            Query::Paused => out
                .field_value("paused", json!(ledger.is_paused()))
                .line(ledger.is_paused().to_string()),
        };
        Ok(out)
    }
}
