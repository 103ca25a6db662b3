//! Output formatting

use kbx_ledger::Ledger;
use serde_json::{json, Map, Value};

/// Output builder for formatted CLI output
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    lines: Vec<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            lines: Vec::new(),
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a JSON value field to the output
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Append a human-readable line
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Print the output
    pub fn print(self) {
        if self.json_mode {
            let json = Value::Object(self.fields);
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        } else {
            for line in self.lines {
                println!("{}", line);
            }
        }
    }
}

/// Append the ledger summary (metadata, supply, owner, membership, pause flag)
pub fn ledger_summary(out: Output, ledger: &Ledger) -> Output {
    let whitelist: Vec<String> = ledger.whitelisted().map(|a| a.to_hex()).collect();
    let blacklist: Vec<String> = ledger.blacklisted().map(|a| a.to_hex()).collect();

    out.field("name", ledger.name())
        .field("symbol", ledger.symbol())
        .field_value("decimals", json!(ledger.decimals()))
        .field("total_supply", ledger.total_supply())
        .field("owner", ledger.owner())
        .field_value("number_of_whitelists", json!(ledger.number_of_whitelists()))
        .field_value("whitelist", json!(whitelist))
        .field_value("blacklist", json!(blacklist))
        .field_value("paused", json!(ledger.is_paused()))
        .line(format!("Token:         {} ({})", ledger.name(), ledger.symbol()))
        .line(format!("Decimals:      {}", ledger.decimals()))
        .line(format!("Total supply:  {}", ledger.total_supply()))
        .line(format!("Owner:         {}", ledger.owner()))
        .line(format!("Whitelisted:   {}", ledger.number_of_whitelists()))
        .line(format!("Blacklisted:   {}", blacklist.len()))
        .line(format!("Paused:        {}", ledger.is_paused()))
}
