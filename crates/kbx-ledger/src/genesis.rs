//! Genesis configuration and ledger construction

use crate::ledger::Ledger;
use crate::policy::ApprovalPolicy;
use kbx_primitives::{parse_amount, scale_units, Address, Amount, Decimals, PrimitiveError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Genesis error types
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Invalid genesis configuration
    #[error("invalid genesis config: {0}")]
    InvalidConfig(String),
    /// A field holds a malformed address or amount
    #[error("invalid genesis field {field}: {source}")]
    InvalidField {
        /// Field name in the genesis document
        field: &'static str,
        /// Underlying parse error
        source: PrimitiveError,
    },
    /// Genesis file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Genesis file is not valid JSON for this schema
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for genesis operations
pub type GenesisResult<T> = Result<T, GenesisError>;

/// Genesis configuration, fixed for the lifetime of the ledger.
///
/// The supply is given either in base units (`total_supply`, decimal or hex
/// string) or in whole tokens (`supply_tokens`, scaled by `decimals`), never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Display scaling exponent
    #[serde(default = "default_decimals")]
    pub decimals: Decimals,
    /// Initial supply in base units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
    /// Initial supply in whole tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_tokens: Option<u64>,
    /// Owner and initial holder (hex address)
    pub owner: String,
    /// Allowance decrease policy
    #[serde(default)]
    pub approval_policy: ApprovalPolicy,
}

fn default_decimals() -> Decimals {
    18
}

impl GenesisConfig {
    /// KubitCoin defaults: 500,000,000 KBX at 18 decimals, held by `owner`.
    pub fn kubitcoin(owner: Address) -> Self {
        Self {
            name: "KubitCoin".to_string(),
            symbol: "KBX".to_string(),
            decimals: default_decimals(),
            total_supply: None,
            supply_tokens: Some(500_000_000),
            owner: owner.to_hex(),
            approval_policy: ApprovalPolicy::Clamp,
        }
    }

    /// Parse from a JSON document
    pub fn from_json_str(json: &str) -> GenesisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> GenesisResult<Self> {
        tracing::info!("Loading genesis from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Owner address
    pub fn parse_owner(&self) -> GenesisResult<Address> {
        Address::from_hex(&self.owner).map_err(|e| invalid_field("owner", e))
    }

    /// Initial supply in base units
    pub fn parse_supply(&self) -> GenesisResult<Amount> {
        match (&self.total_supply, self.supply_tokens) {
            (Some(raw), None) => parse_amount(raw).map_err(|e| invalid_field("total_supply", e)),
            (None, Some(tokens)) => {
                scale_units(tokens, self.decimals).map_err(|e| invalid_field("supply_tokens", e))
            }
            (Some(_), Some(_)) => Err(GenesisError::InvalidConfig(
                "set only one of total_supply and supply_tokens".to_string(),
            )),
            (None, None) => Err(GenesisError::InvalidConfig(
                "one of total_supply or supply_tokens is required".to_string(),
            )),
        }
    }
}

fn invalid_field(field: &'static str, err: impl Into<PrimitiveError>) -> GenesisError {
    GenesisError::InvalidField {
        field,
        source: err.into(),
    }
}

impl Ledger {
    /// Build the genesis ledger described by `config`
    pub fn from_genesis(config: &GenesisConfig) -> GenesisResult<Self> {
        let owner = config.parse_owner()?;
        let supply = config.parse_supply()?;

        let ledger = Ledger::new_with_policy(
            config.name.clone(),
            config.symbol.clone(),
            config.decimals,
            supply,
            owner,
            config.approval_policy,
        );

        tracing::info!(
            "Genesis ledger initialized: {} ({}) supply={} decimals={} owner={}",
            config.name,
            config.symbol,
            supply,
            config.decimals,
            owner
        );

        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbx_primitives::AmountError;
    use std::io::Write;

    const OWNER_HEX: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_kubitcoin_defaults() {
        let owner = Address::from_hex(OWNER_HEX).unwrap();
        let ledger = Ledger::from_genesis(&GenesisConfig::kubitcoin(owner)).unwrap();
        assert_eq!(ledger.name(), "KubitCoin");
        assert_eq!(ledger.symbol(), "KBX");
        assert_eq!(ledger.decimals(), 18);
        assert_eq!(ledger.total_supply(), scale_units(500_000_000, 18).unwrap());
        assert_eq!(ledger.balance_of(&owner), ledger.total_supply());
    }

    #[test]
    fn test_genesis_config_serde() {
        let json = r#"{
            "name": "KubitCoin",
            "symbol": "KBX",
            "total_supply": "0x3e8",
            "owner": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "approval_policy": "strict"
        }"#;
        let config = GenesisConfig::from_json_str(json).unwrap();
        assert_eq!(config.decimals, 18);
        assert_eq!(config.approval_policy, ApprovalPolicy::Strict);

        let ledger = Ledger::from_genesis(&config).unwrap();
        assert_eq!(ledger.total_supply(), Amount::from(1_000u64));
        assert_eq!(ledger.approval_policy(), ApprovalPolicy::Strict);
    }

    #[test]
    fn test_genesis_rejects_bad_owner() {
        let mut config = GenesisConfig::kubitcoin(Address::ZERO);
        config.owner = "0x1234".to_string();
        let err = Ledger::from_genesis(&config).unwrap_err();
        assert!(matches!(
            err,
            GenesisError::InvalidField {
                field: "owner",
                source: PrimitiveError::Address(_),
            }
        ));
        assert!(err.to_string().contains("owner"));
    }

    #[test]
    fn test_genesis_supply_sources_are_exclusive() {
        let mut config = GenesisConfig::kubitcoin(Address::ZERO);
        config.total_supply = Some("100".to_string());
        assert!(matches!(config.parse_supply(), Err(GenesisError::InvalidConfig(_))));

        config.total_supply = None;
        config.supply_tokens = None;
        assert!(matches!(config.parse_supply(), Err(GenesisError::InvalidConfig(_))));

        config.total_supply = Some("not a number".to_string());
        assert!(matches!(
            config.parse_supply(),
            Err(GenesisError::InvalidField {
                field: "total_supply",
                source: PrimitiveError::Amount(AmountError::Invalid(_)),
            })
        ));
    }

    #[test]
    fn test_genesis_supply_overflow() {
        let mut config = GenesisConfig::kubitcoin(Address::ZERO);
        config.decimals = 77;
        assert!(matches!(
            config.parse_supply(),
            Err(GenesisError::InvalidField {
                field: "supply_tokens",
                source: PrimitiveError::Amount(AmountError::Overflow),
            })
        ));
    }

    #[test]
    fn test_load_genesis_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let config = GenesisConfig::kubitcoin(Address::from_hex(OWNER_HEX).unwrap());
        file.write_all(serde_json::to_string_pretty(&config).unwrap().as_bytes())
            .unwrap();

        let loaded = GenesisConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = GenesisConfig::load(Path::new("/nonexistent/genesis.json"));
        assert!(matches!(result, Err(GenesisError::Io(_))));
    }
}
