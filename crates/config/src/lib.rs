//! Artist Token Configuration Module
//!
//! Configuration types and contract constants shared by the client crates.
//! Every section has a `Default` so a partial TOML file is enough.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Upper bound of gas attached to every state-changing call
pub const DEFAULT_GAS_LIMIT: u64 = 6_385_876;

/// Fee charged by the contract for each minted token (wei)
pub const FEE_PER_TOKEN_WEI: u64 = 20_000_000_000_000;

/// Extra wei added on top of the token fee when registering
pub const VALUE_MARGIN_WEI: u64 = 1_000;

/// Number of decimals of one ether expressed in wei
pub const ETHER_DECIMALS: u32 = 18;

/// Default local development provider (Ganache)
pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:7545";

/// Build artifact produced by the contract compile step
pub const DEFAULT_METADATA_SOURCE: &str = "ArtistTokenContract.json";

pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_REDEEM_NOTICE_DELAY_MS: u64 = 6_000;

/// Contract method names
pub const REGISTER_METHOD: &str = "registerArtist";
pub const COUNT_METHOD: &str = "numArtists";
pub const LOOKUP_METHOD: &str = "artistToAddresses";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DappConfig {
    /// Provider (JSON-RPC endpoint) configuration
    pub provider: ProviderConfig,
    /// Where the deployment metadata is read from
    pub metadata: MetadataConfig,
    /// Contract call parameters
    pub contract: ContractConfig,
    /// Preset redeem action
    pub redeem: RedeemConfig,
    /// Logger configuration
    pub logger: LoggerConfig,
}

impl DappConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads the file when it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint of the wallet/node
    pub url: Url,
    /// HTTP request timeout; `None` leaves it to the transport
    pub request_timeout_secs: Option<u64>,
    /// Interval between receipt polls of a submitted transaction
    pub receipt_poll_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_PROVIDER_URL).expect("default provider url is valid"),
            request_timeout_secs: None,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
        }
    }
}

/// Deployment metadata source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Local path or http(s) URL of the build artifact
    pub source: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_METADATA_SOURCE.to_string(),
        }
    }
}

/// Resolved location of the deployment metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLocation {
    File(PathBuf),
    Http(Url),
}

impl MetadataConfig {
    pub fn location(&self) -> MetadataLocation {
        let source = self.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            if let Ok(url) = Url::parse(source) {
                return MetadataLocation::Http(url);
            }
        }
        MetadataLocation::File(PathBuf::from(source))
    }
}

/// Contract call configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub register_method: String,
    pub count_method: String,
    pub lookup_method: String,
    /// Gas limit attached to state-changing calls
    pub gas_limit: u64,
    pub fee_per_token_wei: u64,
    pub value_margin_wei: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            register_method: REGISTER_METHOD.to_string(),
            count_method: COUNT_METHOD.to_string(),
            lookup_method: LOOKUP_METHOD.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            fee_per_token_wei: FEE_PER_TOKEN_WEI,
            value_margin_wei: VALUE_MARGIN_WEI,
        }
    }
}

/// Preset redeem action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedeemConfig {
    pub name: String,
    pub count: u64,
    /// Minimum price in ether, as a decimal string
    pub price: String,
    /// Delay before the redemption notice is emitted
    pub notice_delay_ms: u64,
    pub notice: String,
}

impl Default for RedeemConfig {
    fn default() -> Self {
        Self {
            name: "lol".to_string(),
            count: 2,
            price: "0.001".to_string(),
            notice_delay_ms: DEFAULT_REDEEM_NOTICE_DELAY_MS,
            notice: "You just redeemed a free holiday at the Bahamas with Pitbull!".to_string(),
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = DappConfig::from_toml_str(
            r#"
            [provider]
            url = "http://localhost:8545"

            [contract]
            gas_limit = 100000
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.url.as_str(), "http://localhost:8545/");
        assert_eq!(
            config.provider.receipt_poll_interval_ms,
            DEFAULT_RECEIPT_POLL_INTERVAL_MS
        );
        assert_eq!(config.contract.gas_limit, 100_000);
        assert_eq!(config.contract.register_method, REGISTER_METHOD);
        assert_eq!(config.metadata, MetadataConfig::default());
    }

    #[test]
    fn metadata_location_detects_urls() {
        let file = MetadataConfig {
            source: "build/contracts/ArtistTokenContract.json".to_string(),
        };
        assert_eq!(
            file.location(),
            MetadataLocation::File(PathBuf::from("build/contracts/ArtistTokenContract.json"))
        );

        let http = MetadataConfig {
            source: "https://example.org/ArtistTokenContract.json".to_string(),
        };
        assert!(matches!(http.location(), MetadataLocation::Http(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = DappConfig::from_toml_str("[provider\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
