use anyhow::{Context, Result};
use artist_token_config::DappConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use url::Url;

/// Command-line arguments for the artist token client
#[derive(Parser, Debug, Clone)]
#[command(
    name = "artist-token",
    version = env!("CARGO_PKG_VERSION"),
    about = "Artist Token CLI - register, redeem and list artists on the artist token contract"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long, default_value = "artist_token.toml", value_name = "FILE")]
    pub config: PathBuf,

    /// Overrides the configured JSON-RPC endpoint
    #[arg(long = "provider-url", env = "ARTIST_TOKEN_PROVIDER", value_name = "URL")]
    pub provider_url: Option<String>,

    /// Overrides the deployment metadata location (path or http(s) URL)
    #[arg(long, value_name = "SOURCE")]
    pub metadata: Option<String>,

    /// Overrides the configured log level
    #[arg(long = "log-level", value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve the session and print the account, network and contract
    Status,

    /// Register an artist and list all artists once it is mined
    Register {
        /// Artist name (at most 32 ASCII bytes)
        #[arg(long)]
        name: String,

        /// Number of tokens to mint
        #[arg(long)]
        count: String,

        /// Minimum token price in ether
        #[arg(long)]
        price: String,
    },

    /// Run the preset redeem action
    Redeem,

    /// List every registered artist
    List,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl Cli {
    /// Applies the command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut DappConfig) -> Result<()> {
        if let Some(url) = &self.provider_url {
            config.provider.url =
                Url::parse(url).with_context(|| format!("invalid provider url '{}'", url))?;
        }

        if let Some(source) = &self.metadata {
            config.metadata.source = source.clone();
        }

        if let Some(level) = self.log_level {
            config.logger.level = level.as_str().to_string();
        }

        if self.json_logs {
            config.logger.json = true;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = Cli::try_parse_from(["artist-token", "status"]).unwrap();
        assert_eq!(args.config, PathBuf::from("artist_token.toml"));
        assert_eq!(args.metadata, None);
        assert_eq!(args.log_level, None);
        assert!(!args.json_logs);
        assert_eq!(args.command, Command::Status);
    }

    #[test]
    fn test_register_arguments() {
        let args = Cli::try_parse_from([
            "artist-token",
            "--config",
            "dev.toml",
            "--log-level",
            "debug",
            "register",
            "--name",
            "Pitbull",
            "--count",
            "38",
            "--price",
            "1.2",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("dev.toml"));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(
            args.command,
            Command::Register {
                name: "Pitbull".to_string(),
                count: "38".to_string(),
                price: "1.2".to_string(),
            }
        );
    }

    #[test]
    fn test_register_requires_all_fields() {
        let result = Cli::try_parse_from(["artist-token", "register", "--name", "Pitbull"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["artist-token"]).is_err());
    }

    #[test]
    fn test_overrides_applied_to_config() {
        let args = Cli::try_parse_from([
            "artist-token",
            "--provider-url",
            "http://localhost:8545",
            "--metadata",
            "https://example.org/ArtistTokenContract.json",
            "--log-level",
            "warn",
            "--json-logs",
            "list",
        ])
        .unwrap();

        let mut config = DappConfig::default();
        args.apply(&mut config).unwrap();

        assert_eq!(config.provider.url.as_str(), "http://localhost:8545/");
        assert_eq!(
            config.metadata.source,
            "https://example.org/ArtistTokenContract.json"
        );
        assert_eq!(config.logger.level, "warn");
        assert!(config.logger.json);
    }

    #[test]
    fn test_invalid_provider_url_rejected() {
        let args =
            Cli::try_parse_from(["artist-token", "--provider-url", "not a url", "status"]).unwrap();
        let mut config = DappConfig::default();
        assert!(args.apply(&mut config).is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warn.as_str(), "warn");
    }
}
