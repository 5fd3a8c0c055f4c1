use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

use alloy::signers::local::PrivateKeySigner;

use crate::artifact::{ArtifactError, DeploymentArtifact};
use crate::report::ExplorerConfig;
use crate::wallet::{LocalWalletProvider, WalletProvider};

#[derive(Debug, Parser)]
#[command(name = "equity-issuance")]
#[command(about = "Builds and deploys equity token issuance requests")]
pub struct Config {
    #[arg(long, env = "RPC_URL", help = "Blockchain RPC endpoint URL")]
    rpc_url: Option<Url>,

    #[arg(
        long,
        env = "PRIVATE_KEY",
        help = "Private key for signing the deployment transaction"
    )]
    private_key: Option<String>,

    #[arg(
        long,
        env = "ARTIFACT_PATH",
        default_value = "artifacts/EquityToken.json",
        help = "Path to the compiled EquityToken contract artifact"
    )]
    artifact_path: PathBuf,

    #[arg(
        long,
        env = "EXPLORER_URL",
        default_value = "https://hashscan.io",
        help = "Block explorer base URL used in success messages"
    )]
    explorer_url: Url,

    #[arg(
        long,
        env = "EXPLORER_NETWORK",
        default_value = "testnet",
        help = "Network segment of explorer links"
    )]
    explorer_network: String,

    #[arg(
        long,
        env = "LOG_LEVEL",
        default_value = "info",
        help = "Log level filter"
    )]
    log_level: LogLevel,
}

impl Config {
    /// Builds the wallet capability for this environment.
    ///
    /// A missing RPC URL or key is not an error here: it yields a provider
    /// that reports itself unavailable, and the orchestrator turns that into
    /// a `WalletUnavailable` failure. An unparseable key is a configuration
    /// error.
    pub fn create_wallet_provider(
        &self,
    ) -> Result<Arc<dyn WalletProvider>, ConfigError> {
        let signer = self
            .private_key
            .as_ref()
            .map(|key| {
                key.parse::<PrivateKeySigner>().map_err(|e| {
                    ConfigError::InvalidPrivateKey(e.to_string())
                })
            })
            .transpose()?;

        Ok(Arc::new(LocalWalletProvider::new(
            self.rpc_url.clone(),
            signer,
        )))
    }

    /// Reads and shape-checks the deployment artifact.
    pub fn load_artifact(&self) -> Result<DeploymentArtifact, ConfigError> {
        let raw = std::fs::read_to_string(&self.artifact_path).map_err(
            |source| ConfigError::ArtifactRead {
                path: self.artifact_path.clone(),
                source,
            },
        )?;
        Ok(DeploymentArtifact::from_json(&raw)?)
    }

    #[must_use]
    pub fn explorer(&self) -> ExplorerConfig {
        ExplorerConfig::new(
            self.explorer_url.clone(),
            self.explorer_network.clone(),
        )
    }

    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// configured level when set.
pub fn setup_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str())),
        )
        .init();
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to read artifact at {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
