//! Narrow adapter interface over the wallet and chain-submission boundary.
//!
//! The orchestrator only ever talks to these traits. Production code plugs
//! in the alloy-backed [`service`] implementations; tests substitute
//! [`mock`], which removes any reliance on an ambient wallet global.

use async_trait::async_trait;
use std::sync::Arc;

pub mod mock;
mod service;

pub use service::LocalWalletProvider;

use crate::artifact::{ArtifactError, DeploymentArtifact};
use crate::deploy::{DeployParams, Deployed, PendingDeployment};

/// A wallet capability, either present or absent in the execution
/// environment.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet is present. When this returns `false` no other
    /// operation on the provider may be attempted.
    fn is_available(&self) -> bool;

    /// Obtains a transaction signer.
    ///
    /// May suspend awaiting user approval in the wallet's own UI; no timeout
    /// is imposed here and the operation is not cancellable once issued.
    async fn get_signer(&self) -> Result<Arc<dyn DeploySigner>, WalletError>;
}

/// A signer able to construct deployable-contract handles.
pub trait DeploySigner: Send + Sync {
    /// Constructs a contract factory from the immutable artifact and this
    /// signer. Pure construction: any failure is attributed to a malformed
    /// artifact.
    fn token_factory(
        &self,
        artifact: &DeploymentArtifact,
    ) -> Result<Arc<dyn TokenFactory>, WalletError>;
}

/// A deployable-contract handle bound to a signer.
#[async_trait]
pub trait TokenFactory: Send + Sync {
    /// Invokes the deployment call; suspends until the transaction is
    /// accepted into the network's pending state.
    async fn submit(
        &self,
        params: &DeployParams,
    ) -> Result<PendingDeployment, WalletError>;

    /// Suspends until the deployment transaction is confirmed, then
    /// extracts the deployed contract address and transaction hash.
    async fn confirm(
        &self,
        pending: PendingDeployment,
    ) -> Result<Deployed, WalletError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Wallet refused to provide a signer: {reason}")]
    SignerRejected { reason: String },

    #[error("Transaction rejected: {reason}")]
    TransactionRejected { reason: String },

    #[error("RPC error: {message}")]
    RpcError { message: String },

    #[error("Malformed deployment artifact: {0}")]
    Artifact(#[from] ArtifactError),
}
