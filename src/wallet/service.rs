use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::U256;
use alloy::providers::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use url::Url;

use super::{DeploySigner, TokenFactory, WalletError, WalletProvider};
use crate::artifact::{ArtifactError, DeploymentArtifact};
use crate::deploy::{DeployParams, Deployed, PendingDeployment};

/// Wallet provider backed by an HTTP RPC endpoint and a local signing key.
///
/// Availability mirrors the environment: a session configured without an RPC
/// endpoint or key has no wallet capability, and `is_available` reports so.
pub struct LocalWalletProvider {
    rpc_url: Option<Url>,
    signer: Option<PrivateKeySigner>,
}

impl LocalWalletProvider {
    #[must_use]
    pub const fn new(
        rpc_url: Option<Url>,
        signer: Option<PrivateKeySigner>,
    ) -> Self {
        Self { rpc_url, signer }
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    fn is_available(&self) -> bool {
        self.rpc_url.is_some() && self.signer.is_some()
    }

    async fn get_signer(&self) -> Result<Arc<dyn DeploySigner>, WalletError> {
        let (Some(rpc_url), Some(signer)) = (&self.rpc_url, &self.signer)
        else {
            return Err(WalletError::SignerRejected {
                reason: "no wallet is configured for this session".to_string(),
            });
        };

        let wallet = EthereumWallet::from(signer.clone());
        let provider =
            ProviderBuilder::new().wallet(wallet).connect_http(rpc_url.clone());

        Ok(Arc::new(RpcDeploySigner { provider }))
    }
}

struct RpcDeploySigner<P> {
    provider: P,
}

impl<P: Provider + Clone + Send + Sync + 'static> DeploySigner
    for RpcDeploySigner<P>
{
    fn token_factory(
        &self,
        artifact: &DeploymentArtifact,
    ) -> Result<Arc<dyn TokenFactory>, WalletError> {
        if artifact.bytecode().is_empty() {
            return Err(WalletError::Artifact(ArtifactError::EmptyBytecode));
        }

        Ok(Arc::new(EquityTokenFactory {
            provider: self.provider.clone(),
            artifact: artifact.clone(),
        }))
    }
}

/// Deploys the equity token contract by appending the ABI-encoded
/// constructor arguments to the artifact bytecode and submitting a
/// contract-creation transaction.
///
/// Generic over the provider type to support both production RPC providers
/// and mock providers for testing.
struct EquityTokenFactory<P> {
    provider: P,
    artifact: DeploymentArtifact,
}

impl<P> EquityTokenFactory<P> {
    /// ABI-encodes the constructor argument tuple in the exact wire order:
    /// `(name, symbol, totalShares, isin, nominalValue, currency, rights)`.
    fn constructor_args(params: &DeployParams) -> Vec<u8> {
        let args: (String, String, U256, String, U256, String, [bool; 8]) = (
            params.token_name.clone(),
            params.token_symbol.clone(),
            params.total_shares,
            params.isin.clone(),
            params.nominal_value,
            params.currency.code().to_string(),
            params.rights.to_array(),
        );
        args.abi_encode_params()
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> TokenFactory
    for EquityTokenFactory<P>
{
    async fn submit(
        &self,
        params: &DeployParams,
    ) -> Result<PendingDeployment, WalletError> {
        let mut code = self.artifact.bytecode().to_vec();
        code.extend(Self::constructor_args(params));

        let tx = TransactionRequest::default().with_deploy_code(code);

        let pending =
            self.provider.send_transaction(tx).await.map_err(|e| {
                WalletError::TransactionRejected {
                    reason: format!("Failed to send transaction: {e}"),
                }
            })?;

        Ok(PendingDeployment { tx_hash: *pending.tx_hash() })
    }

    async fn confirm(
        &self,
        pending: PendingDeployment,
    ) -> Result<Deployed, WalletError> {
        let receipt = PendingTransactionBuilder::new(
            self.provider.root().clone(),
            pending.tx_hash,
        )
        .get_receipt()
        .await
        .map_err(|e| WalletError::RpcError {
            message: format!("Failed to get transaction receipt: {e}"),
        })?;

        if !receipt.status() {
            return Err(WalletError::TransactionRejected {
                reason: format!(
                    "Deployment transaction reverted: {:?}",
                    receipt.transaction_hash
                ),
            });
        }

        let contract_address =
            receipt.contract_address.ok_or_else(|| WalletError::RpcError {
                message: format!(
                    "Receipt has no contract address: {:?}",
                    receipt.transaction_hash
                ),
            })?;

        Ok(Deployed {
            contract_address,
            tx_hash: receipt.transaction_hash,
            confirmed_at: Utc::now(),
        })
    }
}
