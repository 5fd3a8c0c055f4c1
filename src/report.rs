//! Maps terminal deployment outcomes to user-visible messages.

use alloy::primitives::Address;
use url::Url;

use crate::deploy::DeploymentOutcome;

/// Block-explorer link template.
///
/// Links have the shape `<base>/<network>/contract/<address>`; both the
/// explorer host and the network segment are configuration, defaulting to
/// the HashScan testnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    base: Url,
    network: String,
}

impl ExplorerConfig {
    #[must_use]
    pub fn new(base: Url, network: impl Into<String>) -> Self {
        let network = network.into();
        Self { base, network }
    }

    #[must_use]
    pub fn contract_url(&self, address: &Address) -> String {
        format!(
            "{}/{}/contract/{address}",
            self.base.as_str().trim_end_matches('/'),
            self.network
        )
    }
}

/// Renders the terminal outcome of a deployment attempt.
///
/// Success messages carry the deployed address and an explorer link; failure
/// messages carry the captured reason text. The caller resets the request
/// record on success and leaves it untouched on failure.
#[must_use]
pub fn render_outcome(
    outcome: &DeploymentOutcome,
    explorer: &ExplorerConfig,
) -> String {
    match outcome {
        DeploymentOutcome::Success(deployed) => format!(
            "Equity token created successfully!\n\n\
             Token Address: {}\n\
             Transaction: {}\n\n\
             You can view it on the block explorer: {}",
            deployed.contract_address,
            deployed.tx_hash,
            explorer.contract_url(&deployed.contract_address),
        ),
        DeploymentOutcome::Failure(reason) => {
            format!("Failed to create equity token: {reason}")
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use chrono::Utc;

    use super::{ExplorerConfig, render_outcome};
    use crate::deploy::{DeployError, Deployed, DeploymentOutcome};
    use crate::wallet::mock::MOCK_TX_HASH;

    fn testnet_explorer() -> ExplorerConfig {
        ExplorerConfig::new(
            "https://hashscan.io".parse().unwrap(),
            "testnet".to_string(),
        )
    }

    #[test]
    fn test_contract_url_shape() {
        let address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
        assert_eq!(
            testnet_explorer().contract_url(&address),
            "https://hashscan.io/testnet/contract/\
             0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn test_success_message_contains_address_and_link() {
        let deployed = Deployed {
            contract_address: address!(
                "0x5fbdb2315678afecb367f032d93f642f64180aa3"
            ),
            tx_hash: MOCK_TX_HASH,
            confirmed_at: Utc::now(),
        };
        let message = render_outcome(
            &DeploymentOutcome::Success(deployed),
            &testnet_explorer(),
        );

        assert!(message.contains("created successfully"));
        assert!(
            message.contains("0x5FbDB2315678afecb367f032d93F642f64180aa3")
        );
        assert!(message.contains("https://hashscan.io/testnet/contract/"));
    }

    #[test]
    fn test_failure_message_contains_reason() {
        let message = render_outcome(
            &DeploymentOutcome::Failure(DeployError::SubmissionRejected {
                reason: "user rejected the transaction".to_string(),
            }),
            &testnet_explorer(),
        );

        assert_eq!(
            message,
            "Failed to create equity token: user rejected the transaction"
        );
    }

    #[test]
    fn test_wallet_unavailable_message_instructs_the_user() {
        let message = render_outcome(
            &DeploymentOutcome::Failure(DeployError::WalletUnavailable),
            &testnet_explorer(),
        );

        assert!(message.contains("Install or enable a wallet"));
    }
}
