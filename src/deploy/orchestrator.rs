use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use super::{
    DeployError, DeployParams, Deployed, DeploymentOutcome, PendingDeployment,
};
use crate::artifact::DeploymentArtifact;
use crate::wallet::{DeploySigner, TokenFactory, WalletProvider};

/// Phase of the deployment protocol.
///
/// `Confirmed` and `Failed` are terminal; every non-terminal phase has an
/// error edge to `Failed`. There is no resume: an interrupted attempt is
/// restarted from `Idle` on the next user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployPhase {
    Idle,
    WalletCheck,
    SignerAcquired,
    FactoryBuilt,
    Submitted,
    Confirmed,
    Failed,
}

impl DeployPhase {
    const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::WalletCheck => "WalletCheck",
            Self::SignerAcquired => "SignerAcquired",
            Self::FactoryBuilt => "FactoryBuilt",
            Self::Submitted => "Submitted",
            Self::Confirmed => "Confirmed",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Drives the five-phase deployment protocol against an injected wallet
/// capability.
///
/// Strictly sequential: each phase awaits its predecessor's result, with
/// suspension points at signer acquisition, submission acceptance, and
/// confirmation. The busy flag guarantees a single in-flight deployment per
/// session; concurrent submissions are rejected, not queued.
pub struct DeploymentOrchestrator {
    wallet: Arc<dyn WalletProvider>,
    artifact: DeploymentArtifact,
    busy: AtomicBool,
    phase: Mutex<DeployPhase>,
}

impl DeploymentOrchestrator {
    #[must_use]
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        artifact: DeploymentArtifact,
    ) -> Self {
        Self {
            wallet,
            artifact,
            busy: AtomicBool::new(false),
            phase: Mutex::new(DeployPhase::Idle),
        }
    }

    /// Last observed phase. Terminal phases stay observable until the next
    /// deployment attempt begins.
    #[must_use]
    pub fn phase(&self) -> DeployPhase {
        *self.phase.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn set_phase(&self, phase: DeployPhase) {
        *self
            .phase
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = phase;
    }

    /// Runs one deployment attempt to a terminal outcome.
    ///
    /// A second call issued while an attempt is in flight fails immediately
    /// with `AlreadyInFlight` and does not start a second chain of calls.
    pub async fn deploy(&self, params: &DeployParams) -> DeploymentOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                token_symbol = %params.token_symbol,
                "Rejecting submission: a deployment is already in flight"
            );
            return DeploymentOutcome::Failure(DeployError::AlreadyInFlight);
        }

        info!(
            token_symbol = %params.token_symbol,
            total_shares = %params.total_shares,
            "Starting token deployment"
        );

        let result = self.run(params).await;

        let outcome = match result {
            Ok(deployed) => {
                self.set_phase(DeployPhase::Confirmed);
                info!(
                    contract_address = %deployed.contract_address,
                    tx_hash = %deployed.tx_hash,
                    "Token deployment confirmed"
                );
                DeploymentOutcome::Success(deployed)
            }
            Err(error) => {
                self.set_phase(DeployPhase::Failed);
                warn!(error = %error, "Token deployment failed");
                DeploymentOutcome::Failure(error)
            }
        };

        // Busy is released only at a terminal state.
        self.busy.store(false, Ordering::Release);

        outcome
    }

    async fn run(
        &self,
        params: &DeployParams,
    ) -> Result<Deployed, DeployError> {
        self.check_wallet()?;
        let signer = self.acquire_signer().await?;
        let factory = self.build_factory(signer.as_ref())?;
        let pending = self.submit(factory.as_ref(), params).await?;
        self.await_confirmation(factory.as_ref(), pending).await
    }

    /// `Idle -> WalletCheck`. Absence of a wallet fails the attempt before
    /// any further step is taken.
    fn check_wallet(&self) -> Result<(), DeployError> {
        self.set_phase(DeployPhase::WalletCheck);

        if self.wallet.is_available() {
            Ok(())
        } else {
            Err(DeployError::WalletUnavailable)
        }
    }

    /// `WalletCheck -> SignerAcquired`. May suspend awaiting user approval
    /// in the wallet's own UI.
    async fn acquire_signer(
        &self,
    ) -> Result<Arc<dyn DeploySigner>, DeployError> {
        let signer = self.wallet.get_signer().await?;
        self.set_phase(DeployPhase::SignerAcquired);
        Ok(signer)
    }

    /// `SignerAcquired -> FactoryBuilt`. Pure construction; failures are
    /// attributed to a malformed artifact.
    fn build_factory(
        &self,
        signer: &dyn DeploySigner,
    ) -> Result<Arc<dyn TokenFactory>, DeployError> {
        let factory = signer.token_factory(&self.artifact)?;
        self.set_phase(DeployPhase::FactoryBuilt);
        Ok(factory)
    }

    /// `FactoryBuilt -> Submitted`. Suspends until the transaction is
    /// accepted into the network's pending state.
    async fn submit(
        &self,
        factory: &dyn TokenFactory,
        params: &DeployParams,
    ) -> Result<PendingDeployment, DeployError> {
        let pending = factory.submit(params).await?;
        self.set_phase(DeployPhase::Submitted);
        info!(tx_hash = %pending.tx_hash, "Deployment transaction pending");
        Ok(pending)
    }

    /// `Submitted -> Confirmed`. Suspends until the deployment transaction
    /// is finalized on the ledger.
    async fn await_confirmation(
        &self,
        factory: &dyn TokenFactory,
        pending: PendingDeployment,
    ) -> Result<Deployed, DeployError> {
        let deployed = factory.confirm(pending).await?;
        Ok(deployed)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{U256, uint};
    use std::sync::Arc;
    use tracing_test::traced_test;

    use super::{DeployPhase, DeploymentOrchestrator};
    use crate::artifact::DeploymentArtifact;
    use crate::catalog::{Currency, RightKind};
    use crate::deploy::{DeployError, DeployParams, DeploymentOutcome, RightsVector};
    use crate::wallet::mock::{
        MOCK_CONTRACT_ADDRESS, MOCK_TX_HASH, MockWalletProvider,
    };

    fn test_artifact() -> DeploymentArtifact {
        DeploymentArtifact::from_json(
            r#"{"abi": [{"type": "constructor"}], "bytecode": "0x60806040"}"#,
        )
        .unwrap()
    }

    fn test_params() -> DeployParams {
        DeployParams {
            token_name: "Amazon Rainforest Conservation".to_string(),
            token_symbol: "ARC".to_string(),
            total_shares: U256::from(1000),
            isin: "US1234567890".to_string(),
            nominal_value: uint!(1_000000000000000000_U256),
            currency: Currency::Usd,
            rights: RightsVector::from_chosen(&[RightKind::Voting]),
        }
    }

    fn orchestrator_with(
        wallet: &Arc<MockWalletProvider>,
    ) -> DeploymentOrchestrator {
        let wallet: Arc<dyn crate::wallet::WalletProvider> =
            Arc::clone(wallet);
        DeploymentOrchestrator::new(wallet, test_artifact())
    }

    #[tokio::test]
    async fn test_successful_deployment_reaches_confirmed() {
        let wallet = Arc::new(MockWalletProvider::new_success());
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;

        let DeploymentOutcome::Success(deployed) = outcome else {
            panic!("Expected success, got: {outcome:?}");
        };
        assert_eq!(deployed.contract_address, MOCK_CONTRACT_ADDRESS);
        assert_eq!(deployed.tx_hash, MOCK_TX_HASH);
        assert_eq!(orchestrator.phase(), DeployPhase::Confirmed);
        assert!(!orchestrator.is_busy());

        assert_eq!(wallet.get_signer_call_count(), 1);
        assert_eq!(wallet.factory_call_count(), 1);
        assert_eq!(wallet.submit_call_count(), 1);
        assert_eq!(wallet.confirm_call_count(), 1);

        let submitted = wallet.last_submitted_params().unwrap();
        assert_eq!(submitted, test_params());
    }

    #[tokio::test]
    async fn test_absent_wallet_fails_without_touching_collaborators() {
        let wallet = Arc::new(MockWalletProvider::new_unavailable());
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;

        assert!(matches!(
            outcome,
            DeploymentOutcome::Failure(DeployError::WalletUnavailable)
        ));
        assert_eq!(orchestrator.phase(), DeployPhase::Failed);
        assert!(!orchestrator.is_busy());

        assert_eq!(wallet.get_signer_call_count(), 0);
        assert_eq!(wallet.factory_call_count(), 0);
        assert_eq!(wallet.submit_call_count(), 0);
        assert_eq!(wallet.confirm_call_count(), 0);
    }

    #[tokio::test]
    async fn test_signer_refusal_fails_before_factory_construction() {
        let wallet = Arc::new(MockWalletProvider::new_signer_refused(
            "user denied account access",
        ));
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;

        let DeploymentOutcome::Failure(error) = outcome else {
            panic!("Expected failure, got: {outcome:?}");
        };
        assert!(error.to_string().contains("user denied account access"));
        assert_eq!(wallet.factory_call_count(), 0);
        assert_eq!(wallet.submit_call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_artifact_is_a_configuration_failure() {
        let wallet = Arc::new(MockWalletProvider::new_factory_misconfigured());
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;

        assert!(matches!(
            outcome,
            DeploymentOutcome::Failure(DeployError::Configuration(_))
        ));
        assert_eq!(wallet.submit_call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_reason_is_preserved_verbatim() {
        let wallet = Arc::new(MockWalletProvider::new_submit_rejected(
            "insufficient funds for gas * price + value",
        ));
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;

        let DeploymentOutcome::Failure(DeployError::SubmissionRejected {
            reason,
        }) = outcome
        else {
            panic!("Expected submission rejection, got: {outcome:?}");
        };
        assert!(
            reason.contains("insufficient funds for gas * price + value")
        );
        assert_eq!(wallet.confirm_call_count(), 0);
    }

    #[tokio::test]
    async fn test_confirmation_failure_is_terminal() {
        let wallet = Arc::new(MockWalletProvider::new_confirm_failed(
            "connection reset",
        ));
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;

        assert!(matches!(outcome, DeploymentOutcome::Failure(_)));
        assert_eq!(orchestrator.phase(), DeployPhase::Failed);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_reentrant_submission_is_rejected_without_second_chain() {
        let wallet = Arc::new(
            MockWalletProvider::new_success().with_submit_delay(100),
        );
        let orchestrator = Arc::new(orchestrator_with(&wallet));

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(
                async move { orchestrator.deploy(&test_params()).await },
            )
        };

        // Let the first attempt reach its in-flight suspension.
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        assert!(orchestrator.is_busy());

        let second = orchestrator.deploy(&test_params()).await;
        assert!(matches!(
            second,
            DeploymentOutcome::Failure(DeployError::AlreadyInFlight)
        ));

        let first = first.await.unwrap();
        assert!(first.is_success());

        // The rejected attempt never started a second chain of calls.
        assert_eq!(wallet.get_signer_call_count(), 1);
        assert_eq!(wallet.submit_call_count(), 1);
        assert_eq!(wallet.confirm_call_count(), 1);
    }

    #[tokio::test]
    async fn test_busy_flag_released_after_failure_allows_retry() {
        let wallet = Arc::new(MockWalletProvider::new_submit_rejected(
            "nonce too low",
        ));
        let orchestrator = orchestrator_with(&wallet);

        let first = orchestrator.deploy(&test_params()).await;
        assert!(matches!(first, DeploymentOutcome::Failure(_)));
        assert!(!orchestrator.is_busy());

        let second = orchestrator.deploy(&test_params()).await;
        assert!(matches!(second, DeploymentOutcome::Failure(_)));
        assert_eq!(wallet.submit_call_count(), 2);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_phase_transitions_are_logged() {
        let wallet = Arc::new(MockWalletProvider::new_success());
        let orchestrator = orchestrator_with(&wallet);

        let outcome = orchestrator.deploy(&test_params()).await;
        assert!(outcome.is_success());

        assert!(logs_contain("Starting token deployment"));
        assert!(logs_contain("Deployment transaction pending"));
        assert!(logs_contain("Token deployment confirmed"));
    }
}
