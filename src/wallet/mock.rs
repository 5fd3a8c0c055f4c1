//! Mock wallet provider for unit and integration tests.
//!
//! Not behind `#[cfg(test)]`: the end-to-end tests in `tests/` drive the
//! public API against this mock, and those compile the library without the
//! `test` cfg enabled.

use alloy::primitives::{Address, B256, address, fixed_bytes};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{DeploySigner, TokenFactory, WalletError, WalletProvider};
use crate::artifact::{ArtifactError, DeploymentArtifact};
use crate::deploy::{DeployParams, Deployed, PendingDeployment};

/// Transaction hash reported by a successful mock deployment.
pub const MOCK_TX_HASH: B256 = fixed_bytes!(
    "0x1234567890123456789012345678901234567890123456789012345678901234"
);

/// Address reported by a successful mock deployment.
pub const MOCK_CONTRACT_ADDRESS: Address =
    address!("0x00000000000000000000000000000000000000ec");

#[derive(Debug, Clone)]
enum MockBehavior {
    Success,
    SignerRefused { reason: String },
    FactoryMisconfigured,
    SubmitRejected { reason: String },
    ConfirmFailed { reason: String },
}

#[derive(Default)]
struct MockCounters {
    get_signer_calls: AtomicUsize,
    factory_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    confirm_calls: AtomicUsize,
}

struct MockState {
    behavior: MockBehavior,
    submit_delay_ms: u64,
    counters: MockCounters,
    last_submit: Mutex<Option<DeployParams>>,
}

/// Mock wallet with scriptable behavior and call counters.
///
/// `available` controls the environment precondition: an unavailable mock
/// models a session with no wallet extension installed.
pub struct MockWalletProvider {
    available: bool,
    state: Arc<MockState>,
}

impl MockWalletProvider {
    #[must_use]
    pub fn new_success() -> Self {
        Self::with_behavior(MockBehavior::Success)
    }

    /// A provider that reports no wallet in the environment.
    #[must_use]
    pub fn new_unavailable() -> Self {
        let mut provider = Self::with_behavior(MockBehavior::Success);
        provider.available = false;
        provider
    }

    #[must_use]
    pub fn new_signer_refused(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::SignerRefused {
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn new_factory_misconfigured() -> Self {
        Self::with_behavior(MockBehavior::FactoryMisconfigured)
    }

    #[must_use]
    pub fn new_submit_rejected(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::SubmitRejected {
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn new_confirm_failed(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::ConfirmFailed {
            reason: reason.into(),
        })
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            available: true,
            state: Arc::new(MockState {
                behavior,
                submit_delay_ms: 0,
                counters: MockCounters::default(),
                last_submit: Mutex::new(None),
            }),
        }
    }

    /// Adds latency to the submit step, for exercising in-flight rejection.
    #[must_use]
    pub fn with_submit_delay(self, delay_ms: u64) -> Self {
        let state = MockState {
            behavior: self.state.behavior.clone(),
            submit_delay_ms: delay_ms,
            counters: MockCounters::default(),
            last_submit: Mutex::new(None),
        };
        Self { available: self.available, state: Arc::new(state) }
    }

    #[must_use]
    pub fn get_signer_call_count(&self) -> usize {
        self.state.counters.get_signer_calls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn factory_call_count(&self) -> usize {
        self.state.counters.factory_calls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn submit_call_count(&self) -> usize {
        self.state.counters.submit_calls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn confirm_call_count(&self) -> usize {
        self.state.counters.confirm_calls.load(Ordering::Relaxed)
    }

    /// Parameters of the most recent submit, if any.
    #[must_use]
    pub fn last_submitted_params(&self) -> Option<DeployParams> {
        self.state
            .last_submit
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn get_signer(&self) -> Result<Arc<dyn DeploySigner>, WalletError> {
        self.state.counters.get_signer_calls.fetch_add(1, Ordering::Relaxed);

        if let MockBehavior::SignerRefused { reason } = &self.state.behavior {
            return Err(WalletError::SignerRejected {
                reason: reason.clone(),
            });
        }

        Ok(Arc::new(MockSigner { state: Arc::clone(&self.state) }))
    }
}

struct MockSigner {
    state: Arc<MockState>,
}

impl DeploySigner for MockSigner {
    fn token_factory(
        &self,
        _artifact: &DeploymentArtifact,
    ) -> Result<Arc<dyn TokenFactory>, WalletError> {
        self.state.counters.factory_calls.fetch_add(1, Ordering::Relaxed);

        if matches!(self.state.behavior, MockBehavior::FactoryMisconfigured) {
            return Err(WalletError::Artifact(ArtifactError::EmptyBytecode));
        }

        Ok(Arc::new(MockFactory { state: Arc::clone(&self.state) }))
    }
}

struct MockFactory {
    state: Arc<MockState>,
}

#[async_trait]
impl TokenFactory for MockFactory {
    async fn submit(
        &self,
        params: &DeployParams,
    ) -> Result<PendingDeployment, WalletError> {
        self.state.counters.submit_calls.fetch_add(1, Ordering::Relaxed);
        *self
            .state
            .last_submit
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some(params.clone());

        if self.state.submit_delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(
                self.state.submit_delay_ms,
            ))
            .await;
        }

        if let MockBehavior::SubmitRejected { reason } = &self.state.behavior
        {
            return Err(WalletError::TransactionRejected {
                reason: reason.clone(),
            });
        }

        Ok(PendingDeployment { tx_hash: MOCK_TX_HASH })
    }

    async fn confirm(
        &self,
        pending: PendingDeployment,
    ) -> Result<Deployed, WalletError> {
        self.state.counters.confirm_calls.fetch_add(1, Ordering::Relaxed);

        if let MockBehavior::ConfirmFailed { reason } = &self.state.behavior {
            return Err(WalletError::RpcError { message: reason.clone() });
        }

        Ok(Deployed {
            contract_address: MOCK_CONTRACT_ADDRESS,
            tx_hash: pending.tx_hash,
            confirmed_at: Utc::now(),
        })
    }
}
