//! Deployment parameter encoding and the deployment protocol types.

mod orchestrator;
mod params;

use alloy::primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

pub use orchestrator::{DeployPhase, DeploymentOrchestrator};

use crate::artifact::ArtifactError;
use crate::catalog::{Currency, RightKind};
use crate::wallet::WalletError;

/// Fixed-order boolean encoding of which legal rights attach to the
/// instrument, in the canonical slot order the deployment call expects:
/// Voting, Information, Liquidation, Subscription, Conversion, Redemption,
/// Put, Dividend.
///
/// Subscription, Redemption and Dividend are not offered as selectable
/// options, so those slots are always `false`. The slot order is a wire
/// contract and must not change.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct RightsVector([bool; 8]);

impl RightsVector {
    pub const SLOTS: usize = 8;

    /// Builds the vector from the user's chosen rights.
    #[must_use]
    pub fn from_chosen(rights: &[RightKind]) -> Self {
        let mut slots = [false; Self::SLOTS];
        for right in rights {
            slots[Self::slot(*right)] = true;
        }
        Self(slots)
    }

    /// Canonical slot index of a selectable right.
    const fn slot(right: RightKind) -> usize {
        match right {
            RightKind::Voting => 0,
            RightKind::Information => 1,
            RightKind::Liquidation => 2,
            RightKind::Conversion => 4,
            RightKind::Put => 6,
        }
    }

    #[must_use]
    pub const fn to_array(self) -> [bool; Self::SLOTS] {
        self.0
    }
}

/// Per-unit nominal value as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominalValue(pub(crate) Decimal);

impl std::fmt::Display for NominalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NominalValue {
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Converts to the smallest-unit integer representation at an 18-decimal
    /// fixed-point scale.
    ///
    /// This scale is a fixed encoding contract with the deployment target; it
    /// is independent of the user-chosen display decimals.
    ///
    /// # Errors
    ///
    /// Returns [`NominalConversionError`] for negative values, values with a
    /// fractional part finer than 18 decimals, and values out of `u128`
    /// range after scaling.
    pub fn to_u256_with_18_decimals(
        &self,
    ) -> Result<U256, NominalConversionError> {
        let Self(value) = self;

        if value.is_sign_negative() {
            return Err(NominalConversionError::NegativeValue {
                value: *value,
            });
        }

        let multiplier = 10_u128.pow(18);
        let scaled = value
            .checked_mul(Decimal::from(multiplier))
            .ok_or(NominalConversionError::Overflow)?;

        if scaled.fract() != Decimal::ZERO {
            return Err(NominalConversionError::FractionalValue {
                value: scaled,
            });
        }

        let integer_part = scaled.to_u128().ok_or(
            NominalConversionError::U128OutOfRange { value: scaled },
        )?;

        Ok(U256::from(integer_part))
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NominalConversionError {
    #[error("Nominal value cannot be negative: {value}")]
    NegativeValue { value: Decimal },

    #[error("Nominal value overflow during scaling")]
    Overflow,

    #[error("Nominal value has fractional part finer than 18 decimals: {value}")]
    FractionalValue { value: Decimal },

    #[error("Scaled nominal value out of u128 range: {value}")]
    U128OutOfRange { value: Decimal },
}

/// The ordered, typed argument list for the deployment call.
///
/// Field order mirrors the constructor argument order exactly:
/// `(name, symbol, totalShares, isin, nominalValue, currency, rights)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployParams {
    pub token_name: String,
    pub token_symbol: String,
    pub total_shares: U256,
    pub isin: String,
    pub nominal_value: U256,
    pub currency: Currency,
    pub rights: RightsVector,
}

/// Data-shape inconsistency between a validated request and the encoder.
///
/// Should not occur when validator and mapper agree on required fields; when
/// it does it indicates a contract mismatch between the two and is surfaced
/// as a generic failure rather than a crash or a silent zero.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Number of shares is not a whole number: {value}")]
    InvalidShareCount { value: String },

    #[error("Nominal value is not a number: {value}")]
    InvalidNominalValue { value: String },

    #[error("Nominal value conversion failed: {0}")]
    NominalConversion(#[from] NominalConversionError),
}

/// Transaction accepted into the network's pending state, not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeployment {
    pub tx_hash: B256,
}

/// Confirmed deployment: the contract is live at `contract_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployed {
    pub contract_address: Address,
    pub tx_hash: B256,
    pub confirmed_at: DateTime<Utc>,
}

/// Terminal result of one deployment attempt, never partially populated.
#[derive(Debug)]
pub enum DeploymentOutcome {
    Success(Deployed),
    Failure(DeployError),
}

impl DeploymentOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Terminal failure of a deployment attempt.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(
        "No wallet provider is available. Install or enable a wallet to create equity tokens"
    )]
    WalletUnavailable,

    #[error("A deployment is already in flight for this session")]
    AlreadyInFlight,

    #[error("Parameter mapping failed: {0}")]
    Mapping(#[from] MappingError),

    #[error("Deployment artifact is misconfigured: {0}")]
    Configuration(#[from] ArtifactError),

    #[error("{reason}")]
    SubmissionRejected { reason: String },
}

impl From<WalletError> for DeployError {
    fn from(error: WalletError) -> Self {
        match error {
            WalletError::Artifact(e) => Self::Configuration(e),
            WalletError::SignerRejected { .. }
            | WalletError::TransactionRejected { .. }
            | WalletError::RpcError { .. } => {
                // Reason text passed through verbatim for display.
                Self::SubmissionRejected { reason: error.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{U256, uint};
    use rust_decimal::Decimal;

    use super::{NominalConversionError, NominalValue, RightsVector};
    use crate::catalog::RightKind;

    #[test]
    fn test_rights_vector_voting_and_put() {
        let vector =
            RightsVector::from_chosen(&[RightKind::Voting, RightKind::Put]);
        assert_eq!(
            vector.to_array(),
            [true, false, false, false, false, false, true, false]
        );
    }

    #[test]
    fn test_rights_vector_all_selectable_leaves_reserved_slots_false() {
        let vector = RightsVector::from_chosen(&RightKind::ALL);
        // Subscription (3), Redemption (5) and Dividend (7) are never
        // reachable from the selectable options.
        assert_eq!(
            vector.to_array(),
            [true, true, true, false, true, false, true, false]
        );
    }

    #[test]
    fn test_rights_vector_empty() {
        let vector = RightsVector::from_chosen(&[]);
        assert_eq!(vector.to_array(), [false; 8]);
    }

    #[test]
    fn test_nominal_one_scales_to_1e18() {
        let nominal = NominalValue::new(Decimal::new(100, 2));
        let result = nominal.to_u256_with_18_decimals().unwrap();
        assert_eq!(result, uint!(1_000000000000000000_U256));
    }

    #[test]
    fn test_nominal_fractional_scales() {
        let nominal = NominalValue::new(Decimal::new(125, 2));
        let result = nominal.to_u256_with_18_decimals().unwrap();
        assert_eq!(result, uint!(1_250000000000000000_U256));
    }

    #[test]
    fn test_nominal_zero() {
        let nominal = NominalValue::new(Decimal::ZERO);
        assert_eq!(nominal.to_u256_with_18_decimals().unwrap(), U256::ZERO);
    }

    #[test]
    fn test_negative_nominal_fails() {
        let nominal = NominalValue::new(Decimal::from(-1));
        assert!(matches!(
            nominal.to_u256_with_18_decimals(),
            Err(NominalConversionError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_too_fine_fraction_fails() {
        // 19 decimal places cannot be represented at the 18-decimal scale.
        let nominal = NominalValue::new(Decimal::new(1, 19));
        assert!(matches!(
            nominal.to_u256_with_18_decimals(),
            Err(NominalConversionError::FractionalValue { .. })
        ));
    }
}
