use alloy::primitives::U256;
use rust_decimal::Decimal;
use tracing::debug;

use super::{DeployParams, MappingError, NominalValue, RightsVector};
use crate::request::IssuanceRequest;

impl DeployParams {
    /// Maps a request that has passed validation into the ordered argument
    /// list for the deployment call.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when a numeric field does not parse or the
    /// nominal value cannot be represented at the 18-decimal scale, rather
    /// than silently coercing to zero.
    pub fn from_request(
        request: &IssuanceRequest,
    ) -> Result<Self, MappingError> {
        let total_shares = request
            .number_of_shares()
            .parse::<U256>()
            .map_err(|_| MappingError::InvalidShareCount {
                value: request.number_of_shares().to_string(),
            })?;

        let nominal = request
            .nominal_value()
            .parse::<Decimal>()
            .map_err(|_| MappingError::InvalidNominalValue {
                value: request.nominal_value().to_string(),
            })?;
        let nominal_value =
            NominalValue::new(nominal).to_u256_with_18_decimals()?;

        let rights = RightsVector::from_chosen(request.chosen_rights());

        debug!(
            token_symbol = %request.token_symbol(),
            total_shares = %total_shares,
            nominal_value = %nominal_value,
            "Mapped issuance request to deployment parameters"
        );

        Ok(Self {
            token_name: request.token_name().to_string(),
            token_symbol: request.token_symbol().to_string(),
            total_shares,
            isin: request.isin().to_string(),
            nominal_value,
            currency: request.currency(),
            rights,
        })
    }
}
