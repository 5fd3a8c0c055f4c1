use rust_decimal::Decimal;
use tracing::debug;

use super::IssuanceRequest;

/// Fills in `total_value` as `number_of_shares * nominal_value` when the
/// user left it empty and both inputs parse as decimal numbers.
///
/// A display/default convenience, not the authoritative on-chain value. On a
/// parse failure or overflow the field is left empty so validation flags it
/// as missing. Runs at most once per submission attempt and touches only
/// `total_value`.
pub(crate) fn fill_total_value(request: &mut IssuanceRequest) {
    if !request.total_value.is_empty() {
        return;
    }
    if request.number_of_shares.is_empty() || request.nominal_value.is_empty()
    {
        return;
    }

    let Ok(shares) = request.number_of_shares.parse::<Decimal>() else {
        return;
    };
    let Ok(nominal) = request.nominal_value.parse::<Decimal>() else {
        return;
    };
    let Some(total) = shares.checked_mul(nominal) else {
        return;
    };

    let derived = total.normalize().to_string();
    debug!(total_value = %derived, "Derived total value from shares and nominal");
    request.total_value = derived;
}
