use super::{Field, IssuanceRequest, ValidationErrors};

/// Checks every required field of the request and returns the full error
/// map for this submission attempt.
///
/// Pure and idempotent: no side effects, and two calls on the same request
/// yield identical maps. Fields with defaults (token decimals, currency) are
/// never flagged. Submission proceeds only when the returned map is empty.
#[must_use]
pub fn validate(request: &IssuanceRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if request.token_name.is_empty() {
        errors.insert(Field::TokenName, "Token name is required");
    }
    if request.token_symbol.is_empty() {
        errors.insert(Field::TokenSymbol, "Token symbol is required");
    }
    if request.isin.is_empty() {
        errors.insert(Field::Isin, "ISIN is required");
    }
    if request.nominal_value.is_empty() {
        errors.insert(Field::NominalValue, "Nominal value is required");
    }
    if request.number_of_shares.is_empty() {
        errors.insert(Field::NumberOfShares, "Number of shares is required");
    }
    if request.total_value.is_empty() {
        errors.insert(Field::TotalValue, "Total value is required");
    }
    if request.chosen_rights.is_empty() {
        errors.insert(
            Field::ChosenRights,
            "At least one right must be selected",
        );
    }
    if request.dividend_type.is_none() {
        errors.insert(Field::DividendType, "Dividend type is required");
    }
    if request.regulation_type.is_none() {
        errors.insert(Field::RegulationType, "Regulation type is required");
    }
    if request.regulation_sub_type.is_none() {
        errors.insert(
            Field::RegulationSubType,
            "Regulation sub-type is required",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::catalog::{
        DividendType, RegulationSubType, RegulationType, RightKind,
    };
    use crate::request::{Field, IssuanceRequest};

    fn complete_request() -> IssuanceRequest {
        let mut request = IssuanceRequest::new();
        request.set_token_name("Amazon Rainforest Conservation");
        request.set_token_symbol("arc");
        request.set_isin("us1234567890");
        request.set_nominal_value("1.00");
        request.set_number_of_shares("1000");
        request.set_total_value("1000");
        request.toggle_right(RightKind::Voting, true);
        request.set_dividend_type(DividendType::Fixed);
        request.set_regulation_type(RegulationType::RegulationD);
        request.set_regulation_sub_type(RegulationSubType::Rule506B);
        request
    }

    #[test]
    fn test_complete_request_passes() {
        let errors = validate(&complete_request());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_empty_request_flags_exactly_the_required_fields() {
        let errors = validate(&IssuanceRequest::new());

        let flagged: Vec<Field> =
            errors.iter().map(|(field, _)| field).collect();
        let mut expected = vec![
            Field::TokenName,
            Field::TokenSymbol,
            Field::Isin,
            Field::NominalValue,
            Field::NumberOfShares,
            Field::TotalValue,
            Field::ChosenRights,
            Field::DividendType,
            Field::RegulationType,
            Field::RegulationSubType,
        ];
        expected.sort();
        assert_eq!(flagged, expected);
    }

    #[test]
    fn test_defaulted_fields_are_never_flagged() {
        let errors = validate(&IssuanceRequest::new());
        assert!(!errors.contains(Field::TokenDecimals));
        assert!(!errors.contains(Field::Currency));
        assert!(!errors.contains(Field::BlockedCountries));
    }

    #[test]
    fn test_missing_single_field_flags_only_that_field() {
        let mut request = complete_request();
        request.set_isin("");

        let errors = validate(&request);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Isin), Some("ISIN is required"));
    }

    #[test]
    fn test_empty_rights_flagged_even_when_everything_else_is_valid() {
        let mut request = complete_request();
        request.toggle_right(RightKind::Voting, false);

        let errors = validate(&request);
        assert_eq!(
            errors.get(Field::ChosenRights),
            Some("At least one right must be selected")
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut request = complete_request();
        request.set_token_name("");
        request.set_nominal_value("");

        let first = validate(&request);
        let second = validate(&request);
        assert_eq!(first, second);
    }
}
