//! The editing session: owns the request record and its error map, and runs
//! the submission pipeline.

use tracing::{debug, info};

use crate::catalog::{
    Country, Currency, DividendType, RegulationSubType, RegulationType,
    RightKind, TokenDecimals,
};
use crate::deploy::{
    DeployParams, DeploymentOrchestrator, DeploymentOutcome,
};
use crate::request::{
    Field, IssuanceRequest, ValidationErrors, fill_total_value, validate,
};

/// Result of one submission attempt.
#[derive(Debug)]
pub enum SubmitResult {
    /// Validation failed; field-level messages are surfaced and the
    /// orchestrator was never reached.
    Invalid(ValidationErrors),
    /// The deployment protocol ran to a terminal outcome.
    Completed(DeploymentOutcome),
}

/// A single user's editing session.
///
/// Holds the only mutable state of the flow: the request record and the
/// per-field error map. Edits clear the edited field's error; submission
/// recomputes the map wholesale. The record is reset to defaults only after
/// a successful issuance, so a failed attempt can be corrected and
/// resubmitted.
#[derive(Debug, Default)]
pub struct IssuanceSession {
    request: IssuanceRequest,
    errors: ValidationErrors,
}

impl IssuanceSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a persisted request snapshot.
    #[must_use]
    pub fn from_request(request: IssuanceRequest) -> Self {
        Self { request, errors: ValidationErrors::new() }
    }

    #[must_use]
    pub const fn request(&self) -> &IssuanceRequest {
        &self.request
    }

    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn edit_token_name(&mut self, value: impl Into<String>) {
        self.request.set_token_name(value);
        self.errors.clear(Field::TokenName);
    }

    pub fn edit_token_symbol(&mut self, value: &str) {
        self.request.set_token_symbol(value);
        self.errors.clear(Field::TokenSymbol);
    }

    pub fn edit_token_decimals(&mut self, value: TokenDecimals) {
        self.request.set_token_decimals(value);
        self.errors.clear(Field::TokenDecimals);
    }

    pub fn edit_isin(&mut self, value: &str) {
        self.request.set_isin(value);
        self.errors.clear(Field::Isin);
    }

    pub fn edit_nominal_value(&mut self, value: impl Into<String>) {
        self.request.set_nominal_value(value);
        self.errors.clear(Field::NominalValue);
    }

    pub fn edit_currency(&mut self, value: Currency) {
        self.request.set_currency(value);
        self.errors.clear(Field::Currency);
    }

    pub fn edit_number_of_shares(&mut self, value: impl Into<String>) {
        self.request.set_number_of_shares(value);
        self.errors.clear(Field::NumberOfShares);
    }

    pub fn edit_total_value(&mut self, value: impl Into<String>) {
        self.request.set_total_value(value);
        self.errors.clear(Field::TotalValue);
    }

    pub fn edit_right(&mut self, right: RightKind, selected: bool) {
        self.request.toggle_right(right, selected);
        self.errors.clear(Field::ChosenRights);
    }

    pub fn edit_dividend_type(&mut self, value: DividendType) {
        self.request.set_dividend_type(value);
        self.errors.clear(Field::DividendType);
    }

    pub fn edit_regulation_type(&mut self, value: RegulationType) {
        self.request.set_regulation_type(value);
        self.errors.clear(Field::RegulationType);
    }

    pub fn edit_regulation_sub_type(&mut self, value: RegulationSubType) {
        self.request.set_regulation_sub_type(value);
        self.errors.clear(Field::RegulationSubType);
    }

    pub fn edit_blocked_country(&mut self, country: Country, blocked: bool) {
        self.request.toggle_blocked_country(country, blocked);
        self.errors.clear(Field::BlockedCountries);
    }

    /// Runs one submission attempt: derivation, validation, parameter
    /// mapping, then the deployment protocol.
    ///
    /// Validation errors halt the flow before the orchestrator is reached.
    /// On a successful issuance the record is reset to its defaults; on any
    /// failure it is left untouched for correction and resubmission.
    pub async fn submit(
        &mut self,
        orchestrator: &DeploymentOrchestrator,
    ) -> SubmitResult {
        fill_total_value(&mut self.request);

        self.errors = validate(&self.request);
        if !self.errors.is_empty() {
            debug!(
                error_count = self.errors.len(),
                "Submission blocked by validation"
            );
            return SubmitResult::Invalid(self.errors.clone());
        }

        let params = match DeployParams::from_request(&self.request) {
            Ok(params) => params,
            Err(error) => {
                // Validator and mapper disagree on what a valid request is.
                // Surfaced as a generic failure, never a crash.
                return SubmitResult::Completed(DeploymentOutcome::Failure(
                    error.into(),
                ));
            }
        };

        let outcome = orchestrator.deploy(&params).await;

        if outcome.is_success() {
            info!("Issuance succeeded, resetting request to defaults");
            self.request.reset();
        }

        SubmitResult::Completed(outcome)
    }
}
