//! The mutable issuance request record and its per-field error map.
//!
//! The record has no identity beyond the editing session that owns it. It is
//! reset to defaults after a successful issuance and otherwise persists
//! across failed attempts so the user can correct and resubmit.

mod derive;
mod validate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) use derive::fill_total_value;
pub use validate::validate;

use crate::catalog::{
    Country, Currency, DividendType, RegulationSubType, RegulationType,
    RightKind, TokenDecimals,
};

/// Maximum length of the token symbol, enforced on edit.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Maximum length of the ISIN, enforced on edit.
pub const MAX_ISIN_LEN: usize = 12;

/// Identifies a single editable field of the request.
///
/// Used as the key of [`ValidationErrors`] and for clearing a field's error
/// when that field is edited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Field {
    TokenName,
    TokenSymbol,
    TokenDecimals,
    Isin,
    NominalValue,
    Currency,
    NumberOfShares,
    TotalValue,
    ChosenRights,
    DividendType,
    RegulationType,
    RegulationSubType,
    BlockedCountries,
}

impl Field {
    /// Field key as the form layer knows it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TokenName => "tokenName",
            Self::TokenSymbol => "tokenSymbol",
            Self::TokenDecimals => "tokenDecimals",
            Self::Isin => "isin",
            Self::NominalValue => "nominalValue",
            Self::Currency => "currency",
            Self::NumberOfShares => "numberOfShares",
            Self::TotalValue => "totalValue",
            Self::ChosenRights => "chosenRights",
            Self::DividendType => "dividendType",
            Self::RegulationType => "regulationType",
            Self::RegulationSubType => "regulationSubType",
            Self::BlockedCountries => "blockedCountries",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field-keyed human-readable validation messages.
///
/// Recomputed wholesale by [`validate`] on every submission attempt; the
/// owning session clears individual entries as fields are edited.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// The structured, user-edited description of the instrument to be created.
///
/// String-typed numeric fields hold the user's raw input; parsing happens in
/// the derivation step and the parameter mapper, never here. Enumerated
/// fields only ever hold catalog values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceRequest {
    pub(crate) token_name: String,
    pub(crate) token_symbol: String,
    pub(crate) token_decimals: TokenDecimals,
    pub(crate) isin: String,
    pub(crate) nominal_value: String,
    pub(crate) currency: Currency,
    pub(crate) number_of_shares: String,
    pub(crate) total_value: String,
    pub(crate) chosen_rights: Vec<RightKind>,
    pub(crate) dividend_type: Option<DividendType>,
    pub(crate) regulation_type: Option<RegulationType>,
    pub(crate) regulation_sub_type: Option<RegulationSubType>,
    pub(crate) blocked_countries: Vec<Country>,
}

impl Default for IssuanceRequest {
    fn default() -> Self {
        Self {
            token_name: String::new(),
            token_symbol: String::new(),
            token_decimals: TokenDecimals::default(),
            isin: String::new(),
            nominal_value: String::new(),
            currency: Currency::default(),
            number_of_shares: String::new(),
            total_value: String::new(),
            chosen_rights: Vec::new(),
            dividend_type: None,
            regulation_type: None,
            regulation_sub_type: None,
            blocked_countries: Vec::new(),
        }
    }
}

/// Snapshots are normalized on the way in: symbol and ISIN pass through the
/// same uppercasing and length caps the setters enforce, so a restored
/// record holds only values an interactive edit could have produced.
impl<'de> Deserialize<'de> for IssuanceRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Default, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        struct Snapshot {
            token_name: String,
            token_symbol: String,
            token_decimals: TokenDecimals,
            isin: String,
            nominal_value: String,
            currency: Currency,
            number_of_shares: String,
            total_value: String,
            chosen_rights: Vec<RightKind>,
            dividend_type: Option<DividendType>,
            regulation_type: Option<RegulationType>,
            regulation_sub_type: Option<RegulationSubType>,
            blocked_countries: Vec<Country>,
        }

        let Snapshot {
            token_name,
            token_symbol,
            token_decimals,
            isin,
            nominal_value,
            currency,
            number_of_shares,
            total_value,
            chosen_rights,
            dividend_type,
            regulation_type,
            regulation_sub_type,
            blocked_countries,
        } = Snapshot::deserialize(deserializer)?;

        let mut request = Self {
            token_name,
            token_symbol: String::new(),
            token_decimals,
            isin: String::new(),
            nominal_value,
            currency,
            number_of_shares,
            total_value,
            chosen_rights,
            dividend_type,
            regulation_type,
            regulation_sub_type,
            blocked_countries,
        };
        request.set_token_symbol(&token_symbol);
        request.set_isin(&isin);
        Ok(request)
    }
}

impl IssuanceRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token_name(&mut self, value: impl Into<String>) {
        self.token_name = value.into();
    }

    /// Stores the symbol uppercase-normalized and truncated to
    /// [`MAX_SYMBOL_LEN`] characters.
    pub fn set_token_symbol(&mut self, value: &str) {
        self.token_symbol =
            value.to_uppercase().chars().take(MAX_SYMBOL_LEN).collect();
    }

    pub fn set_token_decimals(&mut self, value: TokenDecimals) {
        self.token_decimals = value;
    }

    /// Stores the ISIN uppercase-normalized and truncated to
    /// [`MAX_ISIN_LEN`] characters.
    pub fn set_isin(&mut self, value: &str) {
        self.isin = value.to_uppercase().chars().take(MAX_ISIN_LEN).collect();
    }

    pub fn set_nominal_value(&mut self, value: impl Into<String>) {
        self.nominal_value = value.into();
    }

    pub fn set_currency(&mut self, value: Currency) {
        self.currency = value;
    }

    pub fn set_number_of_shares(&mut self, value: impl Into<String>) {
        self.number_of_shares = value.into();
    }

    pub fn set_total_value(&mut self, value: impl Into<String>) {
        self.total_value = value.into();
    }

    /// Adds or removes a right. Insertion order is preserved for display;
    /// it is irrelevant to validation and the wire encoding.
    pub fn toggle_right(&mut self, right: RightKind, selected: bool) {
        if selected {
            if !self.chosen_rights.contains(&right) {
                self.chosen_rights.push(right);
            }
        } else {
            self.chosen_rights.retain(|r| *r != right);
        }
    }

    pub fn set_dividend_type(&mut self, value: DividendType) {
        self.dividend_type = Some(value);
    }

    pub fn set_regulation_type(&mut self, value: RegulationType) {
        self.regulation_type = Some(value);
    }

    pub fn set_regulation_sub_type(&mut self, value: RegulationSubType) {
        self.regulation_sub_type = Some(value);
    }

    pub fn toggle_blocked_country(&mut self, country: Country, blocked: bool) {
        if blocked {
            if !self.blocked_countries.contains(&country) {
                self.blocked_countries.push(country);
            }
        } else {
            self.blocked_countries.retain(|c| *c != country);
        }
    }

    /// Restores every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    #[must_use]
    pub fn token_symbol(&self) -> &str {
        &self.token_symbol
    }

    #[must_use]
    pub const fn token_decimals(&self) -> TokenDecimals {
        self.token_decimals
    }

    #[must_use]
    pub fn isin(&self) -> &str {
        &self.isin
    }

    #[must_use]
    pub fn nominal_value(&self) -> &str {
        &self.nominal_value
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub fn number_of_shares(&self) -> &str {
        &self.number_of_shares
    }

    #[must_use]
    pub fn total_value(&self) -> &str {
        &self.total_value
    }

    #[must_use]
    pub fn chosen_rights(&self) -> &[RightKind] {
        &self.chosen_rights
    }

    #[must_use]
    pub const fn dividend_type(&self) -> Option<DividendType> {
        self.dividend_type
    }

    #[must_use]
    pub const fn regulation_type(&self) -> Option<RegulationType> {
        self.regulation_type
    }

    #[must_use]
    pub const fn regulation_sub_type(&self) -> Option<RegulationSubType> {
        self.regulation_sub_type
    }

    #[must_use]
    pub fn blocked_countries(&self) -> &[Country] {
        &self.blocked_countries
    }
}
