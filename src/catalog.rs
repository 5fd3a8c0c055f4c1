//! Fixed domain catalogs for the issuance form.
//!
//! Every enumerated field on an [`IssuanceRequest`](crate::request::IssuanceRequest)
//! draws its value from one of the catalogs here. The catalogs are fixed at
//! build time; there is no runtime registration. Serialized values use the
//! same user-facing vocabulary as the labels, so persisted snapshots read
//! the way the options are displayed.

use serde::{Deserialize, Serialize};

/// A legal right that can be attached to the instrument through the form.
///
/// Only five rights are selectable even though the deployment call encodes
/// eight slots; see [`crate::deploy::RightsVector`] for the canonical slot
/// order and the three permanently-unset slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RightKind {
    #[serde(rename = "Voting Rights")]
    Voting,
    #[serde(rename = "Liquidation Rights")]
    Liquidation,
    #[serde(rename = "Information Rights")]
    Information,
    #[serde(rename = "Conversion Rights")]
    Conversion,
    #[serde(rename = "Put Right")]
    Put,
}

impl RightKind {
    pub const ALL: [Self; 5] = [
        Self::Voting,
        Self::Liquidation,
        Self::Information,
        Self::Conversion,
        Self::Put,
    ];

    /// User-facing label, as shown on the form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Voting => "Voting Rights",
            Self::Liquidation => "Liquidation Rights",
            Self::Information => "Information Rights",
            Self::Conversion => "Conversion Rights",
            Self::Put => "Put Right",
        }
    }
}

impl std::fmt::Display for RightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Dividend economics of the instrument. Required, no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividendType {
    #[serde(rename = "Fixed Dividend")]
    Fixed,
    #[serde(rename = "Variable Dividend")]
    Variable,
    #[serde(rename = "Cumulative Dividend")]
    Cumulative,
    #[serde(rename = "Non-Cumulative Dividend")]
    NonCumulative,
}

impl DividendType {
    pub const ALL: [Self; 4] =
        [Self::Fixed, Self::Variable, Self::Cumulative, Self::NonCumulative];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed Dividend",
            Self::Variable => "Variable Dividend",
            Self::Cumulative => "Cumulative Dividend",
            Self::NonCumulative => "Non-Cumulative Dividend",
        }
    }
}

impl std::fmt::Display for DividendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Securities regulation regime the offering is made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegulationType {
    #[serde(rename = "Regulation D")]
    RegulationD,
    #[serde(rename = "Regulation S")]
    RegulationS,
    #[serde(rename = "Regulation A+")]
    RegulationAPlus,
    #[serde(rename = "Regulation CF")]
    RegulationCf,
}

impl RegulationType {
    pub const ALL: [Self; 4] = [
        Self::RegulationD,
        Self::RegulationS,
        Self::RegulationAPlus,
        Self::RegulationCf,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RegulationD => "Regulation D",
            Self::RegulationS => "Regulation S",
            Self::RegulationAPlus => "Regulation A+",
            Self::RegulationCf => "Regulation CF",
        }
    }
}

impl std::fmt::Display for RegulationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Regulation subtype.
///
/// No cross-validation against [`RegulationType`] is performed: a subtype
/// belonging to one regime can be paired with any regime. Known gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegulationSubType {
    #[serde(rename = "506(b)")]
    Rule506B,
    #[serde(rename = "506(c)")]
    Rule506C,
    #[serde(rename = "Rule 144A")]
    Rule144A,
    #[serde(rename = "Tier I")]
    TierI,
    #[serde(rename = "Tier II")]
    TierII,
}

impl RegulationSubType {
    pub const ALL: [Self; 5] = [
        Self::Rule506B,
        Self::Rule506C,
        Self::Rule144A,
        Self::TierI,
        Self::TierII,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rule506B => "506(b)",
            Self::Rule506C => "506(c)",
            Self::Rule144A => "Rule 144A",
            Self::TierI => "Tier I",
            Self::TierII => "Tier II",
        }
    }
}

impl std::fmt::Display for RegulationSubType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Denomination currency for the nominal value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "HBAR")]
    Hbar,
}

impl Currency {
    pub const ALL: [Self; 4] = [Self::Usd, Self::Eur, Self::Gbp, Self::Hbar];

    /// ISO-style code, as passed to the deployment call.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Hbar => "HBAR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Display decimals for the token.
///
/// This is a display field only; the deployment call's nominal-value scaling
/// is always 18-decimal fixed point regardless of this choice.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum TokenDecimals {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "8")]
    Eight,
    #[default]
    #[serde(rename = "18")]
    Eighteen,
}

impl TokenDecimals {
    pub const ALL: [Self; 4] =
        [Self::Zero, Self::Six, Self::Eight, Self::Eighteen];

    pub const fn value(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Six => 6,
            Self::Eight => 8,
            Self::Eighteen => 18,
        }
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Jurisdictions that can be blocked from holding the instrument.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Country {
    #[serde(rename = "United States")]
    UnitedStates,
    China,
    Russia,
    Iran,
    #[serde(rename = "North Korea")]
    NorthKorea,
    Syria,
    Cuba,
}

impl Country {
    pub const ALL: [Self; 7] = [
        Self::UnitedStates,
        Self::China,
        Self::Russia,
        Self::Iran,
        Self::NorthKorea,
        Self::Syria,
        Self::Cuba,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::China => "China",
            Self::Russia => "Russia",
            Self::Iran => "Iran",
            Self::NorthKorea => "North Korea",
            Self::Syria => "Syria",
            Self::Cuba => "Cuba",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
