//! Supplier tier classification models

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Categorical;

/// Volume of personal data the supplier processes on our behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataVolume {
    Low,
    Medium,
    High,
    Massive,
}

impl Categorical for DataVolume {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Massive];

    fn as_str(&self) -> &'static str {
        match self {
            DataVolume::Low => "low",
            DataVolume::Medium => "medium",
            DataVolume::High => "high",
            DataVolume::Massive => "massive",
        }
    }
}

/// Sensitivity of the personal data shared with the supplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSensitivity {
    NonSensitive,
    Regular,
    Sensitive,
}

impl Categorical for DataSensitivity {
    const ALL: &'static [Self] = &[Self::NonSensitive, Self::Regular, Self::Sensitive];

    fn as_str(&self) -> &'static str {
        match self {
            DataSensitivity::NonSensitive => "non_sensitive",
            DataSensitivity::Regular => "regular",
            DataSensitivity::Sensitive => "sensitive",
        }
    }
}

/// Validated answers for the risk matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ClassificationInput {
    pub data_volume: DataVolume,
    pub data_sensitivity: DataSensitivity,
    #[serde(default)]
    pub is_technology_provider: bool,
}

// A is the most critical tier, D the most basic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, JsonSchema)]
pub enum TierCode {
    A,
    B,
    C,
    D,
}

impl TierCode {
    /// Human-readable tier label
    pub fn label(self) -> &'static str {
        match self {
            TierCode::A => "Critical",
            TierCode::B => "High",
            TierCode::C => "Moderate",
            TierCode::D => "Basic",
        }
    }

    /// Severity rank, higher is riskier (D = 1, A = 4)
    pub fn risk_rank(self) -> u8 {
        match self {
            TierCode::A => 4,
            TierCode::B => 3,
            TierCode::C => 2,
            TierCode::D => 1,
        }
    }

    /// One step toward higher risk, saturating at A
    pub fn escalated(self) -> Self {
        match self {
            TierCode::D => TierCode::C,
            TierCode::C => TierCode::B,
            TierCode::B | TierCode::A => TierCode::A,
        }
    }
}

impl Categorical for TierCode {
    const ALL: &'static [Self] = &[Self::A, Self::B, Self::C, Self::D];

    fn as_str(&self) -> &'static str {
        match self {
            TierCode::A => "A",
            TierCode::B => "B",
            TierCode::C => "C",
            TierCode::D => "D",
        }
    }
}

impl fmt::Display for TierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier risk tier produced by the risk matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierTier {
    pub code: TierCode,
    pub label: String,
}

impl SupplierTier {
    pub fn new(code: TierCode) -> Self {
        Self {
            code,
            label: code.label().to_string(),
        }
    }
}

impl From<TierCode> for SupplierTier {
    fn from(code: TierCode) -> Self {
        Self::new(code)
    }
}

/// A compliance document or control the supplier must provide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentRequirement {
    pub id: String,
    pub name: String,
    pub required: bool,
    pub technology_only: bool,
}
