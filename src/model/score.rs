//! Models for the additive supplier risk score

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Categorical, TierCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    None,
    Common,
    Sensitive,
}

impl Categorical for DataType {
    const ALL: &'static [Self] = &[Self::None, Self::Common, Self::Sensitive];

    fn as_str(&self) -> &'static str {
        match self {
            DataType::None => "none",
            DataType::Common => "common",
            DataType::Sensitive => "sensitive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreVolume {
    Low,
    Medium,
    High,
}

impl Categorical for ScoreVolume {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(&self) -> &'static str {
        match self {
            ScoreVolume::Low => "low",
            ScoreVolume::Medium => "medium",
            ScoreVolume::High => "high",
        }
    }
}

/// Whether the supplier supports a business-critical process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Critical,
    NonCritical,
}

impl Categorical for Criticality {
    const ALL: &'static [Self] = &[Self::Critical, Self::NonCritical];

    fn as_str(&self) -> &'static str {
        match self {
            Criticality::Critical => "critical",
            Criticality::NonCritical => "non_critical",
        }
    }
}

/// Yes/no/unknown answer used by the policy and certification questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Attestation {
    Yes,
    No,
    Unknown,
}

impl Categorical for Attestation {
    const ALL: &'static [Self] = &[Self::Yes, Self::No, Self::Unknown];

    fn as_str(&self) -> &'static str {
        match self {
            Attestation::Yes => "yes",
            Attestation::No => "no",
            Attestation::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Subcontracting {
    None,
    Identified,
    Unknown,
}

impl Categorical for Subcontracting {
    const ALL: &'static [Self] = &[Self::None, Self::Identified, Self::Unknown];

    fn as_str(&self) -> &'static str {
        match self {
            Subcontracting::None => "none",
            Subcontracting::Identified => "identified",
            Subcontracting::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IncidentHistory {
    None,
    Resolved,
    Unresolved,
}

impl Categorical for IncidentHistory {
    const ALL: &'static [Self] = &[Self::None, Self::Resolved, Self::Unresolved];

    fn as_str(&self) -> &'static str {
        match self {
            IncidentHistory::None => "none",
            IncidentHistory::Resolved => "resolved",
            IncidentHistory::Unresolved => "unresolved",
        }
    }
}

/// Validated answers for the score-based questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ScoreInput {
    pub data_type: DataType,
    pub volume: ScoreVolume,
    pub criticality: Criticality,
    pub policy: Attestation,
    pub certification: Attestation,
    pub subcontracting: Subcontracting,
    pub incidents: IncidentHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Tier whose document checklist applies to suppliers scored at this level
    pub fn document_tier(self) -> TierCode {
        match self {
            RiskLevel::Critical => TierCode::A,
            RiskLevel::High => TierCode::B,
            RiskLevel::Medium => TierCode::C,
            RiskLevel::Low => TierCode::D,
        }
    }
}

impl Categorical for RiskLevel {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Computed score and its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskScore {
    pub score: i32,
    pub level: RiskLevel,
}
