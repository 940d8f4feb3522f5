//! Static classification tables
//!
//! Every table the classifiers read lives here. The catalog is immutable and
//! shared by reference; `verify_catalog` runs at startup to reject a catalog
//! that is not total over the valid inputs.

use std::collections::HashSet;

use crate::model::{
    Attestation, Categorical, Criticality, DataSensitivity, DataType, DataVolume, IncidentHistory,
    RiskLevel, ScoreVolume, Subcontracting, TierCode,
};

use super::error::ClassificationError;

/// Upper bound (inclusive) of the low bucket
pub const LOW_MAX_SCORE: i32 = 30;
/// Upper bound (inclusive) of the medium bucket
pub const MEDIUM_MAX_SCORE: i32 = 60;
/// Upper bound (inclusive) of the high bucket
pub const HIGH_MAX_SCORE: i32 = 90;

/// One cell of the volume x sensitivity matrix
#[derive(Debug, Clone, Copy)]
pub struct MatrixEntry {
    pub volume: DataVolume,
    pub sensitivity: DataSensitivity,
    pub tier: TierCode,
}

/// Catalog entry for a compliance document
#[derive(Debug, Clone, Copy)]
pub struct DocumentSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub required: bool,
}

/// Documents requested for a tier, in declaration order
#[derive(Debug, Clone, Copy)]
pub struct TierDocuments {
    pub tier: TierCode,
    pub documents: &'static [DocumentSpec],
}

/// Technology addendum document, required only for the listed tiers
#[derive(Debug, Clone, Copy)]
pub struct TechnologyDocument {
    pub id: &'static str,
    pub name: &'static str,
    pub required_for: &'static [TierCode],
}

/// All tables used by the matrix classifier and the document resolver
#[derive(Debug, Clone, Copy)]
pub struct RiskCatalog {
    pub matrix: &'static [MatrixEntry],
    pub baseline_documents: &'static [DocumentSpec],
    pub tier_documents: &'static [TierDocuments],
    pub technology_documents: &'static [TechnologyDocument],
}

const fn cell(volume: DataVolume, sensitivity: DataSensitivity, tier: TierCode) -> MatrixEntry {
    MatrixEntry {
        volume,
        sensitivity,
        tier,
    }
}

const fn doc(id: &'static str, name: &'static str, required: bool) -> DocumentSpec {
    DocumentSpec { id, name, required }
}

const MATRIX: &[MatrixEntry] = &[
    cell(DataVolume::Low, DataSensitivity::NonSensitive, TierCode::D),
    cell(DataVolume::Low, DataSensitivity::Regular, TierCode::D),
    cell(DataVolume::Low, DataSensitivity::Sensitive, TierCode::C),
    cell(DataVolume::Medium, DataSensitivity::NonSensitive, TierCode::D),
    cell(DataVolume::Medium, DataSensitivity::Regular, TierCode::C),
    cell(DataVolume::Medium, DataSensitivity::Sensitive, TierCode::B),
    cell(DataVolume::High, DataSensitivity::NonSensitive, TierCode::C),
    cell(DataVolume::High, DataSensitivity::Regular, TierCode::C),
    cell(DataVolume::High, DataSensitivity::Sensitive, TierCode::B),
    cell(DataVolume::Massive, DataSensitivity::NonSensitive, TierCode::C),
    cell(DataVolume::Massive, DataSensitivity::Regular, TierCode::B),
    cell(DataVolume::Massive, DataSensitivity::Sensitive, TierCode::A),
];

const BASELINE_DOCUMENTS: &[DocumentSpec] = &[
    doc("privacy_policy", "Privacy policy", true),
    doc("dpo_appointment", "DPO appointment letter", true),
    doc(
        "data_processing_inventory",
        "Personal data processing inventory",
        false,
    ),
];

const TIER_A_DOCUMENTS: &[DocumentSpec] = &[
    doc("incident_response_plan", "Incident response plan", true),
    doc("security_certifications", "Security certifications (ISO 27001, SOC 2)", true),
    doc("dpia", "Data protection impact assessment (DPIA)", true),
    doc("data_mapping", "Personal data mapping", true),
    doc("subcontractor_list", "Subcontractor list", true),
    doc("security_controls_evidence", "Evidence of security controls", true),
    doc("awareness_training_program", "Privacy awareness training program", true),
];

const TIER_B_DOCUMENTS: &[DocumentSpec] = &[
    doc("incident_response_plan", "Incident response plan", true),
    doc("data_mapping", "Personal data mapping", true),
    doc("subcontractor_list", "Subcontractor list", true),
    doc("security_controls_evidence", "Evidence of security controls", true),
    doc("security_certifications", "Security certifications (ISO 27001, SOC 2)", false),
];

const TIER_C_DOCUMENTS: &[DocumentSpec] = &[
    doc("confidentiality_clause", "Confidentiality clause", true),
    doc("incident_response_plan", "Incident response plan", false),
    doc("security_controls_evidence", "Evidence of security controls", false),
];

const TIER_D_DOCUMENTS: &[DocumentSpec] =
    &[doc("confidentiality_clause", "Confidentiality clause", false)];

const TIER_DOCUMENTS: &[TierDocuments] = &[
    TierDocuments {
        tier: TierCode::A,
        documents: TIER_A_DOCUMENTS,
    },
    TierDocuments {
        tier: TierCode::B,
        documents: TIER_B_DOCUMENTS,
    },
    TierDocuments {
        tier: TierCode::C,
        documents: TIER_C_DOCUMENTS,
    },
    TierDocuments {
        tier: TierCode::D,
        documents: TIER_D_DOCUMENTS,
    },
];

const TECHNOLOGY_DOCUMENTS: &[TechnologyDocument] = &[
    TechnologyDocument {
        id: "access_control_policy",
        name: "Access control policy",
        required_for: &[TierCode::A, TierCode::B],
    },
    TechnologyDocument {
        id: "encryption_policy",
        name: "Encryption policy",
        required_for: &[TierCode::A, TierCode::B],
    },
    TechnologyDocument {
        id: "backup_recovery_policy",
        name: "Backup and recovery policy",
        required_for: &[TierCode::A],
    },
];

/// The catalog used by the service
pub static DEFAULT_CATALOG: RiskCatalog = RiskCatalog {
    matrix: MATRIX,
    baseline_documents: BASELINE_DOCUMENTS,
    tier_documents: TIER_DOCUMENTS,
    technology_documents: TECHNOLOGY_DOCUMENTS,
};

impl RiskCatalog {
    /// Matrix cell for a volume/sensitivity pair
    pub fn matrix_tier(
        &self,
        volume: DataVolume,
        sensitivity: DataSensitivity,
    ) -> Result<TierCode, ClassificationError> {
        self.matrix
            .iter()
            .find(|e| e.volume == volume && e.sensitivity == sensitivity)
            .map(|e| e.tier)
            .ok_or_else(|| {
                ClassificationError::IncompleteConfiguration(format!(
                    "no matrix entry for volume '{}' and sensitivity '{}'",
                    volume.as_str(),
                    sensitivity.as_str()
                ))
            })
    }

    /// Tier-specific documents
    pub fn documents_for(
        &self,
        tier: TierCode,
    ) -> Result<&'static [DocumentSpec], ClassificationError> {
        self.tier_documents
            .iter()
            .find(|t| t.tier == tier)
            .map(|t| t.documents)
            .ok_or_else(|| {
                ClassificationError::IncompleteConfiguration(format!(
                    "no document list for tier {}",
                    tier
                ))
            })
    }
}

/// Check that the catalog covers every valid input exactly once
pub fn verify_catalog(catalog: &RiskCatalog) -> Result<(), ClassificationError> {
    for volume in DataVolume::ALL {
        for sensitivity in DataSensitivity::ALL {
            let matches = catalog
                .matrix
                .iter()
                .filter(|e| e.volume == *volume && e.sensitivity == *sensitivity)
                .count();
            match matches {
                0 => return catalog.matrix_tier(*volume, *sensitivity).map(|_| ()),
                1 => {}
                n => {
                    return Err(ClassificationError::IncompleteConfiguration(format!(
                        "{} matrix entries for volume '{}' and sensitivity '{}'",
                        n,
                        volume.as_str(),
                        sensitivity.as_str()
                    )));
                }
            }
        }
    }

    for tier in TierCode::ALL {
        let matches = catalog.tier_documents.iter().filter(|t| t.tier == *tier).count();
        if matches != 1 {
            return Err(ClassificationError::IncompleteConfiguration(format!(
                "expected one document list for tier {}, found {}",
                tier, matches
            )));
        }
    }

    let mut baseline_ids = HashSet::new();
    for spec in catalog.baseline_documents {
        if !baseline_ids.insert(spec.id) {
            return Err(ClassificationError::IncompleteConfiguration(format!(
                "duplicate baseline document '{}'",
                spec.id
            )));
        }
    }

    Ok(())
}

/// Points contributed by one score questionnaire answer
pub trait ScorePoints {
    fn points(self) -> i32;
}

impl ScorePoints for DataType {
    fn points(self) -> i32 {
        match self {
            DataType::None => 0,
            DataType::Common => 20,
            DataType::Sensitive => 40,
        }
    }
}

impl ScorePoints for ScoreVolume {
    fn points(self) -> i32 {
        match self {
            ScoreVolume::Low => 5,
            ScoreVolume::Medium => 20,
            ScoreVolume::High => 35,
        }
    }
}

impl ScorePoints for Criticality {
    fn points(self) -> i32 {
        match self {
            Criticality::Critical => 30,
            Criticality::NonCritical => 0,
        }
    }
}

/// Policy answer; having a policy lowers the score
pub fn policy_points(answer: Attestation) -> i32 {
    match answer {
        Attestation::Yes => -10,
        Attestation::No => 20,
        Attestation::Unknown => 10,
    }
}

/// Certification answer; a certified supplier lowers the score
pub fn certification_points(answer: Attestation) -> i32 {
    match answer {
        Attestation::Yes => -15,
        Attestation::No => 10,
        Attestation::Unknown => 5,
    }
}

impl ScorePoints for Subcontracting {
    fn points(self) -> i32 {
        match self {
            Subcontracting::None => 0,
            Subcontracting::Identified => 10,
            Subcontracting::Unknown => 20,
        }
    }
}

impl ScorePoints for IncidentHistory {
    fn points(self) -> i32 {
        match self {
            IncidentHistory::None => 0,
            IncidentHistory::Resolved => 10,
            IncidentHistory::Unresolved => 30,
        }
    }
}

/// Bucket a raw score; upper bounds are inclusive
pub fn level_for_score(score: i32) -> RiskLevel {
    if score <= LOW_MAX_SCORE {
        RiskLevel::Low
    } else if score <= MEDIUM_MAX_SCORE {
        RiskLevel::Medium
    } else if score <= HIGH_MAX_SCORE {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}
