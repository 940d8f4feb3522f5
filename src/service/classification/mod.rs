//! Supplier risk classification
//!
//! Two independent strategies classify a supplier: the volume x sensitivity
//! risk matrix (with optional technology escalation) and the additive score
//! questionnaire. Either result feeds the document requirement resolver.

pub mod catalog;
pub mod converters;
pub mod documents;
pub mod error;
pub mod matrix;
pub mod score;

use crate::model::{
    AssessmentInput, Categorical, Classification, ClassificationOutcome, ClassificationSettings,
    DocumentRequirement, TierCode,
};

use catalog::{DEFAULT_CATALOG, RiskCatalog, verify_catalog};
use documents::resolve_required_documents;

pub use error::ClassificationError;
pub use matrix::MatrixStrategy;
pub use score::ScoreStrategy;

/// Classification scheme chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClassificationStrategy {
    Matrix(MatrixStrategy),
    Score(ScoreStrategy),
}

impl RiskClassificationStrategy {
    /// Run the strategy. The input must belong to the same flow.
    pub fn classify(
        &self,
        catalog: &RiskCatalog,
        input: &AssessmentInput,
    ) -> Result<Classification, ClassificationError> {
        match (self, input) {
            (Self::Matrix(strategy), AssessmentInput::Matrix(answers)) => {
                let (base, tier) = strategy.classify(catalog, answers)?;
                Ok(Classification::Matrix {
                    base_tier: base.code,
                    tier,
                })
            }
            (Self::Score(strategy), AssessmentInput::Score { answers, .. }) => {
                Ok(Classification::Score {
                    risk_score: strategy.classify(answers),
                })
            }
            _ => Err(ClassificationError::invalid(
                "strategy",
                input.strategy().as_str(),
            )),
        }
    }
}

impl Classification {
    /// Tier whose checklist applies to this classification
    pub fn document_tier(&self) -> TierCode {
        match self {
            Classification::Matrix { tier, .. } => tier.code,
            Classification::Score { risk_score } => risk_score.level.document_tier(),
        }
    }
}

/// Service wrapping the catalog and the configured defaults
#[derive(Debug, Clone)]
pub struct ClassificationService {
    catalog: &'static RiskCatalog,
    escalate_technology: bool,
}

impl ClassificationService {
    /// Create the service over the built-in catalog
    pub fn new(settings: &ClassificationSettings) -> Result<Self, ClassificationError> {
        Self::with_catalog(&DEFAULT_CATALOG, settings.escalate_technology)
    }

    /// Create the service over a given catalog, rejecting one that is not total
    pub fn with_catalog(
        catalog: &'static RiskCatalog,
        escalate_technology: bool,
    ) -> Result<Self, ClassificationError> {
        verify_catalog(catalog)?;

        tracing::info!(
            escalate_technology = escalate_technology,
            matrix_cells = catalog.matrix.len(),
            "Classification service initialized"
        );

        Ok(Self {
            catalog,
            escalate_technology,
        })
    }

    /// Strategy matching an input; `escalate_technology` overrides the configured default
    pub fn strategy_for(
        &self,
        input: &AssessmentInput,
        escalate_technology: Option<bool>,
    ) -> RiskClassificationStrategy {
        match input {
            AssessmentInput::Matrix(_) => RiskClassificationStrategy::Matrix(MatrixStrategy {
                escalate_technology: escalate_technology.unwrap_or(self.escalate_technology),
            }),
            AssessmentInput::Score { .. } => RiskClassificationStrategy::Score(ScoreStrategy),
        }
    }

    /// Classify with an explicit strategy and resolve the checklist
    pub fn assess(
        &self,
        strategy: RiskClassificationStrategy,
        input: &AssessmentInput,
    ) -> Result<ClassificationOutcome, ClassificationError> {
        let classification = strategy.classify(self.catalog, input)?;
        let document_tier = classification.document_tier();
        let required_documents = resolve_required_documents(
            self.catalog,
            document_tier,
            input.is_technology_provider(),
        )?;

        Ok(ClassificationOutcome {
            classification,
            document_tier,
            required_documents,
        })
    }

    /// Classify with the strategy matching the input
    pub fn assess_default(
        &self,
        input: &AssessmentInput,
        escalate_technology: Option<bool>,
    ) -> Result<ClassificationOutcome, ClassificationError> {
        self.assess(self.strategy_for(input, escalate_technology), input)
    }

    /// Checklist for a tier
    pub fn required_documents(
        &self,
        tier: TierCode,
        is_technology_provider: bool,
    ) -> Result<Vec<DocumentRequirement>, ClassificationError> {
        resolve_required_documents(self.catalog, tier, is_technology_provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Attestation, ClassificationInput, Criticality, DataSensitivity, DataType, DataVolume,
        IncidentHistory, RiskLevel, ScoreInput, ScoreVolume, Subcontracting,
    };

    fn service(escalate: bool) -> ClassificationService {
        ClassificationService::with_catalog(&DEFAULT_CATALOG, escalate).unwrap()
    }

    fn matrix_input(technology: bool) -> AssessmentInput {
        AssessmentInput::Matrix(ClassificationInput {
            data_volume: DataVolume::Medium,
            data_sensitivity: DataSensitivity::Sensitive,
            is_technology_provider: technology,
        })
    }

    fn score_input() -> AssessmentInput {
        AssessmentInput::Score {
            answers: ScoreInput {
                data_type: DataType::Sensitive,
                volume: ScoreVolume::Medium,
                criticality: Criticality::NonCritical,
                policy: Attestation::Yes,
                certification: Attestation::No,
                subcontracting: Subcontracting::Identified,
                incidents: IncidentHistory::None,
            },
            is_technology_provider: false,
        }
    }

    #[test]
    fn test_matrix_with_escalation() {
        let outcome = service(true).assess_default(&matrix_input(true), None).unwrap();
        match &outcome.classification {
            Classification::Matrix { base_tier, tier } => {
                assert_eq!(*base_tier, TierCode::B);
                assert_eq!(tier.code, TierCode::A);
            }
            other => panic!("unexpected classification: {:?}", other),
        }
        assert_eq!(outcome.document_tier, TierCode::A);
        assert!(outcome.required_documents.iter().any(|d| d.id == "dpia"));
    }

    #[test]
    fn test_request_override_disables_escalation() {
        let outcome = service(true)
            .assess_default(&matrix_input(true), Some(false))
            .unwrap();
        assert_eq!(outcome.document_tier, TierCode::B);
        // technology addendum still applies to the checklist
        assert!(
            outcome
                .required_documents
                .iter()
                .any(|d| d.id == "encryption_policy" && d.required)
        );
    }

    #[test]
    fn test_configured_default_without_escalation() {
        let outcome = service(false).assess_default(&matrix_input(true), None).unwrap();
        assert_eq!(outcome.document_tier, TierCode::B);
    }

    #[test]
    fn test_score_strategy_maps_level_to_checklist_tier() {
        // 40 + 20 + 0 - 10 + 10 + 10 + 0
        let outcome = service(true).assess_default(&score_input(), None).unwrap();
        match &outcome.classification {
            Classification::Score { risk_score } => {
                assert_eq!(risk_score.score, 70);
                assert_eq!(risk_score.level, RiskLevel::High);
            }
            other => panic!("unexpected classification: {:?}", other),
        }
        assert_eq!(outcome.document_tier, TierCode::B);
    }

    #[test]
    fn test_mismatched_strategy_is_rejected() {
        let strategy = RiskClassificationStrategy::Matrix(MatrixStrategy {
            escalate_technology: true,
        });
        let err = service(true).assess(strategy, &score_input()).unwrap_err();
        assert_eq!(err, ClassificationError::invalid("strategy", "score"));
    }
}
