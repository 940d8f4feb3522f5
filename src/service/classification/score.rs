//! Additive risk score model
//!
//! Independent of the risk matrix: the two schemes are not equivalent and
//! are kept as separate strategies.

use crate::model::{RiskScore, ScoreInput};

use super::catalog::{ScorePoints, certification_points, level_for_score, policy_points};

/// Sum the seven questionnaire contributions and bucket the total.
///
/// Negative totals are kept as-is; they bucket as low.
pub fn calculate_risk_score(input: &ScoreInput) -> RiskScore {
    let score = input.data_type.points()
        + input.volume.points()
        + input.criticality.points()
        + policy_points(input.policy)
        + certification_points(input.certification)
        + input.subcontracting.points()
        + input.incidents.points();

    let level = level_for_score(score);

    tracing::debug!(score = score, level = ?level, "Calculated supplier risk score");

    RiskScore { score, level }
}

/// Score strategy marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreStrategy;

impl ScoreStrategy {
    pub fn classify(&self, input: &ScoreInput) -> RiskScore {
        calculate_risk_score(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Attestation, Criticality, DataType, IncidentHistory, RiskLevel, ScoreVolume,
        Subcontracting,
    };

    fn worst_case() -> ScoreInput {
        ScoreInput {
            data_type: DataType::Sensitive,
            volume: ScoreVolume::High,
            criticality: Criticality::Critical,
            policy: Attestation::No,
            certification: Attestation::No,
            subcontracting: Subcontracting::Unknown,
            incidents: IncidentHistory::Unresolved,
        }
    }

    #[test]
    fn test_worst_case_is_critical() {
        // 40 + 35 + 30 + 20 + 10 + 20 + 30
        let result = calculate_risk_score(&worst_case());
        assert_eq!(result.score, 185);
        assert_eq!(result.level, RiskLevel::Critical);
    }

    #[test]
    fn test_negative_score_is_not_floored() {
        let input = ScoreInput {
            data_type: DataType::None,
            volume: ScoreVolume::Low,
            criticality: Criticality::NonCritical,
            policy: Attestation::Yes,
            certification: Attestation::Yes,
            subcontracting: Subcontracting::None,
            incidents: IncidentHistory::None,
        };
        // 0 + 5 + 0 - 10 - 15 + 0 + 0, kept negative
        let result = calculate_risk_score(&input);
        assert_eq!(result.score, -20);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn test_mid_range_profile() {
        let input = ScoreInput {
            data_type: DataType::Common,
            volume: ScoreVolume::Medium,
            criticality: Criticality::NonCritical,
            policy: Attestation::Unknown,
            certification: Attestation::Unknown,
            subcontracting: Subcontracting::Identified,
            incidents: IncidentHistory::None,
        };
        // 20 + 20 + 0 + 10 + 5 + 10 + 0
        let result = calculate_risk_score(&input);
        assert_eq!(result.score, 65);
        assert_eq!(result.level, RiskLevel::High);
    }

    #[test]
    fn test_strategy_matches_calculator() {
        let input = worst_case();
        assert_eq!(ScoreStrategy.classify(&input), calculate_risk_score(&input));
    }
}
