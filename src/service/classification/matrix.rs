//! Risk matrix classification with optional technology escalation

use crate::model::{ClassificationInput, DataSensitivity, DataVolume, SupplierTier};

use super::catalog::RiskCatalog;
use super::error::ClassificationError;

/// Look up the base tier for a volume/sensitivity pair
pub fn classify_tier(
    catalog: &RiskCatalog,
    volume: DataVolume,
    sensitivity: DataSensitivity,
) -> Result<SupplierTier, ClassificationError> {
    catalog.matrix_tier(volume, sensitivity).map(SupplierTier::new)
}

/// Raise a tier one step toward A for technology providers.
///
/// Must be applied to the matrix result, exactly once. A stays A.
pub fn escalate_for_technology(tier: SupplierTier, is_technology_provider: bool) -> SupplierTier {
    if !is_technology_provider {
        return tier;
    }
    SupplierTier::new(tier.code.escalated())
}

/// Matrix strategy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixStrategy {
    pub escalate_technology: bool,
}

impl MatrixStrategy {
    /// Classify and return `(base_tier, final_tier)`
    pub fn classify(
        &self,
        catalog: &RiskCatalog,
        input: &ClassificationInput,
    ) -> Result<(SupplierTier, SupplierTier), ClassificationError> {
        let base = classify_tier(catalog, input.data_volume, input.data_sensitivity)?;
        let tier = if self.escalate_technology {
            escalate_for_technology(base.clone(), input.is_technology_provider)
        } else {
            base.clone()
        };

        tracing::debug!(
            volume = ?input.data_volume,
            sensitivity = ?input.data_sensitivity,
            technology = input.is_technology_provider,
            base_tier = %base.code,
            tier = %tier.code,
            "Classified supplier with risk matrix"
        );

        Ok((base, tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Categorical, TierCode};
    use crate::service::classification::catalog::DEFAULT_CATALOG;

    fn tier(volume: DataVolume, sensitivity: DataSensitivity) -> TierCode {
        classify_tier(&DEFAULT_CATALOG, volume, sensitivity)
            .unwrap()
            .code
    }

    #[test]
    fn test_low_volume_row() {
        assert_eq!(tier(DataVolume::Low, DataSensitivity::NonSensitive), TierCode::D);
        assert_eq!(tier(DataVolume::Low, DataSensitivity::Regular), TierCode::D);
        assert_eq!(tier(DataVolume::Low, DataSensitivity::Sensitive), TierCode::C);
    }

    #[test]
    fn test_medium_volume_row() {
        assert_eq!(tier(DataVolume::Medium, DataSensitivity::NonSensitive), TierCode::D);
        assert_eq!(tier(DataVolume::Medium, DataSensitivity::Regular), TierCode::C);
        assert_eq!(tier(DataVolume::Medium, DataSensitivity::Sensitive), TierCode::B);
    }

    #[test]
    fn test_high_volume_row() {
        assert_eq!(tier(DataVolume::High, DataSensitivity::NonSensitive), TierCode::C);
        assert_eq!(tier(DataVolume::High, DataSensitivity::Regular), TierCode::C);
        assert_eq!(tier(DataVolume::High, DataSensitivity::Sensitive), TierCode::B);
    }

    #[test]
    fn test_massive_volume_row() {
        assert_eq!(tier(DataVolume::Massive, DataSensitivity::NonSensitive), TierCode::C);
        assert_eq!(tier(DataVolume::Massive, DataSensitivity::Regular), TierCode::B);
        assert_eq!(tier(DataVolume::Massive, DataSensitivity::Sensitive), TierCode::A);
    }

    #[test]
    fn test_label_follows_code() {
        let t = classify_tier(&DEFAULT_CATALOG, DataVolume::Massive, DataSensitivity::Sensitive)
            .unwrap();
        assert_eq!(t.label, "Critical");
        let t = classify_tier(&DEFAULT_CATALOG, DataVolume::Low, DataSensitivity::Regular)
            .unwrap();
        assert_eq!(t.label, "Basic");
    }

    #[test]
    fn test_escalation_never_lowers_risk() {
        for code in TierCode::ALL {
            let escalated = escalate_for_technology(SupplierTier::new(*code), true);
            assert!(escalated.code.risk_rank() >= code.risk_rank());
            assert!(escalated.code.risk_rank() <= code.risk_rank() + 1);
        }
    }

    #[test]
    fn test_escalation_ceiling_at_a() {
        let a = SupplierTier::new(TierCode::A);
        assert_eq!(escalate_for_technology(a.clone(), true), a);
    }

    #[test]
    fn test_escalation_identity_without_flag() {
        for code in TierCode::ALL {
            let t = SupplierTier::new(*code);
            assert_eq!(escalate_for_technology(t.clone(), false), t);
        }
    }

    #[test]
    fn test_strategy_escalates_once() {
        let input = ClassificationInput {
            data_volume: DataVolume::Low,
            data_sensitivity: DataSensitivity::NonSensitive,
            is_technology_provider: true,
        };
        let strategy = MatrixStrategy {
            escalate_technology: true,
        };
        let (base, final_tier) = strategy.classify(&DEFAULT_CATALOG, &input).unwrap();
        assert_eq!(base.code, TierCode::D);
        assert_eq!(final_tier.code, TierCode::C);
    }

    #[test]
    fn test_strategy_without_escalation_keeps_base() {
        let input = ClassificationInput {
            data_volume: DataVolume::Massive,
            data_sensitivity: DataSensitivity::Regular,
            is_technology_provider: true,
        };
        let strategy = MatrixStrategy {
            escalate_technology: false,
        };
        let (base, final_tier) = strategy.classify(&DEFAULT_CATALOG, &input).unwrap();
        assert_eq!(base, final_tier);
        assert_eq!(final_tier.code, TierCode::B);
    }
}
