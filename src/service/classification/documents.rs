//! Document requirement resolution
//!
//! The checklist is built from three blocks, in order: baseline documents,
//! tier documents, technology addendum. Each block keeps its declaration
//! order. An id seen twice is merged into its first position and stays
//! required if either source requires it.

use crate::model::{DocumentRequirement, TierCode};

use super::catalog::RiskCatalog;
use super::error::ClassificationError;

/// Resolve the ordered checklist for a tier
pub fn resolve_required_documents(
    catalog: &RiskCatalog,
    tier: TierCode,
    is_technology_provider: bool,
) -> Result<Vec<DocumentRequirement>, ClassificationError> {
    let mut documents: Vec<DocumentRequirement> = Vec::new();

    for spec in catalog.baseline_documents {
        push_merged(&mut documents, spec.id, spec.name, spec.required, false);
    }

    for spec in catalog.documents_for(tier)? {
        push_merged(&mut documents, spec.id, spec.name, spec.required, false);
    }

    if is_technology_provider {
        for spec in catalog.technology_documents {
            let required = spec.required_for.contains(&tier);
            push_merged(&mut documents, spec.id, spec.name, required, true);
        }
    }

    tracing::debug!(
        tier = %tier,
        technology = is_technology_provider,
        documents = documents.len(),
        required = documents.iter().filter(|d| d.required).count(),
        "Resolved document requirements"
    );

    Ok(documents)
}

fn push_merged(
    documents: &mut Vec<DocumentRequirement>,
    id: &str,
    name: &str,
    required: bool,
    technology_only: bool,
) {
    if let Some(existing) = documents.iter_mut().find(|d| d.id == id) {
        existing.required |= required;
        existing.technology_only &= technology_only;
        return;
    }

    documents.push(DocumentRequirement {
        id: id.to_string(),
        name: name.to_string(),
        required,
        technology_only,
    });
}
