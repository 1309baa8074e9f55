use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::overrides::OverrideTable;
use crate::qualifier::ServiceQualifier;
use crate::resolver::{resolve_from_id, resolve_from_qualifier, RequirementDescriptor, Resolution};
use crate::{ServiceBindingError, ServiceBindingResult};

/// A dependency that was skipped because its coordinates could not be determined
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum UnresolvedDependency {
    Qualifier(ServiceQualifier),
    Manual { id: String },
}

impl Display for UnresolvedDependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedDependency::Qualifier(qualifier) => write!(f, "{qualifier}"),
            UnresolvedDependency::Manual { id } => write!(f, "{id}"),
        }
    }
}

/// Every binding requirement an application needs.
///
/// Discovered qualifiers come first in the order they were given, followed by the manually
/// declared services. Any override whose id is not some qualifier's `{type}-{name}` is treated as
/// a manually declared service.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct BindingPlan {
    pub requirements: Vec<RequirementDescriptor>,
    pub unresolved: Vec<UnresolvedDependency>,
}

impl BindingPlan {
    /// A qualifier given more than once is resolved once, at its first position.
    pub fn resolve(
        app_name: &str,
        qualifiers: &[ServiceQualifier],
        overrides: &OverrideTable,
    ) -> Self {
        let mut plan = BindingPlan::default();

        let mut seen = HashSet::new();
        let qualifiers: Vec<&ServiceQualifier> =
            qualifiers.iter().filter(|q| seen.insert(*q)).collect();

        let discovered: Vec<Resolution> = qualifiers
            .par_iter()
            .map(|qualifier| resolve_from_qualifier(app_name, overrides, qualifier))
            .collect();

        for (qualifier, resolution) in qualifiers.iter().zip(discovered) {
            plan.push(resolution, || UnresolvedDependency::Qualifier((*qualifier).clone()));
        }

        let consumed: HashSet<String> = qualifiers.iter().map(|q| q.default_id()).collect();
        for id in overrides.ids().filter(|id| !consumed.contains(*id)) {
            plan.push(resolve_from_id(app_name, id, overrides), || {
                UnresolvedDependency::Manual { id: id.to_string() }
            });
        }

        plan
    }

    fn push<F>(&mut self, resolution: Resolution, unresolved: F)
    where
        F: FnOnce() -> UnresolvedDependency,
    {
        match resolution {
            Resolution::Resolved(descriptor) => self.requirements.push(descriptor),
            Resolution::Unresolved => {
                let dependency = unresolved();
                warn!(
                    dependency = %dependency,
                    "skipping service binding, unable to determine api version and kind"
                );
                self.unresolved.push(dependency);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Fails when any dependency was left unresolved. For callers that treat a missing binding as
    /// fatal.
    pub fn ensure_resolved(self) -> ServiceBindingResult<Vec<RequirementDescriptor>> {
        if self.is_complete() {
            return Ok(self.requirements);
        }

        Err(ServiceBindingError::UnresolvedDependencies(
            self.unresolved.iter().map(ToString::to_string).collect(),
        ))
    }
}
