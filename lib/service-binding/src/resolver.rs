use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::overrides::{OverrideRecord, OverrideTable};
use crate::qualifier::ServiceQualifier;
use crate::registry;

/// Coordinates needed to request a credential binding for a backing service
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDescriptor {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub binding: String,
}

impl Display for RequirementDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.binding, self.api_version, self.kind, self.name
        )
    }
}

/// Outcome of resolving a single dependency
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Resolved(RequirementDescriptor),

    /// API version or kind could not be determined
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn descriptor(&self) -> Option<&RequirementDescriptor> {
        match self {
            Resolution::Resolved(descriptor) => Some(descriptor),
            Resolution::Unresolved => None,
        }
    }

    pub fn into_option(self) -> Option<RequirementDescriptor> {
        match self {
            Resolution::Resolved(descriptor) => Some(descriptor),
            Resolution::Unresolved => None,
        }
    }
}

/// Values used for every field the override record leaves out
struct Defaults<'a> {
    api_version: Option<&'a str>,
    kind: Option<&'a str>,
    name: String,
    binding: String,
}

fn merge(record: Option<&OverrideRecord>, defaults: Defaults<'_>) -> Resolution {
    let record = record.filter(|r| !r.is_empty());
    let api_version = record.and_then(OverrideRecord::api_version).or(defaults.api_version);
    let kind = record.and_then(OverrideRecord::kind).or(defaults.kind);

    let (Some(api_version), Some(kind)) = (api_version, kind) else {
        return Resolution::Unresolved;
    };

    let name = record
        .and_then(OverrideRecord::name)
        .map(ToString::to_string)
        .unwrap_or(defaults.name);
    let binding = record
        .and_then(OverrideRecord::binding)
        .map(ToString::to_string)
        .unwrap_or(defaults.binding);

    Resolution::Resolved(RequirementDescriptor {
        api_version: api_version.to_string(),
        kind: kind.to_string(),
        name,
        binding,
    })
}

/// Resolves an automatically discovered service.
///
/// Values from the override stored under the qualifier's `{type}-{name}` id win field by field,
/// then the registry supplies API version and kind. The resource name defaults to the id and the
/// binding to `{app_name}-{type}-{name}`.
pub fn resolve_from_qualifier(
    app_name: &str,
    overrides: &OverrideTable,
    qualifier: &ServiceQualifier,
) -> Resolution {
    let default_id = qualifier.default_id();
    let default_binding = format!("{app_name}-{default_id}");
    let entry = registry::lookup(&qualifier.service_type);

    let resolution = merge(
        overrides.get(&default_id),
        Defaults {
            api_version: entry.map(|e| e.api_version.as_str()),
            kind: entry.map(|e| e.kind.as_str()),
            name: default_id.clone(),
            binding: default_binding,
        },
    );

    if !resolution.is_resolved() {
        debug!(
            qualifier = %qualifier,
            known_type = entry.is_some(),
            "no api version or kind available for service"
        );
    }

    resolution
}

/// Resolves a service the user declared by identifier.
///
/// There is no registry fallback here so the override must provide both API version and kind.
/// The resource name defaults to `id` and the binding to `{app_name}-{id}`. A blank `id` never
/// resolves.
pub fn resolve_from_id(app_name: &str, id: &str, overrides: &OverrideTable) -> Resolution {
    if id.trim().is_empty() {
        debug!("blank service id");
        return Resolution::Unresolved;
    }

    let Some(record) = overrides.get(id) else {
        debug!(id, "no override declared for service");
        return Resolution::Unresolved;
    };

    let resolution = merge(
        Some(record),
        Defaults {
            api_version: None,
            kind: None,
            name: id.to_string(),
            binding: format!("{app_name}-{id}"),
        },
    );

    if !resolution.is_resolved() {
        debug!(id, "override for service is missing api version or kind");
    }

    resolution
}
