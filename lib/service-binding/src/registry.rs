use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

pub const SERVICES_STR: &str = include_str!("services.yaml");

lazy_static! {
    static ref SERVICES: HashMap<String, RegistryEntry> =
        serde_yaml::from_str::<Vec<RegistryEntry>>(SERVICES_STR)
            .expect("services.yaml should be deserializable")
            .into_iter()
            .map(|entry| (entry.service_type.clone(), entry))
            .collect();
}

/// Default custom resource coordinates for a well-known service type
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Service type the entry is registered under
    ///
    /// # Examples
    /// postgresql
    #[serde(rename = "type")]
    pub service_type: String,

    /// API group and version of the operator's custom resource
    ///
    /// # Examples
    /// postgres-operator.crunchydata.com/v1beta1
    pub api_version: String,

    /// Kind of the operator's custom resource
    ///
    /// # Examples
    /// PostgresCluster
    pub kind: String,
}

impl Display for RegistryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.service_type, self.api_version, self.kind)
    }
}

/// Returns the registered coordinates for `service_type`, if the type is known.
pub fn lookup(service_type: &str) -> Option<&'static RegistryEntry> {
    SERVICES.get(service_type)
}

/// All registered entries ordered by service type
pub fn all() -> Vec<&'static RegistryEntry> {
    let mut entries: Vec<&RegistryEntry> = SERVICES.values().collect();
    entries.sort_by(|a, b| a.service_type.cmp(&b.service_type));
    entries
}
