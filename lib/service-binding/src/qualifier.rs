use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ServiceBindingError;

/// Logical name given to a discovered service when none is declared.
pub const DEFAULT_QUALIFIER_NAME: &str = "default";

/// A service dependency detected from the application's declared dependencies.
///
/// # Examples
/// `postgresql:default`
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ServiceQualifier {
    /// Well-known service category such as `postgresql` or `mongodb`
    #[serde(rename = "type")]
    pub service_type: String,

    /// Logical instance label
    pub name: String,
}

impl ServiceQualifier {
    pub fn new<T: Into<String>, N: Into<String>>(service_type: T, name: N) -> Self {
        Self {
            service_type: service_type.into(),
            name: name.into(),
        }
    }

    /// Key used to look the qualifier up in the override table. Also the resource name used when
    /// no override supplies one.
    pub fn default_id(&self) -> String {
        format!("{}-{}", self.service_type, self.name)
    }
}

impl Display for ServiceQualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.service_type, self.name)
    }
}

impl FromStr for ServiceQualifier {
    type Err = ServiceBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (service_type, name) = match s.trim().split_once(':') {
            Some((service_type, name)) => (service_type.trim(), name.trim()),
            None => (s.trim(), DEFAULT_QUALIFIER_NAME),
        };

        if service_type.is_empty() || name.is_empty() {
            return Err(ServiceBindingError::InvalidQualifier(s.to_string()));
        }

        Ok(ServiceQualifier::new(service_type, name))
    }
}
