use thiserror::Error;

pub mod overrides;
pub mod plan;
pub mod qualifier;
pub mod registry;
pub mod resolver;
pub mod settings;

pub use overrides::{OverrideRecord, OverrideTable};
pub use plan::{BindingPlan, UnresolvedDependency};
pub use qualifier::ServiceQualifier;
pub use registry::RegistryEntry;
pub use resolver::{resolve_from_id, resolve_from_qualifier, RequirementDescriptor, Resolution};
pub use settings::ServiceBindingSettings;

#[remain::sorted]
#[derive(Debug, Error)]
pub enum ServiceBindingError {
    /// Errors that may occur while merging or extracting settings providers.
    #[error("settings error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid service qualifier: `{0}`. Expected `type` or `type:name`")]
    InvalidQualifier(String),

    #[error("Settings file not found: {0}")]
    SettingsNotFound(String),

    #[error("Unknown service type: {0}")]
    UnknownServiceType(String),

    #[error("Unknown settings file extension: {0}. Settings must have an extension of json, yaml, or toml")]
    UnknownSettingsFormat(String),

    #[error("Unable to resolve service binding for: {}", .0.join(", "))]
    UnresolvedDependencies(Vec<String>),
}

impl From<figment::Error> for ServiceBindingError {
    fn from(e: figment::Error) -> Self {
        ServiceBindingError::Figment(Box::new(e))
    }
}

pub type ServiceBindingResult<T> = Result<T, ServiceBindingError>;
