use std::path::Path;

use figment::providers::{Env, Format, Json, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::overrides::OverrideTable;
use crate::{ServiceBindingError, ServiceBindingResult};

pub const DEFAULT_CONFIG_NAME: &str = "service-binding.toml";

/// Prefix of environment variables layered over the settings file.
///
/// # Examples
/// `SVCBIND_SERVICES__MY_DB__API_VERSION=foo/v1`
pub const ENV_PREFIX: &str = "SVCBIND_";

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ServiceBindingSettings {
    /// Overrides keyed by `{type}-{name}` for discovered services or by a user chosen id for
    /// manually declared ones
    #[serde(default)]
    pub services: OverrideTable,
}

impl ServiceBindingSettings {
    /// Loads settings from the file at `path` with environment variables layered on top
    pub fn from_path<P: AsRef<Path>>(path: P) -> ServiceBindingResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ServiceBindingError::SettingsNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Figment::from(Toml::file(path)),
            Some("yaml") | Some("yml") => Figment::from(Yaml::file(path)),
            Some("json") => Figment::from(Json::file(path)),
            extension => {
                return Err(ServiceBindingError::UnknownSettingsFormat(
                    extension.unwrap_or_default().to_string(),
                ))
            }
        };

        debug!(path = %path.display(), "loading service binding settings");
        Self::extract(figment)
    }

    pub fn from_path_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_path(&path).unwrap_or_else(|e| {
            warn!(
                path = %path.as_ref().display(),
                "unable to load service binding settings, using defaults: {e}"
            );
            Self::default()
        })
    }

    /// Settings made only of environment variables
    pub fn from_env() -> ServiceBindingResult<Self> {
        Self::extract(Figment::new())
    }

    fn extract(figment: Figment) -> ServiceBindingResult<Self> {
        Ok(figment.merge(env_provider()).extract()?)
    }
}

// Identifiers are kebab-case so single underscores become dashes and double underscores nest.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| {
        key.as_str()
            .to_lowercase()
            .replace("__", ".")
            .replace('_', "-")
            .into()
    })
}
