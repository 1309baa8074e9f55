use std::collections::BTreeMap;
use std::fmt::Formatter;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// User supplied values that take precedence over the registry and the computed defaults.
///
/// Every field is independently optional. A blank value is treated the same as an absent one.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OverrideRecord {
    #[serde(
        default,
        alias = "apiVersion",
        alias = "api-version",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// Name of the resource to bind to
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Name of the generated binding the credentials are exposed under
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub binding: Option<String>,
}

impl OverrideRecord {
    pub fn api_version(&self) -> Option<&str> {
        present(&self.api_version)
    }

    pub fn kind(&self) -> Option<&str> {
        present(&self.kind)
    }

    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub fn binding(&self) -> Option<&str> {
        present(&self.binding)
    }

    pub fn is_empty(&self) -> bool {
        self.api_version().is_none()
            && self.kind().is_none()
            && self.name().is_none()
            && self.binding().is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Environment providers type their values, so `NAME=12345` arrives as a number rather than a
// string. Scalars are accepted and kept as their textual form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalScalarVisitor)
}

struct OptionalScalarVisitor;

impl<'de> Visitor<'de> for OptionalScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a string, number, or boolean")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }
}

/// Override records keyed by identifier.
///
/// For discovered services the identifier is the qualifier's `{type}-{name}`, otherwise it is
/// whatever identifier the user chose for a manually declared service.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OverrideTable(BTreeMap<String, OverrideRecord>);

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&OverrideRecord> {
        self.0.get(id)
    }

    /// Identifiers in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, OverrideRecord)> for OverrideTable {
    fn from_iter<T: IntoIterator<Item = (S, OverrideRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, record)| (id.into(), record)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{OverrideRecord, OverrideTable};

    #[test]
    fn blank_values_should_be_absent() {
        let record = OverrideRecord {
            api_version: Some("".to_string()),
            kind: Some("  ".to_string()),
            name: Some("my-postgresql".to_string()),
            binding: None,
        };

        assert_eq!(None, record.api_version());
        assert_eq!(None, record.kind());
        assert_eq!(Some("my-postgresql"), record.name());
        assert!(!record.is_empty());
    }

    #[test]
    fn record_with_only_blank_values_is_empty() {
        let record = OverrideRecord {
            binding: Some(String::new()),
            ..Default::default()
        };
        assert!(record.is_empty());
        assert!(OverrideRecord::default().is_empty());
    }

    #[test]
    fn should_accept_api_version_spellings() {
        let table: OverrideTable = serde_json::from_str(
            r#"{
                "a": {"api_version": "foo/v1"},
                "b": {"apiVersion": "foo/v1"},
                "c": {"api-version": "foo/v1"}
            }"#,
        )
        .unwrap();

        for id in ["a", "b", "c"] {
            assert_eq!(Some("foo/v1"), table.get(id).unwrap().api_version());
        }
    }

    #[test]
    fn scalar_values_should_be_kept_as_text() {
        let table: OverrideTable = serde_json::from_str(
            r#"{"db": {"name": 12345, "binding": true, "kind": null}}"#,
        )
        .unwrap();

        let record = table.get("db").unwrap();
        assert_eq!(Some("12345"), record.name());
        assert_eq!(Some("true"), record.binding());
        assert_eq!(None, record.kind());
    }

    #[test]
    fn ids_should_be_sorted() {
        let table: OverrideTable = [
            ("postgresql-default", OverrideRecord::default()),
            ("my-mysql", OverrideRecord::default()),
        ]
        .into_iter()
        .collect();

        assert_eq!(2, table.len());
        assert_eq!(vec!["my-mysql", "postgresql-default"], table.ids().collect::<Vec<_>>());
    }
}
