use std::collections::HashMap;
use std::fmt::Display;

use anyhow::Result;
use lazy_static::lazy_static;
use serde::Serialize;

lazy_static! {
    static ref OUTPUT_TYPES: HashMap<&'static str, Output> = {
        let mut map = HashMap::new();
        map.insert("json", Output::Json);
        map.insert("text", Output::Text);
        map
    };
}

#[remain::sorted]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum Output {
    /// JSON is the default output format of svcbind.
    #[default]
    Json,

    /// One tab-delimited line per item.
    /// Works well with traditional Unix text tools such as grep, sed, and awk.
    Text,
}

pub(crate) fn parse_output(src: &str) -> Result<Output, String> {
    match OUTPUT_TYPES.get(src) {
        Some(output) => Ok(*output),
        None => {
            let mut supported: Vec<&&str> = OUTPUT_TYPES.keys().collect();
            supported.sort();
            Err(format!(
                "Unsupported value: \"{}\". Supported values: {:?}",
                src, supported
            ))
        }
    }
}

pub(crate) fn render<A: Display + Serialize>(output: Output, value: &A) -> Result<String> {
    match output {
        Output::Json => Ok(serde_json::to_string_pretty(value)?),
        Output::Text => Ok(value.to_string()),
    }
}

pub(crate) fn render_all<A: Display + Serialize>(output: Output, values: &[A]) -> Result<String> {
    match output {
        Output::Json => Ok(serde_json::to_string_pretty(values)?),
        Output::Text => Ok(values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_output, Output};

    #[test]
    fn should_parse_supported_outputs() {
        assert_eq!(Ok(Output::Json), parse_output("json"));
        assert_eq!(Ok(Output::Text), parse_output("text"));
    }

    #[test]
    fn unsupported_output_should_list_supported_values() {
        let err = parse_output("table").unwrap_err();
        assert_eq!(
            "Unsupported value: \"table\". Supported values: [\"json\", \"text\"]",
            err
        );
    }
}
