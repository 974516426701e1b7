//! The language resource loaded for a session.

use crate::error::PayloadError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// How the body of a language file is interpreted.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// A JSON object mapping keys to strings.
    #[default]
    Json,
    /// Raw text kept as a single opaque value.
    #[serde(rename = "txt", alias = "text")]
    Text,
}

impl PayloadFormat {
    /// The file extension used when requesting a resource in this format.
    pub fn extension(self) -> &'static str {
        match self {
            PayloadFormat::Json => "json",
            PayloadFormat::Text => "txt",
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A parsed language file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    /// Key/value table from a JSON language file.
    Table(HashMap<String, String>),
    /// Verbatim contents of a text language file.
    Text(String),
}

impl Payload {
    /// Parses a response body according to `format`.
    ///
    /// JSON numbers and booleans are kept as their JSON text and `null`
    /// entries are skipped. Nested arrays or objects are rejected.
    pub fn parse(format: PayloadFormat, body: &str) -> Result<Self, PayloadError> {
        match format {
            PayloadFormat::Text => Ok(Payload::Text(body.to_string())),
            PayloadFormat::Json => {
                let object = match serde_json::from_str::<Value>(body)? {
                    Value::Object(object) => object,
                    other => {
                        return Err(PayloadError::NotAnObject {
                            found: json_type_name(&other),
                        });
                    },
                };

                let mut table = HashMap::with_capacity(object.len());
                for (key, value) in object {
                    let value = match value {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        Value::Null => continue,
                        Value::Array(_) | Value::Object(_) => {
                            return Err(PayloadError::NestedValue { key });
                        },
                    };
                    table.insert(key, value);
                }
                Ok(Payload::Table(table))
            },
        }
    }

    /// Looks up a key. Text payloads have no keys.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Payload::Table(table) => table.get(key).map(String::as_str),
            Payload::Text(_) => None,
        }
    }

    /// The raw text of a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Table(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Table(table) => table.len(),
            Payload::Text(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Table(table) => table.is_empty(),
            Payload::Text(text) => text.is_empty(),
        }
    }
}

impl From<HashMap<String, String>> for Payload {
    fn from(table: HashMap<String, String>) -> Self {
        Payload::Table(table)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Payload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        Payload::Table(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_table() {
        let payload = Payload::parse(
            PayloadFormat::Json,
            r#"{"greet": "Hi %s!", "count": 3, "flag": true, "gone": null}"#,
        )
        .unwrap();

        assert_eq!(payload.get("greet"), Some("Hi %s!"));
        assert_eq!(payload.get("count"), Some("3"));
        assert_eq!(payload.get("flag"), Some("true"));
        assert_eq!(payload.get("gone"), None);
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn parse_json_rejects_malformed_body() {
        let result = Payload::parse(PayloadFormat::Json, "{not json");
        assert!(matches!(result, Err(PayloadError::Json(_))));
    }

    #[test]
    fn parse_json_rejects_non_object() {
        let result = Payload::parse(PayloadFormat::Json, r#"["a", "b"]"#);
        assert!(matches!(
            result,
            Err(PayloadError::NotAnObject { found: "an array" })
        ));
    }

    #[test]
    fn parse_json_rejects_nested_values() {
        let result = Payload::parse(PayloadFormat::Json, r#"{"menu": {"open": "Open"}}"#);
        assert!(matches!(
            result,
            Err(PayloadError::NestedValue { key }) if key == "menu"
        ));
    }

    #[test]
    fn parse_text_is_verbatim() {
        let payload = Payload::parse(PayloadFormat::Text, "{not json").unwrap();
        assert_eq!(payload.as_text(), Some("{not json"));
        assert_eq!(payload.get("anything"), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(PayloadFormat::Json.extension(), "json");
        assert_eq!(PayloadFormat::Text.extension(), "txt");
        assert_eq!(PayloadFormat::default(), PayloadFormat::Json);
    }
}
