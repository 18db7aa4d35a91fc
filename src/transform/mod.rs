// transform/mod.rs - Email provider enrichment for tabular records
//
// Input is accepted in row form (`[{..}, {..}]`) or column form
// (`{"Email": [..], "Name": [..]}`). Every record gets an `Email Provider`
// field; existing fields are left untouched.

use serde_json::{Map, Value};
use thiserror::Error;

/// One data row: field name -> value, insertion order preserved
pub type Record = Map<String, Value>;

pub const EMAIL_FIELD: &str = "Email";
pub const PROVIDER_FIELD: &str = "Email Provider";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Unsupported payload shape: expected {0}")]
    UnsupportedShape(&'static str),

    #[error("Element {index} is not an object")]
    NotARecord { index: usize },

    #[error("Column '{column}' has {found} values, expected {expected}")]
    RaggedColumns { column: String, expected: usize, found: usize },

    #[error("Field '{}' not present in any record", EMAIL_FIELD)]
    MissingEmailField,
}

/// Result of reading the provider out of an `Email` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailProvider {
    /// Everything after the single `@`
    Domain(String),
    /// Missing, non-string, or not exactly one `@`
    Unparseable,
}

impl EmailProvider {
    pub fn into_value(self) -> Value {
        match self {
            EmailProvider::Domain(domain) => Value::String(domain),
            EmailProvider::Unparseable => Value::String(String::new()),
        }
    }
}

pub fn parse_email_provider(value: Option<&Value>) -> EmailProvider {
    let Some(Value::String(email)) = value else {
        return EmailProvider::Unparseable;
    };

    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_local), Some(domain), None) => EmailProvider::Domain(domain.to_string()),
        _ => EmailProvider::Unparseable,
    }
}

/// Convert a decoded body into records
pub fn records_from_value(value: Value) -> Result<Vec<Record>, TransformError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                _ => Err(TransformError::NotARecord { index }),
            })
            .collect(),
        Value::Object(columns) => records_from_columns(columns),
        _ => Err(TransformError::UnsupportedShape("an array of objects or an object of columns")),
    }
}

fn records_from_columns(columns: Map<String, Value>) -> Result<Vec<Record>, TransformError> {
    let mut expected: Option<usize> = None;
    let mut arrays = Vec::with_capacity(columns.len());

    for (name, column) in columns {
        let Value::Array(values) = column else {
            return Err(TransformError::UnsupportedShape("every column to be an array"));
        };
        match expected {
            Some(len) if len != values.len() => {
                return Err(TransformError::RaggedColumns {
                    column: name,
                    expected: len,
                    found: values.len(),
                });
            }
            _ => expected = Some(values.len()),
        }
        arrays.push((name, values));
    }

    let rows = expected.unwrap_or(0);
    let mut records: Vec<Record> = (0..rows).map(|_| Record::new()).collect();
    for (name, values) in arrays {
        for (record, value) in records.iter_mut().zip(values) {
            record.insert(name.clone(), value);
        }
    }
    Ok(records)
}

/// Set `Email Provider` on every record, overwriting any previous value
pub fn enrich_records(mut records: Vec<Record>) -> Vec<Record> {
    for record in records.iter_mut() {
        let provider = parse_email_provider(record.get(EMAIL_FIELD));
        record.insert(PROVIDER_FIELD.to_string(), provider.into_value());
    }
    records
}

/// Full request pipeline: JSON bytes -> enriched records
pub fn transform_payload(body: &[u8]) -> Result<Vec<Record>, TransformError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| TransformError::InvalidJson(e.to_string()))?;
    let records = records_from_value(value)?;

    // An empty record set has no Email column either
    if !records.iter().any(|r| r.contains_key(EMAIL_FIELD)) {
        return Err(TransformError::MissingEmailField);
    }

    Ok(enrich_records(records))
}
