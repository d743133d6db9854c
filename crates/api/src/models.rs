use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use services::{DetailLevel, InputMode, Language, ProcessRequest};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Body of `POST /api/process`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessApiRequest {
    /// Text or code to work on. Must not be blank.
    pub input: String,
    /// Defaults to `auto`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<InputMode>,
    /// Defaults to `medium`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailLevel>,
    /// Defaults to `en`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// Validation failures, split into whole-body and per-field messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: ValidationErrors) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse an optional enum field, recording a field error when it is present but invalid.
/// An absent field takes the default; `null` is a type error like any other non-string.
fn parse_enum_field<T: DeserializeOwned + Default>(
    body: &serde_json::Map<String, Value>,
    field: &str,
    allowed: &[&str],
    errors: &mut ValidationErrors,
) -> T {
    let expected = allowed
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(" | ");

    match body.get(field) {
        None => T::default(),
        Some(Value::String(raw)) => match serde_json::from_value(Value::String(raw.clone())) {
            Ok(value) => value,
            Err(_) => {
                errors.add_field(
                    field,
                    format!("Invalid enum value. Expected {expected}, received '{raw}'"),
                );
                T::default()
            }
        },
        Some(other) => {
            errors.add_field(
                field,
                format!(
                    "Expected {expected}, received {}",
                    json_type_name(other)
                ),
            );
            T::default()
        }
    }
}

/// Validate a raw JSON body into a [`ProcessRequest`].
///
/// Every field is checked so the caller gets all problems at once.
/// Unknown fields are ignored.
pub fn validate_process_request(body: &Value) -> Result<ProcessRequest, ValidationErrors> {
    let Value::Object(body) = body else {
        return Err(ValidationErrors::form(format!(
            "Expected object, received {}",
            json_type_name(body)
        )));
    };

    let mut errors = ValidationErrors::default();

    let input = match body.get("input") {
        None => {
            errors.add_field("input", "Required");
            String::new()
        }
        Some(Value::String(input)) if input.trim().is_empty() => {
            errors.add_field("input", "input is required");
            String::new()
        }
        Some(Value::String(input)) => input.clone(),
        Some(other) => {
            errors.add_field(
                "input",
                format!("Expected string, received {}", json_type_name(other)),
            );
            String::new()
        }
    };

    let mode: InputMode = parse_enum_field(body, "mode", &["auto", "text", "code"], &mut errors);
    let detail: DetailLevel =
        parse_enum_field(body, "detail", &["short", "medium", "detailed"], &mut errors);
    let language: Language = parse_enum_field(body, "language", &["en", "fa"], &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProcessRequest {
        input,
        mode,
        detail,
        language,
    })
}
