use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use convert_case::{Case, Casing};
use http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A single rejected field of a request body
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FieldViolation {
    /// camelCase name of the field, as sent on the request body
    #[schema(example = "codigoSerial")]
    pub field: String,

    /// machine readable code of the violated rule
    #[schema(example = "MaxLength")]
    pub code: String,

    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        FieldViolation {
            field: field.to_case(Case::Camel),
            code: code.to_owned(),
            message: message.into(),
        }
    }
}

/// A struct for simple API error responses, contains a timestamp from the moment
/// of its creation, a error message and, for rejected request bodies, the list of
/// fields that failed validation
///
/// its meant to be sent as JSON so its `IntoResponse` implementation will set the
/// response body to JSON
#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimpleError {
    error: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<FieldViolation>,
}

impl SimpleError {
    /// Creates a simple error with a generic 'internal server error message'
    /// ideally this should be used whenever something that should almost never
    /// fail on the request lifecycle does fail.
    pub fn internal() -> SimpleError {
        SimpleError::from("internal server error")
    }

    pub fn with_violations(error: &str, violations: Vec<FieldViolation>) -> SimpleError {
        SimpleError {
            violations,
            ..SimpleError::from(error)
        }
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl From<String> for SimpleError {
    fn from(v: String) -> Self {
        SimpleError {
            error: v,
            timestamp: Utc::now(),
            violations: vec![],
        }
    }
}

impl From<&str> for SimpleError {
    fn from(v: &str) -> Self {
        SimpleError::from(String::from(v))
    }
}

impl IntoResponse for SimpleError {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl From<ValidationErrors> for SimpleError {
    fn from(v: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = v
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} failed the {} rule", field, e.code));

                    FieldViolation::new(field, &e.code, message)
                })
            })
            .collect();

        violations.sort_by(|a, b| a.field.cmp(&b.field));

        SimpleError::with_violations("request body validation failed", violations)
    }
}

impl From<anyhow::Error> for SimpleError {
    /// since anyhow errors might contain private error messages such as DB errors
    /// or a stack description, always convert to a generic internal error
    fn from(_: anyhow::Error) -> Self {
        SimpleError::internal()
    }
}

pub fn internal_error_res() -> (StatusCode, SimpleError) {
    (StatusCode::INTERNAL_SERVER_ERROR, SimpleError::internal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn violations_use_camel_case_field_names() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("MustBePositive");
        err.message = Some("idPatio must be greater than zero".into());
        errors.add("id_patio", err);

        let simple = SimpleError::from(errors);

        assert_eq!(
            simple.violations(),
            &[FieldViolation {
                field: String::from("idPatio"),
                code: String::from("MustBePositive"),
                message: String::from("idPatio must be greater than zero"),
            }]
        );
    }

    #[test]
    fn violations_are_omitted_from_json_when_empty() {
        let json = serde_json::to_value(SimpleError::from("carrapato not found")).unwrap();

        assert_eq!(json["error"], "carrapato not found");
        assert!(json.get("timestamp").is_some());
        assert!(json.get("violations").is_none());
    }

    #[test]
    fn anyhow_errors_never_leak_their_message() {
        let simple = SimpleError::from(anyhow::anyhow!("password authentication failed"));
        assert_eq!(simple.error(), "internal server error");
    }
}
