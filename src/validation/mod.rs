use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

/// Longest title the `posts.title` column accepts
pub const TITLE_MAX_CHARS: usize = 255;

const TITLE_REQUIRED: &str = "The title field is required.";

/// Raw write payload as received. `title` stays untyped so that a non-string
/// value becomes a field error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: Option<Value>,
}

impl PostPayload {
    /// Build from an arbitrary JSON document; anything but an object carries no fields
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                title: map.remove("title"),
            },
            _ => Self::default(),
        }
    }
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ValidPost {
    #[validate(
        custom(function = "storable_title"),
        length(max = 255, message = "The title may not be greater than 255 characters.")
    )]
    pub title: String,
}

/// Blank titles count as missing; NUL cannot be stored in a PostgreSQL text column
fn storable_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(field_error("required", TITLE_REQUIRED));
    }
    if title.contains('\0') {
        return Err(field_error(
            "null_character",
            "The title may not contain null characters.",
        ));
    }
    Ok(())
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validation failures keyed by input field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// First message overall, used as the summary line of a 422 response
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().flatten().next().map(String::as_str)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid ({}).", field, failure.code));
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

/// Check a create/update payload. The title is kept exactly as submitted.
pub fn validate_post(payload: &PostPayload) -> Result<ValidPost, FieldErrors> {
    let title = match &payload.title {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => return Err(FieldErrors::single("title", TITLE_REQUIRED)),
        Some(_) => return Err(FieldErrors::single("title", "The title must be a string.")),
    };

    let post = ValidPost { title };
    post.validate()?;
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> PostPayload {
        PostPayload::from_value(v)
    }

    #[test]
    fn accepts_non_empty_title() {
        let valid = validate_post(&payload(json!({ "title": "Post de Prueba" }))).unwrap();
        assert_eq!(valid.title, "Post de Prueba");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let valid = validate_post(&payload(json!({ "title": "  spaced  " }))).unwrap();
        assert_eq!(valid.title, "  spaced  ");
    }

    #[test]
    fn rejects_empty_and_blank_titles() {
        for title in ["", "   ", "\t\n"] {
            let errors = validate_post(&payload(json!({ "title": title }))).unwrap_err();
            assert!(errors.contains("title"), "expected title error for {:?}", title);
        }
    }

    #[test]
    fn rejects_missing_or_null_title() {
        assert!(validate_post(&payload(json!({}))).unwrap_err().contains("title"));
        assert!(validate_post(&payload(json!({ "title": null }))).unwrap_err().contains("title"));
        assert!(validate_post(&PostPayload::default()).unwrap_err().contains("title"));
    }

    #[test]
    fn rejects_non_string_title() {
        let errors = validate_post(&payload(json!({ "title": 42 }))).unwrap_err();
        assert_eq!(errors.first_message(), Some("The title must be a string."));
    }

    #[test]
    fn enforces_max_length_in_characters() {
        let at_limit = "ñ".repeat(TITLE_MAX_CHARS);
        assert!(validate_post(&payload(json!({ "title": at_limit }))).is_ok());

        let over = "a".repeat(TITLE_MAX_CHARS + 1);
        assert!(validate_post(&payload(json!({ "title": over }))).is_err());
    }

    #[test]
    fn rejects_null_characters() {
        let errors = validate_post(&payload(json!({ "title": "a\u{0}b" }))).unwrap_err();
        assert_eq!(
            errors.first_message(),
            Some("The title may not contain null characters.")
        );
    }

    #[test]
    fn blank_title_reports_required_message() {
        let errors = validate_post(&payload(json!({ "title": "  " }))).unwrap_err();
        assert_eq!(errors.first_message(), Some("The title field is required."));
    }

    #[test]
    fn overlong_title_reports_length_message() {
        let errors = validate_post(&payload(json!({ "title": "a".repeat(300) }))).unwrap_err();
        assert_eq!(
            errors.first_message(),
            Some("The title may not be greater than 255 characters.")
        );
    }

    #[test]
    fn non_object_documents_have_no_title() {
        let errors = validate_post(&payload(json!(["title"]))).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn field_errors_serialize_as_map_of_lists() {
        let mut errors = FieldErrors::new();
        errors.add("title", "The title field is required.");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "title": ["The title field is required."] })
        );
    }
}
