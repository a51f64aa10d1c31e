use crate::blog::Comment;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

pub mod post;
pub mod user;

pub use post::{ImageChange, ImageUpload, PostForm};
pub use user::{LoginForm, ProfileForm, SignupForm};

/// Key for errors that belong to the whole form rather than one field.
pub const NON_FIELD: &str = "__all__";

pub const REQUIRED: &str = "This field is required.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Per-field messages of a bound form that failed validation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn of(form: &impl Validate) -> Self {
        match form.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => errors.into(),
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<validator::ValidationErrors> for FormErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                };
                form_errors.add(&field, message);
            }
        }
        form_errors
    }
}

pub(crate) fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(REQUIRED.into());
        return Err(error);
    }
    Ok(())
}

/// Treats a blank text input as an absent value.
pub(crate) fn empty_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(custom(function = "required"))]
    pub text: String,
}

impl CommentForm {
    pub fn from_comment(comment: &Comment) -> Self {
        CommentForm {
            text: comment.text.clone(),
        }
    }

    /// The comment text, trimmed.
    pub fn clean(&self) -> Result<String, FormErrors> {
        FormErrors::of(self).into_result(self.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_required() {
        let form = CommentForm {
            text: "  \n ".to_string(),
        };

        let errors = form.clean().unwrap_err();
        assert_eq!(errors.field("text"), [REQUIRED.to_string()]);
        assert!(errors.field("other").is_empty());
    }

    #[test]
    fn comment_text_is_trimmed() {
        let form = CommentForm {
            text: "  nice post \n".to_string(),
        };

        assert_eq!(form.clean().unwrap(), "nice post");
    }

    #[test]
    fn manual_errors_accumulate() {
        let mut errors = FormErrors::default();
        assert!(errors.clone().into_result(()).is_ok());

        errors.add(NON_FIELD, "first");
        errors.add(NON_FIELD, "second");
        assert_eq!(errors.field(NON_FIELD).len(), 2);
        assert!(errors.into_result(()).is_err());
    }
}
