use super::{empty_as_none, required, FormErrors, NON_FIELD};
use crate::blog::User;
use serde::Deserialize;
use validator::{Validate, ValidationError};

fn valid_username(username: &str) -> Result<(), ValidationError> {
    static USERNAME_PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    required(username)?;

    let username_pattern = USERNAME_PATTERN.get_or_init(|| {
        regex::Regex::new(r"^[\w.@+-]+$").expect("constant pattern should parse")
    });
    if !username_pattern.is_match(username) {
        let mut error = ValidationError::new("invalid_username");
        error.message = Some(
            "Enter a valid username. This value may contain only letters, numbers, \
             and @/./+/-/_ characters."
                .into(),
        );
        return Err(error);
    }

    Ok(())
}

fn valid_password(password: &str) -> Result<(), ValidationError> {
    required(password)?;

    let message = if password.chars().count() < 8 {
        "This password is too short. It must contain at least 8 characters."
    } else if password.chars().all(|c| c.is_ascii_digit()) {
        "This password is entirely numeric."
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("weak_password");
    error.message = Some(message.into());
    Err(error)
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileForm {
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
    #[validate(
        custom(function = "valid_username"),
        length(max = 150, message = "Ensure this value has at most 150 characters.")
    )]
    pub username: String,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        ProfileForm {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }

    /// `user` with the submitted fields applied. Username uniqueness is the
    /// caller's business since it needs the store.
    pub fn clean(&self, user: User) -> Result<User, FormErrors> {
        let trimmed = ProfileForm {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.clone(),
        };

        FormErrors::of(&trimmed).into_result(User {
            first_name: trimmed.first_name,
            last_name: trimmed.last_name,
            username: trimmed.username,
            email: trimmed.email,
            ..user
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    #[validate(
        custom(function = "valid_username"),
        length(max = 150, message = "Ensure this value has at most 150 characters.")
    )]
    pub username: String,
    #[validate(custom(function = "valid_password"))]
    pub password1: String,
    #[validate(custom(function = "required"))]
    pub password2: String,
}

impl SignupForm {
    /// The username and password to register.
    pub fn clean(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::of(self);
        if !self.password2.is_empty() && self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn’t match.");
        }

        errors.into_result((self.username.trim().to_string(), self.password1.clone()))
    }
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(custom(function = "required"))]
    pub username: String,
    #[validate(custom(function = "required"))]
    pub password: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn clean(&self) -> Result<(), FormErrors> {
        FormErrors::of(self).into_result(())
    }

    pub fn invalid_credentials() -> FormErrors {
        let mut errors = FormErrors::default();
        errors.add(
            NON_FIELD,
            "Please enter a correct username and password. Note that both fields may be \
             case-sensitive.",
        );
        errors
    }
}
