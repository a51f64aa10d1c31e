use super::{escape, form, layout};
use crate::blog::User;
use crate::forms::{FormErrors, LoginForm, ProfileForm, SignupForm};
use crate::urls;
use axum::response::Html;

pub fn edit_profile(values: &ProfileForm, errors: &FormErrors, viewer: &User) -> Html<String> {
    let body = format!(
        "<h1>Edit profile</h1>\n<form method=\"post\" action=\"{}\">\n{}{}{}{}{}{}</form>\n",
        urls::EDIT_PROFILE,
        form::non_field_errors(errors),
        form::input("text", "first_name", "First name", &values.first_name, errors),
        form::input("text", "last_name", "Last name", &values.last_name, errors),
        form::input("text", "username", "Username", &values.username, errors),
        form::input(
            "email",
            "email",
            "Email address",
            values.email.as_deref().unwrap_or_default(),
            errors
        ),
        form::submit("Save"),
    );

    layout("Edit profile", Some(viewer), &body)
}

pub fn login(values: &LoginForm, errors: &FormErrors) -> Html<String> {
    let next = values
        .next
        .as_deref()
        .map(|next| {
            format!(
                "<input type=\"hidden\" name=\"next\" value=\"{}\">\n",
                escape(next)
            )
        })
        .unwrap_or_default();

    let body = format!(
        "<h1>Log in</h1>\n<form method=\"post\" action=\"{}\">\n{}{}{}{next}{}</form>\n\
         <p>No account yet? <a href=\"{}\">Sign up</a></p>\n",
        urls::LOGIN,
        form::non_field_errors(errors),
        form::input("text", "username", "Username", &values.username, errors),
        form::input("password", "password", "Password", "", errors),
        form::submit("Log in"),
        urls::REGISTRATION,
    );

    layout("Log in", None, &body)
}

pub fn registration(values: &SignupForm, errors: &FormErrors) -> Html<String> {
    let body = format!(
        "<h1>Sign up</h1>\n<form method=\"post\" action=\"{}\">\n{}{}{}{}{}</form>\n",
        urls::REGISTRATION,
        form::non_field_errors(errors),
        form::input("text", "username", "Username", &values.username, errors),
        form::input("password", "password1", "Password", "", errors),
        form::input("password", "password2", "Password confirmation", "", errors),
        form::submit("Sign up"),
    );

    layout("Sign up", None, &body)
}

pub fn logged_out() -> Html<String> {
    let body = format!(
        "<h1>Logged out</h1>\n<p>See you soon. <a href=\"{}\">Log in again</a></p>\n",
        urls::LOGIN
    );

    layout("Logged out", None, &body)
}
