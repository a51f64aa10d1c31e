use super::escape;
use crate::forms::{FormErrors, NON_FIELD};
use std::fmt::Write;

pub fn errors(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class=\"errorlist\">");
    for message in messages {
        let _ = write!(html, "<li>{}</li>", escape(message));
    }
    html.push_str("</ul>\n");
    html
}

pub fn non_field_errors(form_errors: &FormErrors) -> String {
    errors(form_errors.field(NON_FIELD))
}

/// `<input>` of the given type with its label and any field errors.
pub fn input(
    kind: &str,
    name: &str,
    label: &str,
    value: &str,
    form_errors: &FormErrors,
) -> String {
    format!(
        "<p><label for=\"id_{name}\">{}</label>\n{}<input type=\"{kind}\" name=\"{name}\" \
         id=\"id_{name}\" value=\"{}\"></p>\n",
        escape(label),
        errors(form_errors.field(name)),
        escape(value),
    )
}

pub fn textarea(name: &str, label: &str, value: &str, form_errors: &FormErrors) -> String {
    format!(
        "<p><label for=\"id_{name}\">{}</label>\n{}<textarea name=\"{name}\" id=\"id_{name}\" \
         rows=\"10\">{}</textarea></p>\n",
        escape(label),
        errors(form_errors.field(name)),
        escape(value),
    )
}

pub fn checkbox(name: &str, label: &str, checked: bool, form_errors: &FormErrors) -> String {
    format!(
        "<p>{}<label><input type=\"checkbox\" name=\"{name}\"{}> {}</label></p>\n",
        errors(form_errors.field(name)),
        if checked { " checked" } else { "" },
        escape(label),
    )
}

/// `<select>` over `(value, label)` pairs. An empty first option stands for
/// "none chosen".
pub fn select(
    name: &str,
    label: &str,
    options: &[(String, String)],
    selected: &str,
    form_errors: &FormErrors,
) -> String {
    let mut html = format!(
        "<p><label for=\"id_{name}\">{}</label>\n{}<select name=\"{name}\" id=\"id_{name}\">\n\
         <option value=\"\">---------</option>\n",
        escape(label),
        errors(form_errors.field(name)),
    );
    for (value, option_label) in options {
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(value),
            if value == selected { " selected" } else { "" },
            escape(option_label),
        );
    }
    html.push_str("</select></p>\n");
    html
}

pub fn submit(label: &str) -> String {
    format!("<button type=\"submit\">{}</button>\n", escape(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_show_value_and_errors() {
        let mut form_errors = FormErrors::default();
        form_errors.add("title", "Too <long>");

        let html = input("text", "title", "Title", "a \"quoted\" title", &form_errors);
        assert!(html.contains("value=\"a &quot;quoted&quot; title\""));
        assert!(html.contains("<li>Too &lt;long&gt;</li>"));
    }

    #[test]
    fn select_marks_the_chosen_option() {
        let options = [
            ("1".to_string(), "Travel".to_string()),
            ("2".to_string(), "Food".to_string()),
        ];

        let html = select("category", "Category", &options, "2", &FormErrors::default());
        assert!(html.contains("<option value=\"2\" selected>Food</option>"));
        assert!(html.contains("<option value=\"1\">Travel</option>"));
        assert!(!html.contains("errorlist"));
    }
}
