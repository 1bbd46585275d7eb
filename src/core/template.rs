//! Message template parsing and positional substitution
//!
//! Templates carry `{Name}` and `{@Name}` placeholder tokens. Matching is
//! positional: the Nth placeholder found left-to-right consumes the Nth
//! parameter, regardless of its name. Formatting is all-or-nothing — an
//! arity mismatch aborts before any substitution happens.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::record::{sanitize_message, FormattedRecord};
use serde_json::Value;

/// Literal rendered for a null parameter value.
pub const NULL_SENTINEL: &str = "NULL";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    /// Full token text, braces and sigil included
    token: String,
    /// De-braced, de-sigiled name
    name: String,
    /// True for `{@Name}` tokens
    json: bool,
}

/// Try to parse a placeholder body starting right after an opening brace.
///
/// Returns the sigil flag, the name slice, and the number of bytes consumed
/// including the closing brace. Names are one or more alphanumeric chars
/// (`char::is_alphanumeric`, so accented Latin letters qualify); anything
/// else rejects the token.
fn parse_token(body: &str) -> Option<(bool, &str, usize)> {
    let mut iter = body.char_indices().peekable();

    let mut json = false;
    let mut name_start = 0;
    if let Some(&(_, '@')) = iter.peek() {
        json = true;
        name_start = 1;
        iter.next();
    }

    let mut name_end = name_start;
    while let Some(&(index, ch)) = iter.peek() {
        if ch.is_alphanumeric() {
            name_end = index + ch.len_utf8();
            iter.next();
        } else {
            break;
        }
    }

    if name_end == name_start {
        return None;
    }

    match iter.next() {
        Some((index, '}')) => Some((json, &body[name_start..name_end], index + 1)),
        _ => None,
    }
}

/// Scan a template left-to-right for placeholder tokens, in occurrence order.
fn scan_placeholders(template: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(open) = template[cursor..].find('{') {
        let start = cursor + open;
        match parse_token(&template[start + 1..]) {
            Some((json, name, consumed)) => {
                let end = start + 1 + consumed;
                found.push(Placeholder {
                    token: template[start..end].to_string(),
                    name: name.to_string(),
                    json,
                });
                cursor = end;
            }
            None => cursor = start + 1,
        }
    }

    found
}

/// Plain string conversion of a parameter value.
///
/// Strings render unquoted, numbers and bools via their display form, null
/// as the [`NULL_SENTINEL`] literal. Compound values get opaque markers —
/// JSON rendering is reserved for `{@Name}` tokens.
fn render_plain(value: &Value) -> String {
    match value {
        Value::Null => NULL_SENTINEL.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) => "[array]".to_string(),
        Value::Object(_) => "[object]".to_string(),
    }
}

fn render_value(value: &Value, as_json: bool) -> String {
    if as_json && (value.is_object() || value.is_array()) {
        serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
    } else {
        render_plain(value)
    }
}

/// Format a template with positional parameters into a [`FormattedRecord`].
///
/// Fails with [`LoggerError::TemplateArity`] when the placeholder count does
/// not equal `params.len()`. Substitution replaces the first remaining
/// occurrence of each exact token text per step, so repeated identical
/// placeholders consume repeated parameters in order. Properties are keyed
/// by placeholder name and hold the raw, un-stringified values; for a
/// duplicated name the last write wins.
pub fn format_template(
    level: LogLevel,
    template: &str,
    params: Vec<Value>,
) -> Result<FormattedRecord> {
    let placeholders = scan_placeholders(template);
    if placeholders.len() != params.len() {
        return Err(LoggerError::arity(
            placeholders.len(),
            params.len(),
            template,
        ));
    }

    let mut message = template.to_string();
    let mut record = FormattedRecord::new(level, template, "");

    for (placeholder, value) in placeholders.into_iter().zip(params) {
        let rendered = render_value(&value, placeholder.json);
        message = message.replacen(&placeholder.token, &rendered, 1);
        record.properties.insert(placeholder.name, value);
    }

    record.message = sanitize_message(&message);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_and_json_placeholders() {
        let record = format_template(
            LogLevel::Info,
            "Login by {Username} from {@Meta}",
            vec![json!("john"), json!({"ip": "10.0.0.1"})],
        )
        .unwrap();

        assert_eq!(record.message, r#"Login by john from {"ip":"10.0.0.1"}"#);
        assert_eq!(record.properties["Username"], json!("john"));
        assert_eq!(record.properties["Meta"], json!({"ip": "10.0.0.1"}));
    }

    #[test]
    fn test_arity_mismatch_fails_before_substitution() {
        let too_few = format_template(
            LogLevel::Error,
            "User {Name} logged in from {IP}",
            vec![json!("ann")],
        );
        assert!(matches!(
            too_few,
            Err(LoggerError::TemplateArity {
                placeholders: 2,
                params: 1,
                ..
            })
        ));

        let too_many = format_template(
            LogLevel::Error,
            "User {Name} logged in from {IP}",
            vec![json!("ann"), json!("10.0.0.1"), json!("extra")],
        );
        assert!(too_many.is_err());

        let exact = format_template(
            LogLevel::Error,
            "User {Name} logged in from {IP}",
            vec![json!("ann"), json!("10.0.0.1")],
        );
        assert!(exact.is_ok());
    }

    #[test]
    fn test_null_renders_sentinel() {
        let record =
            format_template(LogLevel::Warn, "value is {Thing}", vec![Value::Null]).unwrap();
        assert_eq!(record.message, "value is NULL");
        assert_eq!(record.properties["Thing"], Value::Null);
    }

    #[test]
    fn test_compound_without_sigil_is_not_json() {
        let record = format_template(
            LogLevel::Info,
            "got {Payload}",
            vec![json!({"a": 1})],
        )
        .unwrap();
        assert_eq!(record.message, "got [object]");

        let record =
            format_template(LogLevel::Info, "got {Items}", vec![json!([1, 2, 3])]).unwrap();
        assert_eq!(record.message, "got [array]");
    }

    #[test]
    fn test_sigil_on_scalar_falls_back_to_plain() {
        let record = format_template(LogLevel::Info, "n is {@N}", vec![json!(7)]).unwrap();
        assert_eq!(record.message, "n is 7");
    }

    #[test]
    fn test_repeated_placeholder_consumes_in_order() {
        let record = format_template(
            LogLevel::Info,
            "{Step} then {Step}",
            vec![json!("first"), json!("second")],
        )
        .unwrap();
        assert_eq!(record.message, "first then second");
        // Last write wins for the shared property name.
        assert_eq!(record.properties["Step"], json!("second"));
        assert_eq!(record.properties.len(), 1);
    }

    #[test]
    fn test_accented_names_are_placeholders() {
        let record =
            format_template(LogLevel::Info, "café: {Café}", vec![json!("open")]).unwrap();
        assert_eq!(record.message, "café: open");
        assert_eq!(record.properties["Café"], json!("open"));
    }

    #[test]
    fn test_malformed_tokens_are_literal_text() {
        // Empty name, unterminated token, and inner spaces are not
        // placeholders and take no parameters.
        let record = format_template(LogLevel::Info, "{} {not closed {a b}", vec![]).unwrap();
        assert_eq!(record.message, "{} {not closed {a b}");
        assert!(record.properties.is_empty());
    }

    #[test]
    fn test_template_kept_on_record() {
        let record =
            format_template(LogLevel::Debug, "hello {Who}", vec![json!("world")]).unwrap();
        assert_eq!(record.template, "hello {Who}");
        assert_eq!(record.message, "hello world");
    }

    #[test]
    fn test_injection_escaped_in_message() {
        let record = format_template(
            LogLevel::Info,
            "user said {Text}",
            vec![json!("hi\nERROR fake entry")],
        )
        .unwrap();
        assert_eq!(record.message, "user said hi\\nERROR fake entry");
        // The raw property value keeps the original text.
        assert_eq!(record.properties["Text"], json!("hi\nERROR fake entry"));
    }
}
