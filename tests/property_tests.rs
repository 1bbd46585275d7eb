//! Property-based tests for dispatch_logger using proptest

use dispatch_logger::core::{format_template, NULL_SENTINEL};
use dispatch_logger::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Critical),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering is consistent with the ordinal values
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
        prop_assert_eq!(level1 >= level2, val1 >= val2);
        prop_assert_eq!(level1 > level2, val1 > val2);
    }

    /// Test that is_permitted agrees with the ordering
    #[test]
    fn test_is_permitted_matches_ordering(level in any_level(), minimum in any_level()) {
        prop_assert_eq!(level.is_permitted(minimum), level >= minimum);
        // Reflexive: every level passes its own threshold.
        prop_assert!(level.is_permitted(level));
    }

    /// Test that LogLevel Display matches to_str
    #[test]
    fn test_log_level_display(level in any_level()) {
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Test that parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(use_lower in any::<bool>()) {
        let names = ["DEBUG", "INFO", "WARN", "WARNING", "ERROR", "CRITICAL", "FATAL"];

        for name in names {
            let input = if use_lower {
                name.to_lowercase()
            } else {
                name.to_string()
            };
            prop_assert!(input.parse::<LogLevel>().is_ok(), "Failed to parse: {}", input);
        }
    }
}

// ============================================================================
// Template Formatting Tests
// ============================================================================

proptest! {
    /// Test that a single placeholder substitutes its parameter and leaves
    /// no token text behind
    #[test]
    fn test_single_placeholder_substitution(
        level in any_level(),
        name in "[A-Za-z][A-Za-z0-9]{0,11}",
        value in "[a-z0-9 ]{0,20}",
    ) {
        let template = format!("before {{{}}} after", name);
        let record = format_template(level, &template, vec![json!(value)]).unwrap();

        prop_assert_eq!(&record.message, &format!("before {} after", value));
        let token = format!("{{{}}}", name);
        prop_assert!(!record.message.contains(&token));
        prop_assert_eq!(&record.properties[&name], &json!(value));
        prop_assert_eq!(&record.template, &template);
    }

    /// Test that an arity mismatch always fails and a matched arity succeeds
    #[test]
    fn test_arity_check_is_all_or_nothing(
        level in any_level(),
        name in "[A-Za-z][A-Za-z0-9]{0,11}",
        extra in 1usize..4,
    ) {
        let template = format!("value {{{}}}", name);

        let mut params = vec![json!("v")];
        for _ in 0..extra {
            params.push(json!("surplus"));
        }
        prop_assert!(format_template(level, &template, params).is_err());
        prop_assert!(format_template(level, &template, vec![]).is_err());
        prop_assert!(format_template(level, &template, vec![json!("v")]).is_ok());
    }

    /// Test that null parameters render the NULL sentinel while the raw
    /// property keeps the null value
    #[test]
    fn test_null_renders_sentinel(
        level in any_level(),
        name in "[A-Za-z][A-Za-z0-9]{0,11}",
    ) {
        let template = format!("got {{{}}}", name);
        let record = format_template(level, &template, vec![Value::Null]).unwrap();

        prop_assert_eq!(&record.message, &format!("got {}", NULL_SENTINEL));
        prop_assert_eq!(&record.properties[&name], &Value::Null);
    }

    /// Test that compound values without the sigil never leak JSON into
    /// the rendered message
    #[test]
    fn test_compound_without_sigil_is_opaque(
        level in any_level(),
        name in "[A-Za-z][A-Za-z0-9]{0,11}",
        key in "[a-z]{1,8}",
        n in any::<i32>(),
    ) {
        let template = format!("data {{{}}}", name);
        let record =
            format_template(level, &template, vec![json!({ key.clone(): n })]).unwrap();
        prop_assert_eq!(&record.message, "data [object]");
        prop_assert!(!record.message.contains(&key));
    }

    /// Test that templates with no placeholders pass through untouched
    /// with zero parameters
    #[test]
    fn test_plain_text_needs_no_params(level in any_level(), text in "[a-zA-Z0-9 .,!?]*") {
        let record = format_template(level, &text, vec![]).unwrap();
        prop_assert_eq!(&record.message, &text);
        prop_assert!(record.properties.is_empty());
    }
}

// ============================================================================
// Message Sanitization Tests
// ============================================================================

proptest! {
    /// Test that newlines are escaped in formatted messages (prevents log
    /// injection through parameter values)
    #[test]
    fn test_message_sanitization_newlines(value in ".*") {
        let record =
            format_template(LogLevel::Info, "said {Text}", vec![json!(value.clone())]).unwrap();

        prop_assert!(!record.message.contains('\n'),
            "message contains unsanitized newline: {:?}", record.message);
        if value.contains('\n') {
            prop_assert!(record.message.contains("\\n"));
        }
        // The raw property keeps the original text.
        prop_assert_eq!(&record.properties["Text"], &json!(value));
    }

    /// Test that carriage returns are escaped in formatted messages
    #[test]
    fn test_message_sanitization_carriage_returns(value in ".*") {
        let record =
            format_template(LogLevel::Info, "said {Text}", vec![json!(value)]).unwrap();

        prop_assert!(!record.message.contains('\r'),
            "message contains unsanitized carriage return: {:?}", record.message);
    }
}
