//! Output formatting
//!
//! JSON results go to stdout so they can be piped; everything else goes to
//! stderr.

use serde::Serialize;

use super::CliError;

/// Formats `value` as JSON, pretty-printed unless `raw` is set.
pub fn format_output<T: Serialize + ?Sized>(
    value: &T,
    raw: bool,
) -> Result<String, serde_json::Error> {
    if raw {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

/// Prints `value` to stdout.
pub fn echo_output<T: Serialize + ?Sized>(value: &T, raw: bool) -> Result<(), CliError> {
    println!("{}", format_output(value, raw)?);
    Ok(())
}

/// Prints an informational message to stderr.
pub fn echo_info(message: &str) {
    eprintln!("{message}");
}

/// Prints a success message to stderr.
pub fn echo_success(message: &str) {
    eprintln!("{message}");
}

/// Prints a warning to stderr.
pub fn echo_warning(message: &str) {
    eprintln!("warning: {message}");
}

/// Prints an error to stderr.
pub fn echo_error(message: &str) {
    eprintln!("error: {message}");
}

/// Prints a boxed block of follow-up hints to stderr.
pub fn echo_hints(title: &str, lines: &[String]) {
    let rule = "=".repeat(60);
    eprintln!("\n{rule}");
    eprintln!("{title}");
    for line in lines {
        eprintln!("  {line}");
    }
    eprintln!("{rule}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_output_is_single_line() {
        let output = format_output(&json!({"a": 1, "b": [1, 2]}), true).unwrap();
        assert_eq!(output, r#"{"a":1,"b":[1,2]}"#);
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let output = format_output(&json!({"a": 1}), false).unwrap();
        assert_eq!(output, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let output = format_output(&json!({"name": "手机"}), true).unwrap();
        assert!(output.contains("手机"));
    }
}
