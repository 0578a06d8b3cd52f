use crate::models::TelemetryExceptionDetails;

/// Builds exception details from a stack trace without parsing frames.
///
/// The first line is split at its first `:` into type name and message; a
/// missing or empty message falls back to the type name. The whole input is
/// kept as the stack.
pub fn minimal_parse(stack: &str) -> Vec<TelemetryExceptionDetails> {
    let first_line = stack.lines().next().unwrap_or_default();
    let (type_name, message) = match first_line.split_once(':') {
        Some((type_name, message)) => (type_name, message.trim()),
        None => (first_line, ""),
    };
    let message = if message.is_empty() { type_name } else { message };

    vec![TelemetryExceptionDetails::builder()
        .type_name(type_name)
        .message(message)
        .stack(stack)
        .build()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A: B\n  at x", "A", "B")]
    #[case("java.lang.IllegalStateException: boom\r\n\tat Foo.bar(Foo.java:1)", "java.lang.IllegalStateException", "boom")]
    #[case("NoColonHere", "NoColonHere", "NoColonHere")]
    #[case("Error:   ", "Error", "Error")]
    #[case("Err: a: b", "Err", "a: b")]
    #[case("", "", "")]
    fn first_line_split(#[case] stack: &str, #[case] type_name: &str, #[case] message: &str) {
        let details = minimal_parse(stack);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].type_name, type_name);
        assert_eq!(details[0].message, message);
        assert_eq!(details[0].stack.as_deref(), Some(stack));
    }
}
