//! Double-Quote Stripping
//!
//! When a substitution's replacement text is itself double-quoted
//! (`name = "literal text"`), the quotes are stripped once, on the first
//! substitution, so the quoting only suppresses the engine's own parameter
//! lookup and does not propagate into the output.

/// Strip a single pair of leading/trailing double quotes from `text`, if
/// present. Unlike single quotes (which mark an expression to evaluate),
/// double quotes here only ever get stripped, never re-added.
pub fn strip_double_quotes(text: &str) -> &str {
    if let Some(inner) = text.strip_prefix('"') {
        inner.strip_suffix('"').unwrap_or(inner)
    } else {
        text
    }
}
