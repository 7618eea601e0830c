//! Function-Macro Definition Detector
//!
//! A `.param`/`.subckt` LHS of the form `name(arg,...)` defines a macro
//! rather than an ordinary parameter. `detect_function` recognizes that
//! shape, counts and validates the argument list, and normalizes the name
//! to `base(N)` the way the rest of the table expects (`ParamRecord`'s
//! `numargs` distinguishes macros from plain parameters by exactly this
//! normalized form).

/// Characters, besides alphabetics, allowed to start an argument token.
const ARG_LEAD_CHARS: &str = "_#@$";

/// Count the comma-separated argument tokens in `args_text` (which must
/// start, after skipping whitespace, with the opening `(`). Empty
/// parentheses (aside from whitespace) count as zero arguments. Returns
/// `None` on a malformed list (an argument token starting with something
/// other than a letter or one of `ARG_LEAD_CHARS`).
fn count_args(args_text: &str) -> Option<i32> {
    let chars: Vec<char> = args_text.chars().collect();
    let mut i = 0;
    while i < chars.len() && (chars[i] == '(' || chars[i].is_whitespace()) {
        i += 1;
    }
    if i < chars.len() && chars[i] == ')' {
        return Some(0);
    }
    let mut n = 0;
    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i < chars.len() && (chars[i].is_alphabetic() || ARG_LEAD_CHARS.contains(chars[i])) {
            n += 1;
        } else {
            return None;
        }
        while i < chars.len() && chars[i] != ',' && chars[i] != ')' {
            i += 1;
        }
        if i >= chars.len() || chars[i] == ')' {
            break;
        }
        i += 1;
    }
    Some(n)
}

/// If `name` is a macro definition of the form `name(arg,...)`, return
/// `(normalized_name, args_text, argcount)`, where `normalized_name` is
/// `base(argcount)` and `args_text` is the raw `(arg,...)` substring
/// (parentheses included). Returns `None` for an ordinary parameter name
/// or a malformed argument list.
pub fn detect_function(name: &str) -> Option<(String, String, i32)> {
    let open = name.find('(')?;
    let close = name.rfind(')')?;
    if close < open {
        return None;
    }
    // The close paren must be at the end, or followed only by whitespace.
    if name[close + 1..].chars().any(|c| !c.is_whitespace()) {
        return None;
    }
    let args_text = &name[open..=close];
    let argcount = count_args(args_text)?;
    let base: String = name[..open].chars().filter(|c| !c.is_whitespace()).collect();
    Some((format!("{base}({argcount})"), args_text.to_string(), argcount))
}
