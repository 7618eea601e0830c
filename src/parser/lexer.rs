//! Tokenizer for `name=value` Constructs
//!
//! Splits a line into `(name, value)` pairs or isolated tokens, honoring
//! quote characters and parenthesis nesting. Operates over a `Vec<char>`
//! cursor rather than byte offsets, since the source text is short
//! (netlist lines) and char-indexed scanning is far easier to get right
//! than hand-rolled UTF-8 boundary arithmetic.

use crate::interpreter::errors::{record_error, ParamError};
use crate::parser::types::{is_namechar, Mode};

fn is_delim(c: char, lhs_funcs: bool) -> bool {
    if lhs_funcs {
        c == ','
    } else {
        c == ',' || c == '(' || c == ')'
    }
}

/// Return the next name token and advance `pos` past it (and past any
/// trailing delimiters/whitespace). `pos` is updated in place; returns
/// `None` at end of input.
///
/// When `lhs_funcs` is set, `(` does not delimit the name: a function
/// definition's argument list is part of the LHS, e.g. `foo(a,b)`. Interior
/// whitespace is then stripped from the returned name, matching
/// `foo (a, b)` tokenizing to `foo(a,b)`.
pub fn name_token(chars: &[char], pos: &mut usize, lhs_funcs: bool) -> Option<(String, usize)> {
    while *pos < chars.len() && (chars[*pos].is_whitespace() || is_delim(chars[*pos], lhs_funcs)) {
        *pos += 1;
    }
    let start = *pos;
    if *pos >= chars.len() {
        return None;
    }

    if chars[*pos] == '\'' || chars[*pos] == '"' {
        let quote = chars[*pos];
        *pos += 1;
        while *pos < chars.len() {
            if chars[*pos] == quote && chars[*pos - 1] != '\\' {
                *pos += 1;
                break;
            }
            *pos += 1;
        }
    } else if lhs_funcs {
        let mut depth: i32 = 0;
        while *pos < chars.len() {
            let c = chars[*pos];
            if depth == 0 {
                if c.is_whitespace() {
                    let mut t = *pos;
                    while t < chars.len() && chars[t].is_whitespace() {
                        t += 1;
                    }
                    if t < chars.len() && chars[t] == '(' {
                        *pos = t;
                        continue;
                    }
                    break;
                }
                if c == '=' {
                    break;
                }
            }
            if c == '(' {
                depth += 1;
            } else if c == ')' {
                depth -= 1;
            }
            *pos += 1;
        }
    } else {
        while *pos < chars.len() {
            let c = chars[*pos];
            if c.is_whitespace() || c == '=' || is_delim(c, lhs_funcs) {
                break;
            }
            *pos += 1;
        }
    }

    let end = *pos;
    let name: String = chars[start..end]
        .iter()
        .filter(|&&c| !lhs_funcs || !c.is_whitespace())
        .collect();

    while *pos < chars.len() && (chars[*pos].is_whitespace() || is_delim(chars[*pos], lhs_funcs)) {
        *pos += 1;
    }
    Some((name, start))
}

/// Return the next value token and advance `pos` past it. A value spans to
/// a matching unescaped closing quote when quoted; otherwise it extends
/// while not at top-level whitespace or `,`, with parenthesis depth
/// tracked so a `,` inside parens does not terminate it. All internal
/// whitespace is stripped, and whitespace immediately before a top-level
/// `(` is folded away (`f (x)` becomes `f(x)`).
pub fn value_token(chars: &[char], pos: &mut usize) -> Option<String> {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
    let start = *pos;
    if *pos >= chars.len() {
        return None;
    }

    if chars[*pos] == '\'' || chars[*pos] == '"' {
        let quote = chars[*pos];
        *pos += 1;
        while *pos < chars.len() {
            if chars[*pos] == quote && chars[*pos - 1] != '\\' {
                *pos += 1;
                break;
            }
            *pos += 1;
        }
    } else {
        let mut depth: i32 = 0;
        while *pos < chars.len() {
            let c = chars[*pos];
            if depth == 0 {
                if c.is_whitespace() {
                    let mut t = *pos;
                    while t < chars.len() && chars[t].is_whitespace() {
                        t += 1;
                    }
                    if t < chars.len() && chars[t] == '(' {
                        *pos = t;
                        continue;
                    }
                    break;
                } else if c == ',' {
                    break;
                }
            }
            if c == '(' {
                depth += 1;
            } else if c == ')' {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            *pos += 1;
        }
    }

    let end = *pos;
    let value: String = chars[start..end].iter().filter(|c| !c.is_whitespace()).collect();
    Some(value)
}

/// Grab the next `name=value` construct (or, in `Sngl` mode, an isolated
/// name/expression) and advance `pos` past it.
///
/// Returns `(name, sub, start)` where `sub` is `None` only for the `Sngl`
/// isolated-token case, and `start` is the offset (in `chars`) where the
/// name token began — callers use this to splice a rewritten value back
/// into the original text. Returns `None` at end of input or (in `Param`/
/// `Subc` mode) on a malformed construct, after recording a `ParamError`.
pub fn tokenize(
    chars: &[char],
    pos: &mut usize,
    mode: Mode,
) -> Option<(Option<String>, Option<String>, usize)> {
    let mut mode = mode;
    let name;
    let start;
    loop {
        let lhs_funcs = matches!(mode, Mode::Param | Mode::Subc);
        let (candidate, cstart) = name_token(chars, pos, lhs_funcs)?;

        if matches!(mode, Mode::Param | Mode::Subc) {
            if candidate.starts_with('$') {
                // HSPICE-style comment or stray shell expansion: stop
                // being strict and resync with whatever follows.
                mode = Mode::General;
            } else {
                let first = candidate.chars().next().unwrap_or(' ');
                if !is_namechar(first) {
                    record_error(ParamError::BadName { name: candidate });
                    return None;
                }
                if *pos >= chars.len() || chars[*pos] != '=' {
                    record_error(ParamError::MisplacedEquals);
                    return None;
                }
            }
        }

        if *pos < chars.len() && chars[*pos] == '=' {
            name = candidate;
            start = cstart;
            break;
        }

        if mode == Mode::Sngl {
            let first = candidate.chars().next().unwrap_or(' ');
            if is_namechar(first) || candidate.starts_with('\'') {
                return Some((Some(candidate), None, cstart));
            }
        }
        // Discard the candidate and keep scanning for the next one.
    }

    let first = name.chars().next().unwrap_or(' ');
    if !is_namechar(first) {
        record_error(ParamError::BadName { name });
        return None;
    }

    while *pos < chars.len() && (chars[*pos].is_whitespace() || chars[*pos] == '=') {
        *pos += 1;
    }
    if *pos >= chars.len() {
        record_error(ParamError::MissingValue { name });
        return None;
    }
    let sub = value_token(chars, pos)?;

    while *pos < chars.len() && (chars[*pos].is_whitespace() || chars[*pos] == ',') {
        *pos += 1;
    }
    Some((Some(name), Some(sub), start))
}
