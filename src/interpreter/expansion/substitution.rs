//! Fixed-Point Line Substitution
//!
//! `line_substitute` is the engine's workhorse: walk a line token by
//! token, replace any token that names a parameter with that parameter's
//! value, recursively expand the replacement, and splice it back in place
//! of the original token (folding away `%` concatenation markers that
//! border the substituted span). Single-quoted tokens are handed to
//! `squote_substitute` instead of plain name lookup.

use crate::collab::{ExpressionHost, UdfRegistry};
use crate::interpreter::errors::{record_error, ParamError};
use crate::interpreter::expansion::squote::squote_substitute;
use crate::interpreter::table::ParamTable;
use crate::parser::parser_token_default;
use crate::parser::types::is_namechar;

/// Parameter- and single-quote-expand `text` against `table`, to a fixed
/// point: every substitutable token is replaced, and replacements are
/// themselves walked for further substitutions (cycle-guarded by
/// `table`'s recursion-tracking set).
pub fn line_substitute(
    table: &mut ParamTable,
    host: &dyn ExpressionHost,
    udf: &mut dyn UdfRegistry,
    text: &str,
) -> String {
    let mut result = String::new();
    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    let mut copied_to = 0;

    while let Some((tok, start, end)) = parser_token_default(&chars, &mut pos) {
        let first = tok.chars().next().unwrap_or(' ');
        let mut new_tok: Option<String> = None;

        if first == '\'' {
            new_tok = Some(squote_substitute(table, host, udf, &tok));
        } else if is_namechar(first) {
            let ltok = tok.clone();
            if table.is_expanding(&ltok) {
                // Already mid-expansion higher up this same chain: report
                // the name that started the cycle, with its own value,
                // rather than the nested token that closed the loop.
                let value = table.get(&ltok).map(|p| p.sub().to_string()).unwrap_or_default();
                record_error(ParamError::Recursion { name: ltok, value });
            } else {
                let mut candidate = tok.clone();
                if table.subst(&mut candidate, host, udf) {
                    table.mark_expanding(ltok.clone());
                    if candidate.starts_with('\'') {
                        candidate = squote_substitute(table, host, udf, &candidate);
                    } else {
                        candidate = line_substitute(table, host, udf, &candidate);
                    }
                    table.unmark_expanding(&ltok);
                    new_tok = Some(candidate);
                }
            }
        }

        if let Some(new_tok) = new_tok {
            let mut splice_start = start;
            if splice_start > copied_to && chars.get(splice_start - 1) == Some(&'%') {
                splice_start -= 1;
            }
            result.push_str(&chars[copied_to..splice_start].iter().collect::<String>());
            result.push_str(&new_tok);

            let mut splice_end = end;
            if chars.get(splice_end) == Some(&'%') {
                splice_end += 1;
            }
            copied_to = splice_end;
        }
    }

    result.push_str(&chars[copied_to..].iter().collect::<String>());
    result
}
