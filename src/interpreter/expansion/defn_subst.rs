//! Definition-Line Rewriter
//!
//! `rewrite_line` updates every `name=value` (or, in `Sngl` mode, isolated
//! name/expression) construct on a `.model`/`.param`/`.subckt`/device-
//! instance line, replacing each value with its fully substituted form.
//! In `Subc` mode (`.subckt` headers) parameters defined earlier on the
//! same line become visible to later ones on that line, e.g.
//! `.subckt x p1=1 p2=2 p3='p1+p2'` — this is modeled with a scratch
//! table copy updated as the line is walked left to right, discarded once
//! the line is done.

use crate::collab::{ExpressionHost, UdfRegistry};
use crate::interpreter::expansion::squote::squote_substitute;
use crate::interpreter::expansion::substitution::line_substitute;
use crate::interpreter::funcdef::detect_function;
use crate::interpreter::table::ParamTable;
use crate::parser::types::Mode;
use crate::parser::tokenize;

fn is_traditional_sep(c: char) -> bool {
    c.is_whitespace() || c == '=' || c == '(' || c == ')' || c == ','
}

/// Rewrite `line`'s `name=value` constructs with their substituted
/// values, against the bindings in `table`. `nskip` tokens (traditionally
/// delimited) at the start of the line are left alone — used to skip a
/// device name or `.model` keyword that precedes the parameter list.
pub fn rewrite_line(
    table: &ParamTable,
    host: &dyn ExpressionHost,
    udf: &mut dyn UdfRegistry,
    line: &str,
    mode: Mode,
    nskip: usize,
) -> String {
    let mut work = table.copy();
    let chars: Vec<char> = line.chars().collect();
    let mut pos = 0;
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }

    let mut skip = nskip;
    while pos < chars.len() && skip > 0 {
        while pos < chars.len() && !is_traditional_sep(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && is_traditional_sep(chars[pos]) {
            pos += 1;
        }
        skip -= 1;
    }

    let mut result = String::new();
    result.push_str(&chars[..pos].iter().collect::<String>());
    let mut copied_to = pos;

    loop {
        let mut p = pos;
        let Some((name_opt, sub_opt, start)) = tokenize(&chars, &mut p, mode) else {
            break;
        };
        let end = p;
        pos = p;

        let (pname, psub) = if mode == Mode::Sngl && sub_opt.is_none() {
            (None, name_opt)
        } else {
            (name_opt, sub_opt)
        };
        let Some(psub) = psub else {
            continue;
        };

        if let Some(ref n) = pname {
            if detect_function(n).is_some() {
                // A function-macro LHS on this line; leave it untouched.
                continue;
            }
        }

        let new_sub = if psub.starts_with('\'') {
            squote_substitute(&mut work, host, udf, &psub)
        } else {
            let mut candidate = psub.clone();
            if work.subst(&mut candidate, host, udf) {
                if candidate.starts_with('\'') {
                    squote_substitute(&mut work, host, udf, &candidate)
                } else {
                    line_substitute(&mut work, host, udf, &candidate)
                }
            } else {
                psub.clone()
            }
        };

        if mode == Mode::Subc {
            if let Some(ref n) = pname {
                work.update_from_line(&format!("{n}={new_sub}"));
            }
        }

        if new_sub == psub {
            continue;
        }

        result.push_str(&chars[copied_to..start].iter().collect::<String>());
        match &pname {
            Some(n) => {
                result.push_str(n);
                result.push('=');
                result.push_str(&new_sub);
            }
            None => result.push_str(&new_sub),
        }
        copied_to = end;
    }

    result.push_str(&chars[copied_to..].iter().collect::<String>());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{EvalResult, ExpressionTree, TreeCheck};
    use crate::options::ParamTableOptions;

    struct NullTree;
    impl ExpressionTree for NullTree {
        fn check(&self) -> TreeCheck {
            TreeCheck::Empty
        }
        fn serialize(&self, _quoted: bool) -> String {
            String::new()
        }
    }
    struct NullHost;
    impl ExpressionHost for NullHost {
        type Tree = NullTree;
        fn parse(&self, _text: &str) -> Option<NullTree> {
            None
        }
        fn evaluate(&self, _tree: &NullTree) -> Option<EvalResult> {
            None
        }
        fn print(&self, value: f64, _units: Option<&str>, _engineering: bool) -> String {
            value.to_string()
        }
    }
    struct NullUdf;
    impl UdfRegistry for NullUdf {
        fn push(&mut self) {}
        fn pop(&mut self) {}
        fn define(&mut self, _name: &str, _args: &str, _body: &str) {}
        fn promote_transient_macros(&mut self, _tree: &dyn ExpressionTree) -> Vec<(String, String)> {
            Vec::new()
        }
    }

    fn bare_table() -> ParamTable {
        ParamTable::with_options(ParamTableOptions {
            include_engine_flag: false,
            include_release_code: false,
            release_code: None,
            collapse_on_lookup: false,
        })
    }

    #[test]
    fn rewrites_model_line_values() {
        let mut t = bare_table();
        t.extract_from_line("vt0=0.7");
        // nskip=3 leaves the ".model nmos nmos" keyword/name/type alone.
        let out = rewrite_line(&t, &NullHost, &mut NullUdf, ".model nmos nmos level=1 vto=vt0", Mode::Param, 3);
        assert_eq!(out, ".model nmos nmos level=1 vto=0.7");
    }

    #[test]
    fn subckt_header_sees_earlier_parameters_left_to_right() {
        let t = bare_table();
        // nskip=4 leaves ".subckt x p1 p2" (keyword, name, two nodes) alone.
        let out = rewrite_line(
            &t,
            &NullHost,
            &mut NullUdf,
            ".subckt x p1 p2 r1=1 r2=r1",
            Mode::Subc,
            4,
        );
        assert_eq!(out, ".subckt x p1 p2 r1=1 r2=1");
    }

    #[test]
    fn function_definition_lhs_is_left_untouched() {
        let t = bare_table();
        let out = rewrite_line(&t, &NullHost, &mut NullUdf, ".param f(x)=x*2", Mode::Param, 1);
        assert_eq!(out, ".param f(x)=x*2");
    }

    #[test]
    fn nskip_preserves_leading_tokens() {
        let mut t = bare_table();
        t.extract_from_line("w=5");
        let out = rewrite_line(&t, &NullHost, &mut NullUdf, "m1 d g s b nmos w=w l=1", Mode::General, 5);
        assert_eq!(out, "m1 d g s b nmos w=5 l=1");
    }
}
