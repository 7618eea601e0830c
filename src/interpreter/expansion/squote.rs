//! Single-Quoted Expression Substitution
//!
//! A single-quoted token is an arithmetic expression, not a literal
//! parameter reference. It gets parameter-expanded like any other text,
//! then handed to the expression host: if it parses and evaluates to a
//! plain number, the quoted text is replaced by the printed number; if it
//! still references circuit state (voltages, currents) the host can't
//! resolve, it's kept as a single-quoted expression with any transient
//! macros it uses promoted to durable names; a parse failure or an empty
//! tree is left untouched and recorded as an evaluation error.

use crate::collab::{ExpressionHost, ExpressionTree, TreeCheck, UdfRegistry};
use crate::interpreter::errors::{record_error, ParamError};
use crate::interpreter::expansion::substitution::line_substitute;
use crate::interpreter::table::ParamTable;

fn strip_single_quotes(text: &str) -> &str {
    text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')).unwrap_or(text)
}

/// Parameter-expand and, where possible, evaluate a single-quoted
/// expression. `text` is expected to be the full quoted token (including
/// the surrounding `'...'`), though an unquoted expression is tolerated
/// for callers (like `defn_subst`) that detect the leading quote
/// themselves and pass the text straight through.
pub fn squote_substitute(
    table: &mut ParamTable,
    host: &dyn ExpressionHost,
    udf: &mut dyn UdfRegistry,
    text: &str,
) -> String {
    let quoted = text.starts_with('\'');

    if text.contains('$') {
        // Unexpanded shell variable: expand parameters, but leave the
        // result as a single-quoted expression for a later pass.
        let inner = if quoted { strip_single_quotes(text) } else { text };
        let expanded = line_substitute(table, host, udf, inner);
        return if quoted { format!("'{expanded}'") } else { expanded };
    }

    let inner = if quoted { strip_single_quotes(text) } else { text };
    let expanded = line_substitute(table, host, udf, inner);

    let Some(tree) = host.parse(&expanded) else {
        record_error(ParamError::EvalFailed { expr: text.to_string() });
        return text.to_string();
    };

    match tree.check() {
        TreeCheck::Empty => {
            record_error(ParamError::EvalFailed { expr: text.to_string() });
            text.to_string()
        }
        TreeCheck::HasCircuitRefs => {
            udf.promote_transient_macros(&tree);
            tree.serialize(quoted)
        }
        TreeCheck::Ok => match host.evaluate(&tree) {
            Some(result) => host.print(result.value, result.units.as_deref(), false),
            None => {
                record_error(ParamError::EvalFailed { expr: text.to_string() });
                text.to_string()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::EvalResult;
    use crate::options::ParamTableOptions;
    use serial_test::serial;

    /// A tiny stand-in expression host for tests: parses `<number>` or
    /// `<number>+<number>`/`<name>` text, treats any `v(...)`-looking
    /// text as a circuit reference, and rejects empty input. Real hosts
    /// are supplied by the embedding application.
    struct ArithTree {
        text: String,
        circuit_ref: bool,
        empty: bool,
    }
    impl ExpressionTree for ArithTree {
        fn check(&self) -> TreeCheck {
            if self.empty {
                TreeCheck::Empty
            } else if self.circuit_ref {
                TreeCheck::HasCircuitRefs
            } else {
                TreeCheck::Ok
            }
        }
        fn serialize(&self, quoted: bool) -> String {
            if quoted {
                format!("'{}'", self.text)
            } else {
                self.text.clone()
            }
        }
    }
    struct ArithHost;
    impl ExpressionHost for ArithHost {
        type Tree = ArithTree;
        fn parse(&self, text: &str) -> Option<ArithTree> {
            if text.is_empty() {
                return None;
            }
            Some(ArithTree {
                text: text.to_string(),
                circuit_ref: text.contains("v("),
                empty: false,
            })
        }
        fn evaluate(&self, tree: &ArithTree) -> Option<EvalResult> {
            let parts: Vec<&str> = tree.text.splitn(2, '+').collect();
            let mut sum = 0.0;
            for p in &parts {
                sum += p.trim().parse::<f64>().ok()?;
            }
            Some(EvalResult { value: sum, units: None })
        }
        fn print(&self, value: f64, _units: Option<&str>, _engineering: bool) -> String {
            if value == value.trunc() {
                format!("{}", value as i64)
            } else {
                value.to_string()
            }
        }
    }
    struct NullUdf(Vec<String>);
    impl UdfRegistry for NullUdf {
        fn push(&mut self) {}
        fn pop(&mut self) {}
        fn define(&mut self, _name: &str, _args: &str, _body: &str) {}
        fn promote_transient_macros(&mut self, _tree: &dyn ExpressionTree) -> Vec<(String, String)> {
            self.0.push("promoted".to_string());
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
    fn evaluates_numeric_expression_to_plain_number() {
        let mut t = bare_table();
        let mut udf = NullUdf(Vec::new());
        let out = squote_substitute(&mut t, &ArithHost, &mut udf, "'1+2'");
        assert_eq!(out, "3");
    }

    #[test]
    fn expands_parameters_before_evaluating() {
        let mut t = bare_table();
        t.extract_from_line("x=2");
        let mut udf = NullUdf(Vec::new());
        let out = squote_substitute(&mut t, &ArithHost, &mut udf, "'1+x'");
        assert_eq!(out, "3");
    }

    #[test]
    fn circuit_reference_stays_quoted_and_promotes_macros() {
        let mut t = bare_table();
        let mut udf = NullUdf(Vec::new());
        let out = squote_substitute(&mut t, &ArithHost, &mut udf, "'v(1)+1'");
        assert_eq!(out, "'v(1)+1'");
        assert_eq!(udf.0, vec!["promoted".to_string()]);
    }

    #[test]
    #[serial]
    fn empty_expression_records_eval_failed_and_is_left_unchanged() {
        crate::interpreter::errors::clear_error();
        let mut t = bare_table();
        let mut udf = NullUdf(Vec::new());
        let out = squote_substitute(&mut t, &ArithHost, &mut udf, "''");
        assert_eq!(out, "''");
        assert_eq!(
            crate::interpreter::errors::peek_error(),
            Some(ParamError::EvalFailed { expr: "''".to_string() })
        );
    }

    #[test]
    fn unexpanded_shell_variable_is_left_quoted_after_parameter_expansion() {
        let mut t = bare_table();
        t.extract_from_line("x=2");
        let mut udf = NullUdf(Vec::new());
        let out = squote_substitute(&mut t, &ArithHost, &mut udf, "'x+$HOME'");
        assert_eq!(out, "'2+$HOME'");
    }
}
