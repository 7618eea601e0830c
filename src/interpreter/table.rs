//! Parameter Table
//!
//! `ParamTable` is the engine's central data structure: a name-to-record
//! map plus the recursion-tracking set `subst`/`line_substitute` share
//! while walking a substitution chain.

use std::collections::{HashMap, HashSet};

use crate::ast::types::ParamRecord;
use crate::collab::{ExpressionHost, UdfRegistry};
use crate::interpreter::errors::{record_error, ParamError};
use crate::interpreter::funcdef::detect_function;
use crate::interpreter::helpers::strip_double_quotes;
use crate::options::{
    ParamTableOptions, DEFAULT_RELEASE_CODE, ENGINE_FLAG_NAME, RELEASE_CODE_NAME,
};
use crate::parser::tokenize;
use crate::parser::types::Mode;

/// A set of `name = value`/`name(args) = value` bindings, as extracted
/// from `.param`, `.subckt`, `.model`, or device-instance lines.
#[derive(Debug, Clone)]
pub struct ParamTable {
    table: HashMap<String, ParamRecord>,
    recursion: HashSet<String>,
    options: ParamTableOptions,
}

impl Default for ParamTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamTable {
    /// An empty table with default construction options (predefined
    /// entries included, no lookup-time collapsing).
    pub fn new() -> Self {
        Self::with_options(ParamTableOptions::default())
    }

    /// An empty table, with the predefined entries and lookup behavior
    /// `options` specifies.
    pub fn with_options(options: ParamTableOptions) -> Self {
        let mut table = HashMap::new();
        if options.include_engine_flag {
            let mut p = ParamRecord::new(ENGINE_FLAG_NAME, "1");
            p.set_readonly();
            table.insert(p.name().to_string(), p);
        }
        if options.include_release_code {
            let text = options
                .release_code
                .clone()
                .unwrap_or_else(|| DEFAULT_RELEASE_CODE.to_string());
            let mut p = ParamRecord::new(RELEASE_CODE_NAME, text);
            p.set_readonly();
            table.insert(p.name().to_string(), p);
        }
        Self { table, recursion: HashSet::new(), options }
    }

    /// Number of bindings currently in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&ParamRecord> {
        self.table.get(name)
    }

    /// A deep copy: every record, its readonly/collapsed flags included.
    pub fn copy(&self) -> Self {
        Self {
            table: self.table.clone(),
            recursion: HashSet::new(),
            options: self.options.clone(),
        }
    }

    /// Parse a `.param`-style line of `name=value` constructs (an optional
    /// leading SPICE keyword, e.g. `.param`, is skipped) and add or
    /// override bindings in this table. Mirrors `sParamTab::extract_params`.
    pub fn extract_from_line(&mut self, line: &str) {
        let mut chars: Vec<char> = line.chars().collect();
        let mut start = 0;
        if chars.first() == Some(&'.') {
            while start < chars.len() && !chars[start].is_whitespace() {
                start += 1;
            }
            while start < chars.len() && chars[start].is_whitespace() {
                start += 1;
            }
            chars = chars[start..].to_vec();
        }

        let mut pos = 0;
        while pos < chars.len() {
            let Some((Some(name), Some(sub), _)) = tokenize(&chars, &mut pos, Mode::Param) else {
                break;
            };
            self.add_or_update(name, sub);
        }
    }

    fn add_or_update(&mut self, name: String, sub: String) {
        if let Some((norm_name, args, numargs)) = detect_function(&name) {
            match self.table.get_mut(&norm_name) {
                Some(p) => {
                    p.set_sub(sub);
                    p.set_function_args(args, numargs);
                }
                None => {
                    let p = ParamRecord::new_function(norm_name.clone(), sub, args, numargs);
                    self.table.insert(norm_name, p);
                }
            }
        } else {
            match self.table.get_mut(&name) {
                Some(p) => {
                    p.set_sub(sub);
                }
                None => {
                    let p = ParamRecord::new(name.clone(), sub);
                    self.table.insert(name, p);
                }
            }
        }
    }

    /// Override (or add) every binding from `other` in this table.
    /// Readonly bindings in `self` are left untouched. Mirrors the
    /// `sParamTab*` overload of `sParamTab::update`.
    pub fn update_from_table(&mut self, other: &ParamTable) {
        for (name, p) in other.table.iter() {
            match self.table.get_mut(name) {
                Some(q) => {
                    q.update_from(p);
                }
                None => {
                    let mut q = ParamRecord::new(p.name(), p.sub());
                    q.update_from(p);
                    if p.collapsed() {
                        q.set_collapsed();
                    }
                    if p.readonly() {
                        q.set_readonly();
                    }
                    self.table.insert(name.clone(), q);
                }
            }
        }
    }

    /// Override (or add) bindings parsed from a `.param`-style line.
    /// Mirrors the `char*` overload of `sParamTab::update`.
    pub fn update_from_line(&mut self, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let mut pos = 0;
        while pos < chars.len() {
            let Some((Some(name), Some(sub), _)) = tokenize(&chars, &mut pos, Mode::Param) else {
                break;
            };
            self.add_or_update(name, sub);
        }
    }

    /// Expand every binding's value in place, so later lookups avoid
    /// re-walking the same substitution chain.
    pub fn collapse(&mut self, host: &dyn ExpressionHost, udf: &mut dyn UdfRegistry) {
        let names: Vec<String> = self.table.keys().cloned().collect();
        for name in names {
            let sub = self.table.get(&name).unwrap().sub().to_string();
            let expanded = crate::interpreter::expansion::substitution::line_substitute(self, host, udf, &sub);
            let p = self.table.get_mut(&name).unwrap();
            p.set_sub(expanded);
            p.set_collapsed();
        }
    }

    /// Register every function-macro binding with `registry`, pushing a
    /// fresh context first unless `nopush` is set. Must be called before
    /// the macros are evaluated.
    pub fn define_macros(&self, registry: &mut dyn UdfRegistry, nopush: bool) {
        if !nopush {
            registry.push();
        }
        for p in self.table.values() {
            if p.is_function() {
                let base = p.name().split('(').next().unwrap_or(p.name());
                registry.define(base, p.args().unwrap_or(""), p.sub());
            }
        }
    }

    /// Undo a prior `define_macros(false)` call.
    pub fn undefine_macros(&self, registry: &mut dyn UdfRegistry) {
        registry.pop();
    }

    /// If `tok` names a binding, replace it with that binding's value and
    /// return `true`. Tracks recursion via the table's internal
    /// in-progress set; records a `ParamError::Recursion` and returns
    /// `false` without substituting if `tok` is already being expanded
    /// higher up the call chain.
    pub(crate) fn subst(&mut self, tok: &mut String, host: &dyn ExpressionHost, udf: &mut dyn UdfRegistry) -> bool {
        let name = tok.clone();
        let Some(p) = self.table.get(&name) else {
            return false;
        };
        if self.recursion.contains(&name) {
            record_error(ParamError::Recursion { name: p.name().to_string(), value: p.sub().to_string() });
            return false;
        }
        self.recursion.insert(name.clone());

        if self.options.collapse_on_lookup && !p.collapsed() {
            let sub = p.sub().to_string();
            let expanded = crate::interpreter::expansion::substitution::line_substitute(self, host, udf, &sub);
            if let Some(p) = self.table.get_mut(&name) {
                p.set_sub(expanded);
                p.set_collapsed();
            }
        }

        let p = self.table.get(&name).unwrap();
        *tok = strip_double_quotes(p.sub()).to_string();
        self.recursion.remove(&name);
        true
    }

    /// Whether `name` is already mid-expansion, per the recursion-tracking
    /// set that `line_substitute` and `subst` share.
    pub(crate) fn is_expanding(&self, name: &str) -> bool {
        self.recursion.contains(name)
    }

    pub(crate) fn mark_expanding(&mut self, name: impl Into<String>) {
        self.recursion.insert(name.into());
    }

    pub(crate) fn unmark_expanding(&mut self, name: &str) {
        self.recursion.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{EvalResult, ExpressionTree, TreeCheck};

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
    #[derive(Default)]
    struct RecordingUdf {
        pushed: u32,
        popped: u32,
        defined: Vec<(String, String, String)>,
    }
    impl UdfRegistry for RecordingUdf {
        fn push(&mut self) {
            self.pushed += 1;
        }
        fn pop(&mut self) {
            self.popped += 1;
        }
        fn define(&mut self, name: &str, args: &str, body: &str) {
            self.defined.push((name.to_string(), args.to_string(), body.to_string()));
        }
        fn promote_transient_macros(&mut self, _tree: &dyn ExpressionTree) -> Vec<(String, String)> {
            Vec::new()
        }
    }

    fn bare() -> ParamTable {
        ParamTable::with_options(ParamTableOptions {
            include_engine_flag: false,
            include_release_code: false,
            release_code: None,
            collapse_on_lookup: false,
        })
    }

    #[test]
    fn default_construction_includes_predefined_readonly_entries() {
        let t = ParamTable::new();
        assert!(t.get(ENGINE_FLAG_NAME).unwrap().readonly());
        assert!(t.get(RELEASE_CODE_NAME).unwrap().readonly());
    }

    #[test]
    fn extract_from_line_strips_leading_spice_keyword() {
        let mut t = bare();
        t.extract_from_line(".param a=1 b=2");
        assert_eq!(t.get("a").unwrap().sub(), "1");
        assert_eq!(t.get("b").unwrap().sub(), "2");
    }

    #[test]
    fn extract_from_line_detects_function_macro() {
        let mut t = bare();
        t.extract_from_line(".param f(a,b)=a*b");
        let p = t.get("f(2)").expect("normalized macro name");
        assert!(p.is_function());
        assert_eq!(p.args(), Some("(a,b)"));
    }

    #[test]
    fn update_from_table_overrides_but_skips_readonly() {
        let mut base = bare();
        base.extract_from_line("a=1");
        base.table.get_mut("a").unwrap().set_readonly();
        let mut donor = bare();
        donor.extract_from_line("a=2 b=3");
        base.update_from_table(&donor);
        assert_eq!(base.get("a").unwrap().sub(), "1");
        assert_eq!(base.get("b").unwrap().sub(), "3");
    }

    #[test]
    fn update_from_line_adds_new_and_overrides_existing() {
        let mut t = bare();
        t.extract_from_line("a=1");
        t.update_from_line("a=2 c=3");
        assert_eq!(t.get("a").unwrap().sub(), "2");
        assert_eq!(t.get("c").unwrap().sub(), "3");
    }

    #[test]
    fn copy_is_independent_of_original() {
        let mut t = bare();
        t.extract_from_line("a=1");
        let mut c = t.copy();
        c.extract_from_line("a=2");
        assert_eq!(t.get("a").unwrap().sub(), "1");
        assert_eq!(c.get("a").unwrap().sub(), "2");
    }

    #[test]
    fn collapse_expands_chained_values_in_place() {
        let mut t = bare();
        t.extract_from_line("a=b b=2");
        t.collapse(&NullHost, &mut RecordingUdf::default());
        assert_eq!(t.get("a").unwrap().sub(), "2");
        assert!(t.get("a").unwrap().collapsed());
    }

    #[test]
    fn define_macros_pushes_and_registers_each_function() {
        let mut t = bare();
        t.extract_from_line("f(a,b)=a*b");
        let mut udf = RecordingUdf::default();
        t.define_macros(&mut udf, false);
        assert_eq!(udf.pushed, 1);
        assert_eq!(udf.defined, vec![("f".to_string(), "(a,b)".to_string(), "a*b".to_string())]);
        t.undefine_macros(&mut udf);
        assert_eq!(udf.popped, 1);
    }
}
