//! External Collaborator Interfaces
//!
//! The expression parser/evaluator, numeric-literal printer, and
//! user-defined-function (UDF) registry are out of scope for this crate
//! (see spec section 1 / section 6): they belong to the host simulator. This module defines
//! the seams this crate calls through, so it compiles and tests without a
//! real expression engine linked in.
//!
//! `ExpressionTree::check`, `serialize`, and `ExpressionHost::{parse,
//! evaluate, print}` together cover the four external operations the
//! distilled spec lists as separate collaborators (parser, evaluator,
//! printer); we bundle parse/evaluate/print behind one `ExpressionHost`
//! trait because every real caller provides all three from the same
//! expression-engine crate and `squote_substitute` always needs them
//! together. The UDF registry is its own trait because `ParamTable` calls
//! it independently of expression evaluation (`define_macros`/
//! `undefine_macros`), and some trees never need a registry at all.

/// Result of checking a parsed expression tree before evaluating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeCheck {
    /// The tree is well-formed and contains no circuit-state references.
    Ok,
    /// The tree references circuit state (node voltages, branch currents)
    /// that this engine cannot resolve; keep it as a single-quoted
    /// expression instead of evaluating it.
    HasCircuitRefs,
    /// The parser produced an empty or malformed tree.
    Empty,
}

/// A fully-evaluated numeric result, with optional engineering units.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub value: f64,
    pub units: Option<String>,
}

/// A parsed single-quoted expression.
pub trait ExpressionTree {
    fn check(&self) -> TreeCheck;
    /// Re-serialize the tree back to text, optionally wrapped in the
    /// single-quote delimiters the engine expects on its own output.
    fn serialize(&self, quoted: bool) -> String;
}

/// The expression parser, evaluator, and numeric-literal printer, bundled
/// because `squote_substitute` always needs all three from a single host.
pub trait ExpressionHost {
    type Tree: ExpressionTree;

    /// Parse `text`. Returns `None` on a major parse error; a merely empty
    /// or otherwise unusable tree is signaled through `ExpressionTree::check`
    /// returning `TreeCheck::Empty`, not through `None` here.
    fn parse(&self, text: &str) -> Option<Self::Tree>;

    /// Evaluate an already-checked (`TreeCheck::Ok`) tree to a number.
    fn evaluate(&self, tree: &Self::Tree) -> Option<EvalResult>;

    /// Render a numeric result the way the host's canonical printer would.
    fn print(&self, value: f64, units: Option<&str>, engineering: bool) -> String;
}

/// Push/pop/define of user-defined-function contexts, and promotion of
/// transient macros discovered inside an unresolvable expression tree.
pub trait UdfRegistry {
    /// Push a fresh, empty context.
    fn push(&mut self);
    /// Pop the most recently pushed context.
    fn pop(&mut self);
    /// Register `name(args) = body` in the current context.
    fn define(&mut self, name: &str, args: &str, body: &str);
    /// Re-register any macros local to `tree` under fresh names in the
    /// nearest enclosing context, returning `(old_name, new_name)` pairs so
    /// the caller can rewrite references in the re-serialized expression.
    fn promote_transient_macros(&mut self, tree: &dyn ExpressionTree) -> Vec<(String, String)>;
}
