//! Substitution Engine
//!
//! The three passes that turn raw netlist text into fully substituted
//! text: `substitution` (plain name lookup with recursive expansion and
//! `%`-glue handling), `squote` (single-quoted expression evaluation),
//! and `defn_subst` (the line-level `name=value` construct rewriter that
//! ties the other two together for a whole `.model`/`.param`/`.subckt`/
//! device-instance line).

pub mod defn_subst;
pub mod squote;
pub mod substitution;

pub use defn_subst::rewrite_line;
pub use squote::squote_substitute;
pub use substitution::line_substitute;
