//! spice-paramsub - SPICE parameter substitution engine
//!
//! Tokenizes `.param`/`.subckt`/`.model` and device-instance lines,
//! tracks a table of `name = value` and `name(args) = value` bindings,
//! and rewrites lines with those bindings fully substituted in —
//! including recursive expansion, cycle detection, and evaluation of
//! single-quoted arithmetic expressions through a host-supplied
//! expression engine.

pub mod ast;
pub mod collab;
pub mod interpreter;
pub mod options;
pub mod parser;

pub use ast::types::ParamRecord;
pub use collab::{EvalResult, ExpressionHost, ExpressionTree, TreeCheck, UdfRegistry};
pub use interpreter::{
    clear_error, detect_function, line_substitute, peek_error, rewrite_line, squote_substitute,
    take_error, ParamError, ParamTable,
};
pub use options::ParamTableOptions;
pub use parser::{tokenize, Mode};
