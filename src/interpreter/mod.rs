//! Parameter Table and Substitution Engine
//!
//! This module contains the parameter table (`table`), the function-macro
//! definition detector (`funcdef`), the substitution passes (`expansion`),
//! small shared helpers (`helpers`), and the structured error type and
//! error slot (`errors`).

pub mod errors;
pub mod expansion;
pub mod funcdef;
pub mod helpers;
pub mod table;

pub use errors::{clear_error, peek_error, record_error, take_error, ParamError};
pub use expansion::{line_substitute, rewrite_line, squote_substitute};
pub use funcdef::detect_function;
pub use table::ParamTable;
