//! Parameter Substitution Errors
//!
//! Structured diagnostics for the tokenizer and substitution engine, plus
//! the process-wide error slot that `tokenize`/`line_substitute`/
//! `squote_substitute` write into instead of returning a `Result`.
//!
//! The slot shape is a legacy carry-over from the original implementation,
//! which used a single static `char*` overwritten by the latest diagnostic.
//! We keep the single-slot, overwrite-on-write behavior (callers must read
//! it before the next call that might clobber it) but back it with a
//! `Mutex` instead of an unsynchronized global, and give every message a
//! typed shape instead of ad hoc `format!` calls.

use std::sync::Mutex;
use thiserror::Error;

/// One diagnostic produced while tokenizing or substituting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Bad parameter name: {name}.")]
    BadName { name: String },

    #[error("Parameter syntax error, misplaced '='.")]
    MisplacedEquals,

    #[error("Missing parameter value for {name}")]
    MissingValue { name: String },

    #[error("Recursion detected, parameter name: {name} value: {value}")]
    Recursion { name: String, value: String },

    #[error("Evaluation failed: {expr}.")]
    EvalFailed { expr: String },
}

static ERROR_SLOT: Mutex<Option<ParamError>> = Mutex::new(None);

/// Overwrite the process-wide error slot with `err`.
pub fn record_error(err: ParamError) {
    *ERROR_SLOT.lock().unwrap() = Some(err);
}

/// Read and clear the error slot.
pub fn take_error() -> Option<ParamError> {
    ERROR_SLOT.lock().unwrap().take()
}

/// Read the error slot without clearing it.
pub fn peek_error() -> Option<ParamError> {
    ERROR_SLOT.lock().unwrap().clone()
}

/// Clear the error slot without reading it.
pub fn clear_error() {
    *ERROR_SLOT.lock().unwrap() = None;
}
