//! Tokenizers for SPICE Parameter Text
//!
//! This module contains the two tokenizers the substitution engine builds
//! on: the strict `name=value` lexer (`lexer`) used for `.param`/`.subckt`
//! intake, and the loose, quote-aware splitter (`parser_substitution`) used
//! while walking a line looking for names and single-quoted expressions to
//! substitute.

pub mod lexer;
pub mod parser_substitution;
pub mod types;

pub use lexer::{name_token, tokenize, value_token};
pub use parser_substitution::{parser_token, parser_token_default};
pub use types::{is_namechar, Mode, DEFAULT_SPECIALS};
