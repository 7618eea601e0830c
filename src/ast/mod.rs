//! Data Model for Parameter Records
//!
//! This module defines the record shape a parameter table maps names to.
//!
//! Architecture:
//!   Line text → tokenizer → (name, value) → record → table

pub mod types;
