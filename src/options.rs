//! Construction Options
//!
//! Plain runtime options structs, following the same shape as this crate's
//! teacher's `BashOptions`/`ExecOptions`: a `Default`-derived struct of
//! `Option`/`bool` fields rather than a Cargo feature, since the predefined
//! entries are a per-embedding choice made at call sites, not a build-time
//! choice.

/// Options controlling `ParamTable` construction.
#[derive(Debug, Clone)]
pub struct ParamTableOptions {
    /// Add the read-only "this engine is active" predefined entry.
    pub include_engine_flag: bool,
    /// Add the read-only release/version predefined entry.
    pub include_release_code: bool,
    /// Text for the release predefined entry. Defaults to a placeholder
    /// when `include_release_code` is set and this is `None`.
    pub release_code: Option<String>,
    /// Mirrors the original engine's `pt_collapse` flag: a successful
    /// lookup also collapses the record in place.
    pub collapse_on_lookup: bool,
}

impl Default for ParamTableOptions {
    fn default() -> Self {
        Self {
            include_engine_flag: true,
            include_release_code: true,
            release_code: None,
            collapse_on_lookup: false,
        }
    }
}

/// Name of the read-only "engine is active" predefined parameter.
pub const ENGINE_FLAG_NAME: &str = "PARAMSUB_ENGINE";
/// Name of the read-only release/version predefined parameter.
pub const RELEASE_CODE_NAME: &str = "PARAMSUB_RELEASE";
/// Default text used for the release predefined entry when the caller
/// doesn't supply one.
pub const DEFAULT_RELEASE_CODE: &str = "1.0.0";
