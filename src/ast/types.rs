//! Parameter Record Types
//!
//! A `ParamRecord` is the unit the parameter table maps names to: plain
//! symbolic bindings (`name = sub`) and function-macro definitions
//! (`name(args) = sub`) share the same shape, distinguished by `numargs`.

use std::fmt;

/// A single parameter binding or function-macro definition.
///
/// For an ordinary parameter, `args` is `None` and `numargs` is `-1`. For a
/// function definition the name has already been normalized to `base(N)`
/// by the function-definition detector (see `crate::interpreter::funcdef`),
/// `args` holds the raw `(a,b,...)` text, and `numargs` is `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    name: String,
    sub: String,
    args: Option<String>,
    numargs: i32,
    readonly: bool,
    collapsed: bool,
}

impl ParamRecord {
    /// Build an ordinary (non-function) parameter record.
    pub fn new(name: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub: sub.into(),
            args: None,
            numargs: -1,
            readonly: false,
            collapsed: false,
        }
    }

    /// Build a function-macro record. `name` must already be normalized to
    /// `base(N)` and `args` must be the raw `(a,b,...)` text.
    pub fn new_function(
        name: impl Into<String>,
        sub: impl Into<String>,
        args: impl Into<String>,
        numargs: i32,
    ) -> Self {
        Self {
            name: name.into(),
            sub: sub.into(),
            args: Some(args.into()),
            numargs,
            readonly: false,
            collapsed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }

    pub fn numargs(&self) -> i32 {
        self.numargs
    }

    pub fn is_function(&self) -> bool {
        self.numargs >= 0
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_readonly(&mut self) {
        self.readonly = true;
    }

    pub fn set_collapsed(&mut self) {
        self.collapsed = true;
    }

    /// Replace the substitution text, unless this record is read-only.
    /// Returns `true` if the record was updated.
    pub fn set_sub(&mut self, sub: impl Into<String>) -> bool {
        if self.readonly {
            return false;
        }
        self.sub = sub.into();
        self.collapsed = false;
        true
    }

    /// Replace the function argument list and re-derive `numargs` from it,
    /// unless this record is read-only.
    pub fn set_function_args(&mut self, args: impl Into<String>, numargs: i32) -> bool {
        if self.readonly {
            return false;
        }
        self.args = Some(args.into());
        self.numargs = numargs;
        true
    }

    /// Copy `sub`/`args`/`numargs` from `other` into `self`, unless `self`
    /// is read-only. Mirrors `sParam::update` from the original engine.
    pub fn update_from(&mut self, other: &ParamRecord) -> bool {
        if self.readonly {
            return false;
        }
        self.sub = other.sub.clone();
        self.args = other.args.clone();
        self.numargs = other.numargs;
        self.collapsed = false;
        true
    }
}

impl fmt::Display for ParamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.sub)
    }
}
