//! Call-site information attached to every record
//!
//! Leveled methods are `#[track_caller]`, so the location reported is the
//! caller of `info`/`warn`/..., not the logger internals. Rust cannot name the
//! enclosing function from a `Location`; the [`caller_info!`](crate::caller_info)
//! macro fills that in, and the leveled macros use it.

use std::panic::Location;

/// Placeholder used when the enclosing function cannot be resolved
pub const UNKNOWN_FUNCTION: &str = "?";

/// Function, file and line of a log call site
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallerInfo {
    /// Enclosing function name, without its module path
    pub function: &'static str,
    /// Source file base name
    pub file: &'static str,
    /// Line number
    pub line: u32,
}

impl CallerInfo {
    /// Build caller info from raw parts; `file` is reduced to its base name
    #[must_use]
    pub fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function,
            file: base_name(file),
            line,
        }
    }

    /// Caller info for the nearest non-`#[track_caller]` frame
    #[track_caller]
    #[must_use]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// Caller info from a resolved location; the function is unknown
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(UNKNOWN_FUNCTION, location.file(), location.line())
    }
}

/// Last path component of a source file path.
#[must_use]
pub fn base_name(path: &'static str) -> &'static str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Reduce a `type_name` of a nested marker fn to the enclosing function name.
///
/// `app::server::handle::{{closure}}::__caller` becomes `handle`.
#[doc(hidden)]
#[must_use]
pub fn function_name(marker_type_name: &'static str) -> &'static str {
    let mut name = marker_type_name
        .strip_suffix("::__caller")
        .unwrap_or(marker_type_name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name.rsplit("::").next().unwrap_or(name)
}

/// Capture the enclosing function, file and line at the macro call site.
#[macro_export]
macro_rules! caller_info {
    () => {{
        fn __caller() {}
        $crate::CallerInfo::new(
            $crate::caller::function_name(::std::any::type_name_of_val(&__caller)),
            ::std::file!(),
            ::std::line!(),
        )
    }};
}
