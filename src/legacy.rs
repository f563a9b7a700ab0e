//! The pre-0.2 entry point, kept so existing callers don't break.
//!
//! The old API took the settings tree first and the file path second; the
//! replacement, [`rewrite_file`](crate::rewrite_file), takes the file path
//! first. Calling the old name warns once per call through the `log` facade
//! in addition to the compile-time deprecation.

use std::path::Path;

use crate::error::PhpsetError;
use crate::rewrite;
use crate::tree::SettingsTree;

/// Rewrite `settings_file`, applying every leaf in `settings`.
#[deprecated(
    since = "0.2.0",
    note = "use phpset::rewrite_file() instead; the settings file is now the first argument"
)]
pub fn rewrite(settings: &SettingsTree, settings_file: &Path) -> Result<(), PhpsetError> {
    log::warn!(
        "phpset::legacy::rewrite() is deprecated; use phpset::rewrite_file() instead \
         (the settings file is now the first argument)"
    );
    rewrite::rewrite_file(settings_file, settings)
}
