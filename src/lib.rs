//! Patch PHP settings files: rewrite scalar, array, and nested-index variable
//! assignments in place, preserving everything else in the file.
//!
//! Phpset is the programmatic equivalent of opening `settings.php` in an
//! editor and fixing one line. Describe the assignments you want as a
//! [`SettingsTree`], point [`rewrite_file`] at the file, and each existing
//! assignment with a matching left-hand side is replaced on its own line —
//! every other line stays byte-for-byte where it was.
//!
//! ```
//! use phpset::{Setting, SettingsTree};
//!
//! # fn main() -> Result<(), phpset::PhpsetError> {
//! let tree = SettingsTree::new()
//!     .set("maintenance_mode", Setting::new(true).comment("temporarily offline"));
//!
//! let out = phpset::rewrite_settings(Some("<?php\n$maintenance_mode = FALSE;\n"), &tree)?;
//! assert_eq!(out, "<?php\n$maintenance_mode = true; // temporarily offline\n");
//! # Ok(())
//! # }
//! ```
//!
//! # Design: a tree of assignments
//!
//! A [`SettingsTree`] maps variable names to [`Setting`] leaves, either at
//! the top level (`$x = ...;`) or behind a chain of array indexes
//! (`$databases['default']['default'] = ...;`). Each leaf carries:
//!
//! - **a value** — any [`PhpValue`]: scalars, `NULL`, or nested associative
//!   arrays, rendered in PHP `var_export` style (`true`, `NULL`,
//!   single-quoted strings, multi-line `array (...)` literals).
//! - **`required`** — whether to append the assignment at end-of-file when no
//!   existing line matches. Off by default: a non-required leaf that matches
//!   nothing is silently dropped, so a tree can opportunistically fix lines
//!   that may or may not be present.
//! - **an optional comment** — emitted as a trailing `// ...` on the line.
//!
//! # Matching rules
//!
//! Matching is **textual, not semantic**. A leaf targets the single-quoted
//! spelling of its expression (`$db['host']`), and only a line whose
//! left-hand side is byte-identical to that spelling is replaced. A file that
//! says `$db["host"] = ...;` is left alone, and a required leaf appends a
//! second assignment below it. PHP would treat the two spellings as the same
//! variable; this library deliberately does not — see
//! [`rewrite`](rewrite_settings) for the full rules and the trade-off.
//!
//! # File handling
//!
//! [`rewrite_file`] reads the whole file (a missing file counts as empty),
//! patches it in memory, and overwrites it in one write. The result always
//! starts with `<?php\n` — the opening tag is inserted when absent — and
//! always ends with a newline. There is no partial-write recovery and no
//! locking; the caller is assumed to be the only writer.
//!
//! # Errors
//!
//! All fallible operations return [`PhpsetError`]: I/O failures carry the
//! offending path, and values with no PHP literal form (non-finite floats)
//! fail before anything is written.

pub mod error;
pub mod legacy;

mod rewrite;
mod tree;
mod value;

pub use error::PhpsetError;
pub use rewrite::{rewrite_file, rewrite_settings};
pub use tree::{Setting, SettingsTree};
pub use value::PhpValue;
