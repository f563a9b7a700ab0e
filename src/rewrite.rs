//! The rewriter core: patch PHP assignments into settings-file text.
//!
//! Split the same way persistence usually is: a pure string-to-string
//! function ([`rewrite_settings`]) that all the behavior lives in, and a thin
//! I/O wrapper ([`rewrite_file`]) that reads the file (a missing file counts
//! as empty), patches it, and writes the whole buffer back.
//!
//! # Matching is textual
//!
//! An existing line is replaced only when its left-hand side is byte-identical
//! to the target expression in its single-quoted form: `$db['host']` matches
//! `$db['host'] = ...;` but not `$db["host"] = ...;`. Quote styles are not
//! treated as equivalent, so a required setting targeting `$db['host']` while
//! the file says `$db["host"]` appends a second assignment instead of editing
//! the first. That mirrors the historical behavior of settings editors in the
//! wild; callers who need the double-quoted line edited must address it in
//! that exact spelling. It also means the match is a latent footgun when a
//! file mixes quote styles — prefer single quotes throughout.

use std::path::Path;

use regex::Regex;

use crate::error::PhpsetError;
use crate::tree::SettingsTree;

/// Pure function: patch settings-file text, applying every leaf in `tree`.
///
/// `content` of `None` (file doesn't exist yet) starts from an empty buffer.
/// The result always begins with `<?php\n` (inserted when absent) and ends
/// with a newline. For each leaf, in tree order:
///
/// - a line whose left-hand side exactly matches the leaf's variable
///   expression is replaced in place, all other lines untouched;
/// - with no match, the assignment is appended at end-of-file if the leaf is
///   required, and dropped otherwise.
///
/// Returns the modified document string.
pub fn rewrite_settings(
    content: Option<&str>,
    tree: &SettingsTree,
) -> Result<String, PhpsetError> {
    let mut buffer = content.map(str::to_string).unwrap_or_default();

    if !buffer.starts_with("<?php") {
        buffer.insert_str(0, "<?php\n");
    }

    for (expr, setting) in tree.leaves() {
        let mut line = format!("{expr} = {};", setting.value.to_php()?);
        if let Some(comment) = &setting.comment {
            line.push_str(" // ");
            line.push_str(comment);
        }

        // Anchored per line: optional indent, the literal expression, then
        // `=`. The trailing `.*$` spans the rest of the old line so the whole
        // line is replaced.
        let pattern = Regex::new(&format!(
            r"(?m)^[ \t]*{}[ \t]*=.*$",
            regex::escape(&expr)
        ))
        .expect("escaped literal is a valid regex");

        if let Some(range) = pattern.find(&buffer).map(|found| found.range()) {
            buffer.replace_range(range, &line);
        } else if setting.required {
            if !buffer.ends_with('\n') {
                buffer.push('\n');
            }
            buffer.push_str(&line);
            buffer.push('\n');
        } else {
            log::debug!("no existing assignment for {expr} and not required; skipping");
        }
    }

    if !buffer.ends_with('\n') {
        buffer.push('\n');
    }
    Ok(buffer)
}

/// I/O wrapper: reads the settings file (a missing file is treated as
/// empty), patches it, and overwrites it with the full new buffer.
///
/// Fails with [`PhpsetError::Io`] when the path can't be read or written —
/// including a missing or unwritable parent directory. The write is a plain
/// whole-buffer overwrite; atomicity is whatever the platform gives you, and
/// the contract assumes no concurrent writer.
pub fn rewrite_file(path: &Path, tree: &SettingsTree) -> Result<(), PhpsetError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => Some(c),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(PhpsetError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let new_content = rewrite_settings(content.as_deref(), tree)?;

    std::fs::write(path, &new_content).map_err(|e| PhpsetError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Setting;
    use crate::value::PhpValue;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn replaces_scalar_in_place() {
        let tree = SettingsTree::new().set(
            "no_index_value_scalar",
            Setting::new(false).comment("comment"),
        );
        let result =
            rewrite_settings(Some("<?php\n$no_index_value_scalar = TRUE;\n"), &tree).unwrap();
        assert_eq!(result, "<?php\n$no_index_value_scalar = false; // comment\n");
    }

    #[test]
    fn required_nested_leaf_appends_on_miss() {
        let tree = SettingsTree::new().set_nested(
            &["no_index_value_foo", "foo", "value"],
            Setting::new(PhpValue::Null).required(true).comment("comment"),
        );
        let result =
            rewrite_settings(Some("<?php\n$no_index_value_scalar = TRUE;\n"), &tree).unwrap();
        assert_eq!(
            result,
            "<?php\n$no_index_value_scalar = TRUE;\n\
             $no_index_value_foo['foo']['value'] = NULL; // comment\n"
        );
    }

    #[test]
    fn array_valued_original_is_replaced_by_matching_lhs() {
        let tree = SettingsTree::new().set(
            "no_index_value_array",
            Setting::new(false).required(true).comment("comment"),
        );
        let result = rewrite_settings(
            Some("<?php\n$no_index_value_array = array(\"old\" => \"value\");\n"),
            &tree,
        )
        .unwrap();
        assert_eq!(result, "<?php\n$no_index_value_array = false; // comment\n");
    }

    #[test]
    fn double_quoted_indexes_do_not_match_single_quoted_target() {
        let tree = SettingsTree::new().set_nested(
            &["has_index_value_scalar", "foo", "bar"],
            Setting::new(false).required(true).comment("comment"),
        );
        let result = rewrite_settings(
            Some("<?php\n$has_index_value_scalar[\"foo\"][\"bar\"] = NULL;\n"),
            &tree,
        )
        .unwrap();
        // The existing line is untouched; the single-quoted form is appended.
        assert_eq!(
            result,
            "<?php\n$has_index_value_scalar[\"foo\"][\"bar\"] = NULL;\n\
             $has_index_value_scalar['foo']['bar'] = false; // comment\n"
        );
    }

    #[test]
    fn appended_array_value_is_multi_line_with_trailing_comment() {
        let tree = SettingsTree::new().set_nested(
            &["has_index_value_scalar", "foo", "value"],
            Setting::new(PhpValue::Array(vec![("value".into(), PhpValue::Int(2))]))
                .required(true)
                .comment("comment"),
        );
        let result = rewrite_settings(
            Some("<?php\n$has_index_value_scalar[\"foo\"][\"bar\"] = \"foo\";\n"),
            &tree,
        )
        .unwrap();
        assert_eq!(
            result,
            "<?php\n$has_index_value_scalar[\"foo\"][\"bar\"] = \"foo\";\n\
             $has_index_value_scalar['foo']['value'] = array (\n  'value' => 2,\n); // comment\n"
        );
    }

    #[test]
    fn empty_content_gets_opening_tag() {
        let tree = SettingsTree::new().set("no_index", Setting::new(true).required(true));
        let result = rewrite_settings(Some(""), &tree).unwrap();
        assert_eq!(result, "<?php\n$no_index = true;\n");
    }

    #[test]
    fn missing_content_behaves_like_empty() {
        let tree = SettingsTree::new().set("no_index", Setting::new(true).required(true));
        assert_eq!(
            rewrite_settings(None, &tree).unwrap(),
            rewrite_settings(Some(""), &tree).unwrap()
        );
    }

    #[test]
    fn opening_tag_inserted_before_existing_content() {
        let tree = SettingsTree::new().set("x", Setting::new(1));
        let result = rewrite_settings(Some("$x = 2;\n"), &tree).unwrap();
        assert_eq!(result, "<?php\n$x = 1;\n");
    }

    #[test]
    fn non_required_miss_is_a_noop() {
        let tree = SettingsTree::new().set("absent", Setting::new(true));
        let original = "<?php\n$present = 1;\n";
        let result = rewrite_settings(Some(original), &tree).unwrap();
        assert_eq!(result, original);
    }

    #[test]
    fn replacement_preserves_position_and_neighbors() {
        let tree = SettingsTree::new().set("middle", Setting::new("new"));
        let result = rewrite_settings(
            Some("<?php\n$first = 1;\n$middle = 'old';\n$last = 3;\n"),
            &tree,
        )
        .unwrap();
        assert_eq!(result, "<?php\n$first = 1;\n$middle = 'new';\n$last = 3;\n");
    }

    #[test]
    fn variable_name_prefix_does_not_match() {
        // $x must not match $xy or $x['sub'].
        let tree = SettingsTree::new().set("x", Setting::new(1).required(true));
        let result = rewrite_settings(Some("<?php\n$xy = 2;\n$x['sub'] = 3;\n"), &tree).unwrap();
        assert_eq!(result, "<?php\n$xy = 2;\n$x['sub'] = 3;\n$x = 1;\n");
    }

    #[test]
    fn rewrite_is_idempotent_for_matched_leaves() {
        let tree = SettingsTree::new().set("x", Setting::new(false).comment("why"));
        let once = rewrite_settings(Some("<?php\n$x = TRUE;\n"), &tree).unwrap();
        let twice = rewrite_settings(Some(&once), &tree).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn second_pass_replaces_a_previously_appended_line() {
        // First pass appends because the double-quoted original doesn't
        // match; the second pass finds the appended single-quoted line and
        // replaces it in place, so the content stabilizes.
        let tree = SettingsTree::new().set_nested(
            &["v", "foo"],
            Setting::new(1).required(true),
        );
        let once = rewrite_settings(Some("<?php\n$v[\"foo\"] = 0;\n"), &tree).unwrap();
        assert_eq!(once, "<?php\n$v[\"foo\"] = 0;\n$v['foo'] = 1;\n");
        let twice = rewrite_settings(Some(&once), &tree).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn serialization_failure_propagates() {
        let tree = SettingsTree::new().set("bad", Setting::new(f64::NAN).required(true));
        let result = rewrite_settings(Some("<?php\n"), &tree);
        assert!(matches!(result, Err(PhpsetError::Serialize { .. })));
    }

    // --- rewrite_file ---

    #[test]
    fn file_is_created_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");

        let tree = SettingsTree::new().set("no_index", Setting::new(true).required(true));
        rewrite_file(&path, &tree).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<?php\n$no_index = true;\n");
    }

    #[test]
    fn existing_file_is_patched_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        fs::write(&path, "<?php\n$x = TRUE;\n$keep = 1;\n").unwrap();

        let tree = SettingsTree::new().set("x", Setting::new(false));
        rewrite_file(&path, &tree).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<?php\n$x = false;\n$keep = 1;\n"
        );
    }

    #[test]
    fn missing_parent_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("settings.php");

        let tree = SettingsTree::new().set("x", Setting::new(1).required(true));
        let result = rewrite_file(&path, &tree);
        assert!(matches!(result, Err(PhpsetError::Io { .. })));
    }

    #[test]
    fn path_that_is_a_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();

        let tree = SettingsTree::new().set("x", Setting::new(1).required(true));
        let result = rewrite_file(dir.path(), &tree);
        assert!(matches!(result, Err(PhpsetError::Io { .. })));
    }
}
