//! The PHP value model: typed values and their literal rendering.
//!
//! [`PhpValue`] covers everything a settings assignment can carry — scalars,
//! `NULL`, and (possibly nested) associative arrays. Rendering follows PHP's
//! `var_export()` conventions: lowercase booleans, uppercase `NULL`,
//! single-quoted strings, and the multi-line `array (...)` layout, so output
//! lines look exactly like hand-written settings-file entries.

use serde::{Deserialize, Serialize};

use crate::error::PhpsetError;

/// A value assignable to a PHP settings variable.
///
/// Array entries are kept as an ordered key/value list, not a map: the order
/// keys were inserted in is the order they are written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<(String, PhpValue)>),
}

impl PhpValue {
    /// Render this value as a PHP literal.
    ///
    /// Scalars render inline; arrays use the multi-line `var_export` form:
    ///
    /// ```text
    /// array (
    ///   'key' => 'value',
    /// )
    /// ```
    ///
    /// The only unrepresentable values in the typed model are non-finite
    /// floats (`NaN`, `±inf`), which PHP has no literal syntax for — those
    /// return [`PhpsetError::Serialize`].
    pub fn to_php(&self) -> Result<String, PhpsetError> {
        let mut out = String::new();
        self.render(&mut out, 0)?;
        Ok(out)
    }

    fn render(&self, out: &mut String, indent: usize) -> Result<(), PhpsetError> {
        match self {
            PhpValue::Null => out.push_str("NULL"),
            PhpValue::Bool(true) => out.push_str("true"),
            PhpValue::Bool(false) => out.push_str("false"),
            PhpValue::Int(i) => out.push_str(&i.to_string()),
            PhpValue::Float(f) => {
                if !f.is_finite() {
                    return Err(PhpsetError::Serialize {
                        reason: format!("non-finite float {f}"),
                    });
                }
                let s = f.to_string();
                out.push_str(&s);
                // PHP renders floats with a fractional part even when whole.
                if !s.contains(['.', 'e', 'E']) {
                    out.push_str(".0");
                }
            }
            PhpValue::String(s) => out.push_str(&quote(s)),
            PhpValue::Array(entries) => {
                out.push_str("array (\n");
                for (key, value) in entries {
                    push_spaces(out, indent + 2);
                    out.push_str(&key_literal(key));
                    out.push_str(" => ");
                    if matches!(value, PhpValue::Array(_)) {
                        // var_export puts nested arrays on their own line,
                        // aligned with the key.
                        out.push('\n');
                        push_spaces(out, indent + 2);
                        value.render(out, indent + 2)?;
                    } else {
                        value.render(out, indent)?;
                    }
                    out.push_str(",\n");
                }
                push_spaces(out, indent);
                out.push(')');
            }
        }
        Ok(())
    }
}

/// Single-quote a string, escaping backslashes and quotes (var_export style).
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Render an array key: integer-like keys stay bare (PHP casts them to int
/// keys anyway), everything else is quoted.
fn key_literal(key: &str) -> String {
    match key.parse::<i64>() {
        Ok(i) if i.to_string() == key => key.to_string(),
        _ => quote(key),
    }
}

fn push_spaces(out: &mut String, n: usize) {
    for _ in 0..n {
        out.push(' ');
    }
}

impl From<bool> for PhpValue {
    fn from(b: bool) -> Self {
        PhpValue::Bool(b)
    }
}

impl From<i64> for PhpValue {
    fn from(i: i64) -> Self {
        PhpValue::Int(i)
    }
}

impl From<i32> for PhpValue {
    fn from(i: i32) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<u32> for PhpValue {
    fn from(i: u32) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<f64> for PhpValue {
    fn from(f: f64) -> Self {
        PhpValue::Float(f)
    }
}

impl From<&str> for PhpValue {
    fn from(s: &str) -> Self {
        PhpValue::String(s.to_string())
    }
}

impl From<String> for PhpValue {
    fn from(s: String) -> Self {
        PhpValue::String(s)
    }
}

impl<T: Into<PhpValue>> From<Option<T>> for PhpValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => PhpValue::Null,
        }
    }
}

/// Lossless mapping from JSON-shaped data.
///
/// Objects become associative arrays in the map's iteration order; JSON
/// arrays become arrays keyed `0`, `1`, ... matching PHP's list semantics.
impl From<serde_json::Value> for PhpValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => PhpValue::Null,
            serde_json::Value::Bool(b) => PhpValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PhpValue::Int(i),
                None => PhpValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => PhpValue::String(s),
            serde_json::Value::Array(items) => PhpValue::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item.into()))
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                PhpValue::Array(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
