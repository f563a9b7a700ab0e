//! The settings tree: which variables to write, and how.
//!
//! A [`SettingsTree`] maps top-level variable names to either a [`Setting`]
//! leaf (a plain `$var = ...;` assignment) or a branch of further keys (a
//! nested-index assignment like `$var['a']['b'] = ...;`). Leaf versus branch
//! is fixed at construction time by the [`SettingNode`] variant — there is no
//! shape-sniffing during traversal.
//!
//! Insertion order is significant: [`SettingsTree::leaves`] walks top-level
//! names in the order they were added, descending depth-first, and the
//! rewriter emits appended assignments in exactly that order.

use crate::value::PhpValue;

/// One assignment target: the value to write, whether to append when no
/// existing assignment matches, and an optional trailing comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub(crate) value: PhpValue,
    pub(crate) required: bool,
    pub(crate) comment: Option<String>,
}

impl Setting {
    /// A setting that replaces an existing assignment but is dropped when no
    /// assignment matches. Opt into append-on-miss with [`required`](Self::required).
    pub fn new(value: impl Into<PhpValue>) -> Self {
        Self {
            value: value.into(),
            required: false,
            comment: None,
        }
    }

    /// When `true`, the assignment is appended at end-of-file if no existing
    /// line matches. Defaults to `false`: a miss is a silent no-op.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Trailing `// ...` comment on the emitted assignment line.
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

/// A node in the settings tree: either a leaf assignment or a branch of
/// further index keys.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingNode {
    Leaf(Setting),
    Branch(Vec<(String, SettingNode)>),
}

/// An ordered tree of assignments to apply to a settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsTree {
    roots: Vec<(String, SettingNode)>,
}

impl SettingsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a top-level variable: `set("x", ...)` addresses `$x`.
    ///
    /// Setting a name that was already set replaces the earlier node.
    pub fn set(self, name: &str, setting: Setting) -> Self {
        self.set_nested(&[name], setting)
    }

    /// Target a nested index chain: `set_nested(&["db", "host"], ...)`
    /// addresses `$db['host']`. The first path segment is the variable name,
    /// the rest are array indexes.
    ///
    /// Paths sharing a prefix merge into one branch. Writing to a path that
    /// already holds a node (leaf or branch) replaces it; later writes win.
    /// An empty path is a no-op.
    pub fn set_nested(mut self, path: &[&str], setting: Setting) -> Self {
        if !path.is_empty() {
            insert(&mut self.roots, path, setting);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// All leaves, depth-first in insertion order, each paired with its PHP
    /// variable expression (`$name` or `$name['a']['b']`, single-quoted).
    pub fn leaves(&self) -> Vec<(String, &Setting)> {
        let mut out = Vec::new();
        for (name, node) in &self.roots {
            collect(&format!("${name}"), node, &mut out);
        }
        out
    }
}

fn insert(children: &mut Vec<(String, SettingNode)>, path: &[&str], setting: Setting) {
    let (head, rest) = path.split_first().expect("insert called with empty path");
    let pos = children.iter().position(|(key, _)| key == head);

    if rest.is_empty() {
        let node = SettingNode::Leaf(setting);
        match pos {
            Some(i) => children[i].1 = node,
            None => children.push((head.to_string(), node)),
        }
        return;
    }

    let idx = match pos {
        Some(i) => {
            if !matches!(children[i].1, SettingNode::Branch(_)) {
                // A leaf in the way of a deeper path is replaced by a branch.
                children[i].1 = SettingNode::Branch(Vec::new());
            }
            i
        }
        None => {
            children.push((head.to_string(), SettingNode::Branch(Vec::new())));
            children.len() - 1
        }
    };

    if let SettingNode::Branch(grandchildren) = &mut children[idx].1 {
        insert(grandchildren, rest, setting);
    }
}

fn collect<'a>(expr: &str, node: &'a SettingNode, out: &mut Vec<(String, &'a Setting)>) {
    match node {
        SettingNode::Leaf(setting) => out.push((expr.to_string(), setting)),
        SettingNode::Branch(children) => {
            for (key, child) in children {
                collect(&format!("{expr}['{key}']"), child, out);
            }
        }
    }
}
