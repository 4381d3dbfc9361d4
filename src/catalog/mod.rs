//! Variable catalog: the tree of context variables a prompt can reference.
//!
//! Public API for the catalog domain:
//!   - mod.rs     VariableNode / VariableCatalog + the built-in catalog
//!   - loader.rs  parse and validate a user-supplied catalog JSON file
//!
//! The catalog is built once at start-up and never mutated afterwards.
//! Callers hold it behind an `Arc` (see `completion::Completer`).

pub mod loader;

pub use loader::{load_catalog_file, parse_catalog, CatalogError};

use serde::Serialize;

/// A single catalog entry.
///
/// A namespace groups child variables under a dotted prefix (`env.*`) and is
/// never inserted on its own; a leaf is a final, insertable token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VariableNode {
    Leaf {
        label: String,
        token: String,
        description: Option<String>,
    },
    Namespace {
        label: String,
        token: String,
        description: Option<String>,
        children: Vec<VariableNode>,
    },
}

impl VariableNode {
    pub fn leaf(label: &str, token: &str, description: Option<&str>) -> Self {
        VariableNode::Leaf {
            label: label.to_string(),
            token: token.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn namespace(
        label: &str,
        token: &str,
        description: Option<&str>,
        children: Vec<VariableNode>,
    ) -> Self {
        VariableNode::Namespace {
            label: label.to_string(),
            token: token.to_string(),
            description: description.map(str::to_string),
            children,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            VariableNode::Leaf { label, .. } | VariableNode::Namespace { label, .. } => label,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            VariableNode::Leaf { token, .. } | VariableNode::Namespace { token, .. } => token,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            VariableNode::Leaf { description, .. }
            | VariableNode::Namespace { description, .. } => description.as_deref(),
        }
    }

    /// Children of a namespace; `None` for leaves.
    pub fn children(&self) -> Option<&[VariableNode]> {
        match self {
            VariableNode::Leaf { .. } => None,
            VariableNode::Namespace { children, .. } => Some(children),
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, VariableNode::Namespace { .. })
    }
}

/// Ordered root of the variable tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableCatalog {
    roots: Vec<VariableNode>,
}

impl VariableCatalog {
    /// Wrap already-validated root nodes.
    ///
    /// Use `loader::parse_catalog` for untrusted input.
    pub fn new(roots: Vec<VariableNode>) -> Self {
        Self { roots }
    }

    /// The catalog shipped with the editor.
    pub fn builtin() -> Self {
        Self::new(vec![
            VariableNode::leaf(
                "Audio",
                "audio",
                Some("Transcript of the most recent audio recording"),
            ),
            VariableNode::leaf(
                "User Message",
                "userMessage",
                Some("The message typed when the shortcut was run"),
            ),
            VariableNode::namespace(
                "Environment",
                "env",
                Some("Context captured from the desktop"),
                vec![
                    VariableNode::leaf(
                        "Clipboard Text",
                        "clipboardText",
                        Some("Current text contents of the clipboard"),
                    ),
                    VariableNode::leaf(
                        "Screen Text",
                        "ocrScreenContents",
                        Some("Text recognized on screen via OCR"),
                    ),
                    VariableNode::leaf(
                        "Open Windows",
                        "openWindows",
                        Some("Titles of the windows currently open"),
                    ),
                    VariableNode::leaf(
                        "App Text",
                        "appText",
                        Some("Text of the focused application"),
                    ),
                    VariableNode::leaf(
                        "Screenshot",
                        "screenshot",
                        Some("Screenshot of the active display"),
                    ),
                ],
            ),
        ])
    }

    pub fn roots(&self) -> &[VariableNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Walk the tree by exact token equality.
    ///
    /// Returns `None` when a segment is unmatched, when a leaf is walked
    /// through, or when `path` is empty.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&VariableNode> {
        let (first, rest) = path.split_first()?;
        let mut node = find_child(&self.roots, first.as_ref())?;
        for segment in rest {
            node = find_child(node.children()?, segment.as_ref())?;
        }
        Some(node)
    }

    /// Look up a dotted path such as `env.clipboardText`.
    pub fn lookup_dotted(&self, path: &str) -> Option<&VariableNode> {
        let segments: Vec<&str> = path.split('.').collect();
        self.lookup(&segments)
    }

    /// Every insertable variable as a dotted path, in declaration order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_leaf_paths(&self.roots, "", &mut out);
        out
    }
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// First node among `nodes` whose token equals `token`.
pub(crate) fn find_child<'a>(nodes: &'a [VariableNode], token: &str) -> Option<&'a VariableNode> {
    nodes.iter().find(|n| n.token() == token)
}

fn collect_leaf_paths(nodes: &[VariableNode], prefix: &str, out: &mut Vec<String>) {
    for node in nodes {
        let path = if prefix.is_empty() {
            node.token().to_string()
        } else {
            format!("{}.{}", prefix, node.token())
        };
        match node.children() {
            Some(children) => collect_leaf_paths(children, &path, out),
            None => out.push(path),
        }
    }
}
