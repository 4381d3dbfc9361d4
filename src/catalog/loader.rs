//! Catalog file parser and validator.
//!
//! A user can replace the built-in variable catalog with a JSON file:
//!
//! ```json
//! [
//!   { "label": "Audio", "token": "audio" },
//!   { "label": "Environment", "token": "env", "children": [
//!       { "label": "Clipboard Text", "token": "clipboardText",
//!         "description": "Current clipboard text" }
//!   ] }
//! ]
//! ```
//!
//! Entries with a `children` array become namespaces, everything else a leaf.

use crate::catalog::{VariableCatalog, VariableNode};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Why a catalog file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog must declare at least one variable")]
    Empty,
    #[error("invalid token '{token}' at '{path}': tokens are non-empty and use only letters, digits and '_'")]
    InvalidToken { path: String, token: String },
    #[error("duplicate token '{token}' under '{parent}'")]
    DuplicateToken { parent: String, token: String },
    #[error("namespace '{path}' has no children")]
    EmptyNamespace { path: String },
    #[error("variable '{path}' has an empty label")]
    EmptyLabel { path: String },
}

/// On-disk shape of a catalog entry, before validation.
#[derive(Debug, Deserialize)]
struct RawNode {
    label: String,
    token: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

/// Parse and validate catalog JSON.
pub fn parse_catalog(raw: &str) -> Result<VariableCatalog, CatalogError> {
    let nodes: Vec<RawNode> = serde_json::from_str(raw)?;
    if nodes.is_empty() {
        return Err(CatalogError::Empty);
    }
    let roots = convert_level(nodes, "")?;
    Ok(VariableCatalog::new(roots))
}

/// Read, parse and validate a catalog file.
pub fn load_catalog_file(path: &Path) -> Result<VariableCatalog, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&raw)?;
    log::info!(
        "[CATALOG] Loaded {} variables from {}",
        catalog.leaf_paths().len(),
        path.display()
    );
    Ok(catalog)
}

/// Validate one sibling level and convert it into typed nodes.
fn convert_level(nodes: Vec<RawNode>, parent: &str) -> Result<Vec<VariableNode>, CatalogError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(nodes.len());

    for raw in nodes {
        let path = if parent.is_empty() {
            raw.token.clone()
        } else {
            format!("{}.{}", parent, raw.token)
        };

        if !is_valid_token(&raw.token) {
            return Err(CatalogError::InvalidToken {
                path,
                token: raw.token,
            });
        }
        if raw.label.trim().is_empty() {
            return Err(CatalogError::EmptyLabel { path });
        }
        if !seen.insert(raw.token.clone()) {
            let parent = if parent.is_empty() { "<root>" } else { parent };
            return Err(CatalogError::DuplicateToken {
                parent: parent.to_string(),
                token: raw.token,
            });
        }

        let node = match raw.children {
            Some(children) if children.is_empty() => {
                return Err(CatalogError::EmptyNamespace { path });
            }
            Some(children) => VariableNode::Namespace {
                children: convert_level(children, &path)?,
                label: raw.label,
                token: raw.token,
                description: raw.description,
            },
            None => VariableNode::Leaf {
                label: raw.label,
                token: raw.token,
                description: raw.description,
            },
        };
        out.push(node);
    }

    Ok(out)
}

/// Tokens must survive the `{{a.b}}` syntax unchanged: no dots, braces or spaces.
fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
