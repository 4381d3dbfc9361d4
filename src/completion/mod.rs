//! Completion domain: `{{variable}}` suggestions for the prompt editor.
//!
//! Pipeline, run on every relevant edit:
//!   - cursor.rs    is the cursor inside an open `{{`, and what was typed?
//!   - resolver.rs  which catalog nodes match the typed path?
//!   - render.rs    what text does each match insert?
//!
//! Everything here is pure and synchronous: same buffer and cursor in,
//! same suggestions out. Nothing is cached between keystrokes.

pub mod cursor;
pub mod render;
pub mod resolver;

pub use cursor::{analyze, CursorContext};
pub use render::{render_entry, transition, BraceState, CompletionEntry, NodeKind};
pub use resolver::{resolve, Resolution};

use crate::catalog::VariableCatalog;
use serde::Serialize;
use std::ops::Range;
use std::sync::Arc;

/// Suggestions for one cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionList {
    pub entries: Vec<CompletionEntry>,
    /// Byte range of the buffer an accepted entry replaces.
    pub replace_range: Range<usize>,
}

impl SuggestionList {
    fn none(cursor: usize) -> Self {
        Self {
            entries: Vec::new(),
            replace_range: cursor..cursor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Splice `entry` into `buffer`, returning the new text and cursor.
    ///
    /// `buffer` must be the text these suggestions were computed from.
    pub fn apply(&self, buffer: &str, entry: &CompletionEntry) -> (String, usize) {
        let end = cursor::clamp_cursor(buffer, self.replace_range.end);
        let start = cursor::clamp_cursor(buffer, self.replace_range.start.min(end));

        let mut out = String::with_capacity(buffer.len() + entry.insert_text.len());
        out.push_str(&buffer[..start]);
        out.push_str(&entry.insert_text);
        out.push_str(&buffer[end..]);
        (out, start + entry.insert_text.len())
    }
}

/// Suggestions for `buffer` at byte offset `cursor`.
///
/// Empty when the cursor is not inside an open delimiter or nothing matches.
pub fn suggest(buffer: &str, cursor: usize, catalog: &VariableCatalog) -> SuggestionList {
    let ctx = analyze(buffer, cursor);
    if !ctx.has_open_delimiter() {
        return SuggestionList::none(ctx.cursor);
    }

    let resolution = resolve(catalog, &ctx.partial_path, ctx.ends_with_dot);
    log::trace!(
        "[COMPLETION] path={:?} dot={} -> {} matches (nested={})",
        ctx.partial_path,
        ctx.ends_with_dot,
        resolution.nodes.len(),
        resolution.is_nested
    );

    SuggestionList {
        entries: resolution
            .nodes
            .iter()
            .map(|node| render_entry(node, ctx.brace, resolution.is_nested))
            .collect(),
        replace_range: ctx.replace_start..ctx.cursor,
    }
}

/// Root variables rendered for insertion outside any delimiter, for the
/// editor's "insert variable" menu.
pub fn picker_entries(catalog: &VariableCatalog) -> Vec<CompletionEntry> {
    catalog
        .roots()
        .iter()
        .map(|node| render_entry(node, BraceState::NoDelimiter, false))
        .collect()
}

/// Completion front end holding the process-wide catalog.
///
/// Built once at start-up (see `crate::init`) and cloned into whichever
/// editor surface needs it.
#[derive(Debug, Clone)]
pub struct Completer {
    catalog: Arc<VariableCatalog>,
}

impl Completer {
    pub fn new(catalog: VariableCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    pub fn suggest(&self, buffer: &str, cursor: usize) -> SuggestionList {
        suggest(buffer, cursor, &self.catalog)
    }

    pub fn picker_entries(&self) -> Vec<CompletionEntry> {
        picker_entries(&self.catalog)
    }
}

impl Default for Completer {
    fn default() -> Self {
        Self::new(VariableCatalog::builtin())
    }
}
