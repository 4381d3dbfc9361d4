//! Suggestion renderer: turns a matched catalog node into insertable text.
//!
//! Brace insertion is a small state machine over how much of the opening
//! `{{` is already in the buffer:
//!
//! | state           | namespace            | leaf                       |
//! |-----------------|----------------------|----------------------------|
//! | NoDelimiter     | `{{tok.` → Double    | `{{tok}} ` → NoDelimiter   |
//! | SingleBraceOpen | `{tok.`  → Double    | `{tok}} `  → NoDelimiter   |
//! | DoubleBraceOpen | `tok.`   → Double    | `tok}} `   → NoDelimiter   |
//! | TripleBraceOpen | `tok.`   → Triple    | `tok}}} `  → NoDelimiter   |
//!
//! Namespaces leave the delimiter open so the follow-up pass can list their
//! children; leaves close it with as many braces as opened it. The trailing
//! space separates the variable from whatever the user types next.

use crate::catalog::VariableNode;
use serde::Serialize;

/// How much of the opening delimiter precedes the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceState {
    NoDelimiter,
    SingleBraceOpen,
    DoubleBraceOpen,
    /// Raw `{{{` form.
    TripleBraceOpen,
}

impl BraceState {
    /// Braces still needed to form a full `{{`.
    fn missing_braces(self) -> &'static str {
        match self {
            BraceState::NoDelimiter => "{{",
            BraceState::SingleBraceOpen => "{",
            BraceState::DoubleBraceOpen | BraceState::TripleBraceOpen => "",
        }
    }

    fn closing_braces(self) -> &'static str {
        match self {
            BraceState::TripleBraceOpen => "}}}",
            _ => "}}",
        }
    }

    /// State once a namespace has been inserted: the delimiter stays open.
    fn after_namespace(self) -> Self {
        match self {
            BraceState::TripleBraceOpen => BraceState::TripleBraceOpen,
            _ => BraceState::DoubleBraceOpen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Namespace,
}

impl NodeKind {
    pub fn of(node: &VariableNode) -> Self {
        match node {
            VariableNode::Leaf { .. } => NodeKind::Leaf,
            VariableNode::Namespace { .. } => NodeKind::Namespace,
        }
    }
}

/// Pure transition: text to insert for `token` and the state after insertion.
pub fn transition(state: BraceState, kind: NodeKind, token: &str) -> (String, BraceState) {
    let prefix = state.missing_braces();
    match kind {
        NodeKind::Namespace => (format!("{}{}.", prefix, token), state.after_namespace()),
        NodeKind::Leaf => (
            format!("{}{}{} ", prefix, token, state.closing_braces()),
            BraceState::NoDelimiter,
        ),
    }
}

/// A single completion shown in the prompt editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntry {
    pub label: String,
    pub detail: Option<String>,
    pub insert_text: String,
    /// Namespaces ask the host to open the completion list again right away.
    pub triggers_followup_suggestion: bool,
}

/// Render `node` for insertion at the cursor.
///
/// `is_nested` means the match sits below a namespace the user already typed,
/// so the opening braces are in the buffer whatever `state` says.
pub fn render_entry(node: &VariableNode, state: BraceState, is_nested: bool) -> CompletionEntry {
    let state = if is_nested {
        state.after_namespace()
    } else {
        state
    };
    let kind = NodeKind::of(node);
    let (insert_text, _) = transition(state, kind, node.token());

    CompletionEntry {
        label: node.label().to_string(),
        detail: node.description().map(str::to_string),
        insert_text,
        triggers_followup_suggestion: kind == NodeKind::Namespace,
    }
}
