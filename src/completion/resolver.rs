//! Suggestion resolver: matches a typed partial path against the catalog.
//!
//! Three phases, in precedence order:
//!   1. nothing typed yet          → every root variable
//!   2. path ends with `.`         → children of the namespace it names
//!   3. partial trailing segment   → siblings whose token contains it
//!
//! Unmatched segments and leaves yield an empty result, never an error.
//! Matches keep catalog declaration order.

use crate::catalog::{VariableCatalog, VariableNode};

/// Matched nodes plus whether they came from below the catalog root.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub nodes: Vec<&'a VariableNode>,
    pub is_nested: bool,
}

impl<'a> Resolution<'a> {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            is_nested: false,
        }
    }

    fn of(nodes: &'a [VariableNode], is_nested: bool) -> Self {
        Self {
            nodes: nodes.iter().collect(),
            is_nested,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Resolve `partial_path` (as produced by the cursor analyzer) to candidates.
pub fn resolve<'a, S: AsRef<str>>(
    catalog: &'a VariableCatalog,
    partial_path: &[S],
    ends_with_dot: bool,
) -> Resolution<'a> {
    let nothing_typed = partial_path.iter().all(|s| s.as_ref().is_empty());
    if nothing_typed && partial_path.len() <= 1 && !ends_with_dot {
        return Resolution::of(catalog.roots(), false);
    }

    if ends_with_dot {
        let segments = non_empty(partial_path);
        if segments.is_empty() {
            return Resolution::empty();
        }
        return match catalog.lookup(&segments).and_then(VariableNode::children) {
            Some(children) => Resolution::of(children, true),
            None => Resolution::empty(),
        };
    }

    let Some((last, parents)) = partial_path.split_last() else {
        return Resolution::empty();
    };
    let parents = non_empty(parents);
    let (candidates, is_nested) = if parents.is_empty() {
        (catalog.roots(), false)
    } else {
        match catalog.lookup(&parents).and_then(VariableNode::children) {
            Some(children) => (children, true),
            None => return Resolution::empty(),
        }
    };

    // Substring, not prefix: `{{clip` and `{{Text` both find clipboardText.
    let needle = last.as_ref();
    Resolution {
        nodes: candidates
            .iter()
            .filter(|node| node.token().contains(needle))
            .collect(),
        is_nested,
    }
}

fn non_empty<S: AsRef<str>>(segments: &[S]) -> Vec<&str> {
    segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect()
}
