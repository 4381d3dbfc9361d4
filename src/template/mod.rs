//! Prompt templates: the interpolation half of the variable engine.
//!
//! A saved prompt references context with `{{path}}` (or the raw
//! `{{{path}}}` form). Before a prompt runs, the host asks which variables
//! it needs (`referenced_paths`), captures them, and renders the text.
//! `\{{...}}` escapes a delimiter and renders it literally; `\\{{...}}` is a
//! literal backslash followed by a live reference.
//!
//! Output is plain text: nothing is HTML-escaped.

mod values;

pub use values::TemplateValues;

use crate::catalog::VariableCatalog;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::OnceLock;

/// Matches `{{{path}}}` or `{{path}}` with any backslashes directly before it.
const REFERENCE_PATTERN: &str = r"(\\*)(?:\{\{\{\s*([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*\}\}\}|\{\{\s*([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*\}\})";

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern compiles"))
}

/// A `{{path}}` occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableReference {
    pub path: String,
    /// Byte span of the whole delimiter, braces included.
    pub span: Range<usize>,
}

/// Problems `validate` reports against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TemplateIssue {
    UnknownVariable { path: String, span: Range<usize> },
    NamespaceReference { path: String, span: Range<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Missing values render as empty text.
    #[default]
    Lenient,
    /// Missing values are an error.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("no value for template variable '{path}'")]
    MissingValue { path: String },
}

/// One regex match, classified.
struct Matched<'t> {
    /// Whole match, leading backslashes included.
    range: Range<usize>,
    /// Backslashes that render as text. Rendering consumes one of a run.
    backslashes: &'t str,
    token: Token<'t>,
}

enum Token<'t> {
    /// Delimiter text to render literally.
    Escaped(&'t str),
    Reference { path: &'t str, span: Range<usize> },
}

fn classify<'t>(caps: &Captures<'t>) -> Option<Matched<'t>> {
    let whole = caps.get(0)?;
    let path = caps.get(2).or_else(|| caps.get(3))?.as_str();
    let run = caps.get(1).map_or(0, |m| m.len());
    let text = whole.as_str();

    // Odd run: the last backslash escapes the delimiter.
    let token = if run % 2 == 1 {
        Token::Escaped(&text[run..])
    } else {
        Token::Reference {
            path,
            span: whole.start() + run..whole.end(),
        }
    };
    Some(Matched {
        range: whole.range(),
        backslashes: &text[..run.saturating_sub(1)],
        token,
    })
}

/// Every unescaped reference in source order.
pub fn extract_references(template: &str) -> Vec<VariableReference> {
    reference_regex()
        .captures_iter(template)
        .filter_map(|caps| match classify(&caps)?.token {
            Token::Reference { path, span } => Some(VariableReference {
                path: path.to_string(),
                span,
            }),
            Token::Escaped(_) => None,
        })
        .collect()
}

/// Distinct referenced paths, first occurrence first.
pub fn referenced_paths(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_references(template)
        .into_iter()
        .filter(|r| seen.insert(r.path.clone()))
        .map(|r| r.path)
        .collect()
}

/// Check every reference against `catalog`. Empty means the template is valid.
pub fn validate(template: &str, catalog: &VariableCatalog) -> Vec<TemplateIssue> {
    extract_references(template)
        .into_iter()
        .filter_map(|r| match catalog.lookup_dotted(&r.path) {
            None => Some(TemplateIssue::UnknownVariable {
                path: r.path,
                span: r.span,
            }),
            Some(node) if node.is_namespace() => Some(TemplateIssue::NamespaceReference {
                path: r.path,
                span: r.span,
            }),
            Some(_) => None,
        })
        .collect()
}

/// Substitute captured values into `template`.
pub fn render(
    template: &str,
    values: &TemplateValues,
    mode: RenderMode,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut missing = 0usize;

    for caps in reference_regex().captures_iter(template) {
        let Some(matched) = classify(&caps) else {
            continue;
        };
        out.push_str(&template[last..matched.range.start]);
        out.push_str(matched.backslashes);
        match matched.token {
            Token::Escaped(literal) => out.push_str(literal),
            Token::Reference { path, .. } => match values.lookup(path) {
                Some(text) => out.push_str(&text),
                None if mode == RenderMode::Strict => {
                    return Err(TemplateError::MissingValue {
                        path: path.to_string(),
                    });
                }
                None => missing += 1,
            },
        }
        last = matched.range.end;
    }
    out.push_str(&template[last..]);

    if missing > 0 {
        log::debug!("[TEMPLATE] Rendered with {} missing value(s) left empty", missing);
    }
    Ok(out)
}
