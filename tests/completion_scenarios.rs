//! Integration tests for the completion pipeline.
//!
//! Drives `suggest` the way the prompt editor does: buffer + cursor in,
//! entries out, then splices the chosen entry back and re-analyzes.

use highlight_prompts_lib::catalog::{VariableCatalog, VariableNode};
use highlight_prompts_lib::completion::{analyze, resolve, suggest, SuggestionList};

/// `audio` leaf + `env` namespace with two children.
fn scenario_catalog() -> VariableCatalog {
    VariableCatalog::new(vec![
        VariableNode::leaf("Audio", "audio", Some("Recent audio")),
        VariableNode::namespace(
            "Environment",
            "env",
            None,
            vec![
                VariableNode::leaf("Clipboard Text", "clipboardText", None),
                VariableNode::leaf("Screen Text", "ocrScreenContents", None),
            ],
        ),
    ])
}

fn labels(list: &SuggestionList) -> Vec<&str> {
    list.entries.iter().map(|e| e.label.as_str()).collect()
}

#[test]
fn partial_e_suggests_env_and_inserts_namespace() {
    let catalog = scenario_catalog();
    let buffer = "{{e";
    let list = suggest(buffer, buffer.len(), &catalog);

    assert_eq!(labels(&list), vec!["Environment"]);
    let entry = &list.entries[0];
    assert!(entry.triggers_followup_suggestion);

    let (text, cursor) = list.apply(buffer, entry);
    assert_eq!(text, "{{env.");
    assert_eq!(cursor, text.len());
}

#[test]
fn env_dot_lists_children() {
    let catalog = scenario_catalog();
    let ctx = analyze("{{env.", 6);
    assert!(ctx.ends_with_dot);
    assert_eq!(ctx.partial_path, vec!["env", ""]);

    let res = resolve(&catalog, &ctx.partial_path, ctx.ends_with_dot);
    assert!(res.is_nested);
    let tokens: Vec<&str> = res.nodes.iter().map(|n| n.token()).collect();
    assert_eq!(tokens, vec!["clipboardText", "ocrScreenContents"]);

    let list = suggest("{{env.", 6, &catalog);
    let inserts: Vec<&str> = list.entries.iter().map(|e| e.insert_text.as_str()).collect();
    assert_eq!(inserts, vec!["clipboardText}} ", "ocrScreenContents}} "]);
}

#[test]
fn dot_after_leaf_suggests_nothing() {
    let catalog = scenario_catalog();
    assert!(suggest("{{audio.", 8, &catalog).is_empty());
}

#[test]
fn plain_text_suggests_nothing() {
    let catalog = scenario_catalog();
    let ctx = analyze("hello world", 11);
    assert!(!ctx.has_open_delimiter());
    assert!(suggest("hello world", 11, &catalog).is_empty());
}

#[test]
fn empty_path_returns_roots_in_declared_order() {
    let catalogs = [scenario_catalog(), VariableCatalog::builtin()];
    for catalog in &catalogs {
        let res = resolve(catalog, &[""], false);
        let expected: Vec<&str> = catalog.roots().iter().map(|n| n.token()).collect();
        let got: Vec<&str> = res.nodes.iter().map(|n| n.token()).collect();
        assert_eq!(got, expected);
        assert!(!res.is_nested);
    }
}

#[test]
fn unmatched_segments_never_panic() {
    let catalog = scenario_catalog();
    for buffer in ["{{nope.", "{{nope.x", "{{env.nope.", "{{audio.x", "{{.", "{{.."] {
        let list = suggest(buffer, buffer.len(), &catalog);
        assert!(list.is_empty(), "expected no suggestions for {:?}", buffer);
    }
}

#[test]
fn pipeline_is_idempotent() {
    let catalog = VariableCatalog::builtin();
    for buffer in ["", "{{", "{{e", "{{env.", "{{env.o", "done {{audio}} ", "{x"] {
        let first = suggest(buffer, buffer.len(), &catalog);
        let second = suggest(buffer, buffer.len(), &catalog);
        assert_eq!(first, second);
    }
}

#[test]
fn leaf_insertion_closes_the_delimiter() {
    let catalog = VariableCatalog::builtin();
    for buffer in ["{{au", "Say {{", "{{env.clip", "{{env.", "{us", "{{{au", "{{{env."] {
        let list = suggest(buffer, buffer.len(), &catalog);
        let leaf = list
            .entries
            .iter()
            .find(|e| !e.triggers_followup_suggestion)
            .unwrap_or_else(|| panic!("no leaf suggested for {:?}", buffer));
        let (text, cursor) = list.apply(buffer, leaf);
        assert!(
            !analyze(&text, cursor).has_open_delimiter(),
            "{:?} -> {:?} left the delimiter open",
            buffer,
            text
        );
        assert!(text.ends_with("}} "));
    }
}

#[test]
fn raw_delimiter_closes_with_three_braces() {
    let catalog = VariableCatalog::builtin();
    let buffer = "Raw {{{au";
    let list = suggest(buffer, buffer.len(), &catalog);
    assert_eq!(labels(&list), vec!["Audio"]);

    let (text, cursor) = list.apply(buffer, &list.entries[0]);
    assert_eq!(text, "Raw {{{audio}}} ");
    assert!(!analyze(&text, cursor).has_open_delimiter());

    let refs = highlight_prompts_lib::template::extract_references(&text);
    assert_eq!(refs.len(), 1);
    assert_eq!(&text[refs[0].span.clone()], "{{{audio}}}");
}

#[test]
fn raw_delimiter_survives_namespace_selection() {
    let catalog = VariableCatalog::builtin();
    let buffer = "{{{e";
    let list = suggest(buffer, buffer.len(), &catalog);
    let env = list
        .entries
        .iter()
        .find(|e| e.triggers_followup_suggestion)
        .expect("env namespace offered");
    let (buffer, cursor) = list.apply(buffer, env);
    assert_eq!(buffer, "{{{env.");

    let list = suggest(&buffer, cursor, &catalog);
    let clip = list
        .entries
        .iter()
        .find(|e| e.label == "Clipboard Text")
        .expect("clipboard text offered");
    let (text, cursor) = list.apply(&buffer, clip);
    assert_eq!(text, "{{{env.clipboardText}}} ");
    assert!(!analyze(&text, cursor).has_open_delimiter());
}

#[test]
fn empty_path_segments_are_skipped() {
    let catalog = scenario_catalog();
    assert_eq!(labels(&suggest("{{.au", 5, &catalog)), vec!["Audio"]);
    assert_eq!(
        labels(&suggest("{{env..cl", 9, &catalog)),
        vec!["Clipboard Text"]
    );
}

#[test]
fn namespace_insertion_keeps_the_delimiter_open() {
    let catalog = VariableCatalog::builtin();
    for buffer in ["{{", "{{en", "Note: {{v", "{e"] {
        let list = suggest(buffer, buffer.len(), &catalog);
        let namespace = list
            .entries
            .iter()
            .find(|e| e.triggers_followup_suggestion)
            .unwrap_or_else(|| panic!("no namespace suggested for {:?}", buffer));
        let (text, cursor) = list.apply(buffer, namespace);
        let ctx = analyze(&text, cursor);
        assert!(ctx.has_open_delimiter());
        assert_eq!(ctx.partial_path, vec!["env", ""]);
    }
}

#[test]
fn substring_filter_is_pinned() {
    // `lip` is not a prefix of any token but is contained in clipboardText.
    let catalog = scenario_catalog();
    let list = suggest("{{env.lip", 9, &catalog);
    assert_eq!(labels(&list), vec!["Clipboard Text"]);
}

#[test]
fn full_selection_flow_from_empty_delimiter() {
    let catalog = VariableCatalog::builtin();

    let buffer = "Translate {{";
    let list = suggest(buffer, buffer.len(), &catalog);
    let env = list
        .entries
        .iter()
        .find(|e| e.insert_text == "env.")
        .expect("env namespace offered");
    let (buffer, cursor) = list.apply(buffer, env);

    let list = suggest(&buffer, cursor, &catalog);
    let screen = list
        .entries
        .iter()
        .find(|e| e.label == "Screen Text")
        .expect("screen text offered");
    let (buffer, cursor) = list.apply(&buffer, screen);

    assert_eq!(buffer, "Translate {{env.ocrScreenContents}} ");
    assert_eq!(cursor, buffer.len());
    assert!(suggest(&buffer, cursor, &catalog).is_empty());
}

#[test]
fn suggestions_serialize_for_the_host() {
    let list = suggest("{{au", 4, &VariableCatalog::builtin());
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["replaceRange"]["start"], 2);
    assert_eq!(json["replaceRange"]["end"], 4);
    assert_eq!(json["entries"][0]["insertText"], "audio}} ");
    assert_eq!(json["entries"][0]["label"], "Audio");
}
