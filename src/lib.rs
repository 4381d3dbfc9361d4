//! Highlight prompts: variable completion and interpolation for the
//! Highlight chat prompt editor.
//!
//! This is the crate shell: module declarations, re-exports and the one-time
//! start-up routine. Domains:
//!   - catalog     the tree of insertable variables (+ JSON loader)
//!   - completion  `{{variable}}` suggestions at the cursor
//!   - template    reference extraction, validation, rendering
//!   - settings    env files, logging, catalog source resolution

pub mod catalog;
pub mod completion;
pub mod settings;
pub mod template;

pub use catalog::{CatalogError, VariableCatalog, VariableNode};
pub use completion::{suggest, Completer, CompletionEntry, SuggestionList};
pub use template::{render, RenderMode, TemplateError, TemplateValues};

/// Start-up entry point, called once by the host before the editor opens.
///
/// Loads `.env.local` / `.env` from the working directory, installs the
/// logger, and builds the completer around the resolved catalog.
pub fn init() -> Completer {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    settings::load_env_files(&cwd);
    settings::init_logging();

    let catalog = settings::load_catalog();
    log::info!(
        "Prompt variable engine ready ({} variables)",
        catalog.leaf_paths().len()
    );
    Completer::new(catalog)
}
