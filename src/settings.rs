//! Start-up configuration.
//!
//! Handles:
//! - `.env.local` / `.env` loading
//! - Logger initialisation
//! - Catalog source resolution and loading

use crate::catalog::{self, VariableCatalog};
use std::path::{Path, PathBuf};

/// Env var pointing at a catalog JSON file.
pub const CATALOG_ENV_VAR: &str = "HIGHLIGHT_VARIABLE_CATALOG";

/// Catalog filename inside the per-user config directory.
pub const CATALOG_FILENAME: &str = "prompt-variables.json";

/// Where the process catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    EnvOverride(PathBuf),
    UserConfig(PathBuf),
    Builtin,
}

/// `<config dir>/highlight/prompt-variables.json`, if the platform has a config dir.
pub fn user_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("highlight").join(CATALOG_FILENAME))
}

/// Decide which catalog to use.
///
/// Priority:
/// 1. HIGHLIGHT_VARIABLE_CATALOG env var (explicit override)
/// 2. User config file, when it exists
/// 3. Built-in catalog
pub fn resolve_catalog_source() -> CatalogSource {
    let override_path = std::env::var(CATALOG_ENV_VAR).ok();
    let user_path = user_catalog_path().filter(|p| p.exists());
    resolve_from(override_path, user_path)
}

fn resolve_from(override_path: Option<String>, user_path: Option<PathBuf>) -> CatalogSource {
    if let Some(p) = override_path.filter(|p| !p.trim().is_empty()) {
        return CatalogSource::EnvOverride(PathBuf::from(p.trim()));
    }
    match user_path {
        Some(p) => CatalogSource::UserConfig(p),
        None => CatalogSource::Builtin,
    }
}

/// Load the catalog from `source`.
///
/// A broken file falls back to the built-in catalog so the editor always
/// has suggestions; the failure is logged.
pub fn load_catalog_from(source: &CatalogSource) -> VariableCatalog {
    let path = match source {
        CatalogSource::EnvOverride(p) | CatalogSource::UserConfig(p) => p,
        CatalogSource::Builtin => {
            log::info!("[SETTINGS] Using built-in variable catalog");
            return VariableCatalog::builtin();
        }
    };
    match catalog::load_catalog_file(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!(
                "[SETTINGS] Falling back to built-in catalog, {} rejected: {}",
                path.display(),
                e
            );
            VariableCatalog::builtin()
        }
    }
}

/// Resolve and load the process catalog.
pub fn load_catalog() -> VariableCatalog {
    let source = resolve_catalog_source();
    log::info!("[SETTINGS] Catalog source: {:?}", source);
    load_catalog_from(&source)
}

/// Load `.env.local`, else `.env`, from `root`. First file found wins.
///
/// Runs before the logger exists, so it reports on stderr.
pub fn load_env_files(root: &Path) -> Option<PathBuf> {
    for env_file in [".env.local", ".env"] {
        let path = root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            return Some(path);
        }
    }
    None
}

/// Install env_logger; a logger installed earlier by the host is kept.
pub fn init_logging() {
    if env_logger::try_init().is_err() {
        log::debug!("[SETTINGS] Logger already initialised");
    }
}
