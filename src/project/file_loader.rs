//! Reading workspace files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::hir::ResolveConfig;
use crate::scope::TypeModel;

use super::LoadError;

/// Extension of def documents.
pub const DOCUMENT_EXTENSION: &str = "xml";
/// Extension of type model descriptions.
pub const TYPE_MODEL_EXTENSION: &str = "json";

/// Get the lowercase extension of a path.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Ensure `path` has the expected extension.
pub fn validate_extension(path: &Path, expected: &str) -> Result<(), LoadError> {
    match get_extension(path) {
        Some(ext) if ext == expected => Ok(()),
        _ => Err(LoadError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Every file under `dir` with extension `extension`, sorted by path.
///
/// Siblings are walked in name order, which yields the same order as
/// comparing paths component-wise. Load order, and therefore FileIds and
/// duplicate def resolution, is independent of the file system.
pub fn collect_file_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            LoadError::io(path, err.into())
        })?;
        if entry.file_type().is_file() && get_extension(entry.path()).as_deref() == Some(extension) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Read a def document.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    validate_extension(path, DOCUMENT_EXTENSION)?;
    fs::read_to_string(path).map_err(|err| LoadError::io(path, err))
}

/// Read a type model description.
pub fn load_type_model(path: &Path) -> Result<TypeModel, LoadError> {
    validate_extension(path, TYPE_MODEL_EXTENSION)?;
    let text = fs::read_to_string(path).map_err(|err| LoadError::io(path, err))?;
    let model = TypeModel::from_json(&text).map_err(|err| LoadError::json(path, err))?;
    tracing::debug!("loaded {} types from {}", model.len(), path.display());
    Ok(model)
}

/// Read resolution conventions. Missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<ResolveConfig, LoadError> {
    let text = fs::read_to_string(path).map_err(|err| LoadError::io(path, err))?;
    serde_json::from_str(&text).map_err(|err| LoadError::json(path, err))
}
