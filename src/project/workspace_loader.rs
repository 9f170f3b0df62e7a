use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::FileId;
use crate::ide::AnalysisHost;
use crate::scope::SymbolScope;

use super::LoadError;
use super::file_loader::{self, DOCUMENT_EXTENSION, TYPE_MODEL_EXTENSION};

/// Loads workspace files into an [`AnalysisHost`].
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads every def document under `path` into `host`, in path order.
    ///
    /// Files that fail to load are skipped; if any did, the error lists them
    /// after everything else has been loaded.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<Vec<FileId>, LoadError> {
        let path = path.into();
        let paths = file_loader::collect_file_paths(&path, DOCUMENT_EXTENSION)?;
        let mut loaded = Vec::with_capacity(paths.len());
        let mut errors = Vec::new();

        for path in paths {
            match file_loader::load_file(&path) {
                Ok(text) => loaded.push(host.set_document(&path, &text)),
                Err(err) => {
                    tracing::warn!("{}", err);
                    errors.push(err);
                }
            }
        }
        tracing::info!("loaded {} documents from {}", loaded.len(), path.display());

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Several(errors))
        }
    }

    /// Loads a single def document into `host`.
    pub fn load_file_into_host<P: AsRef<Path>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<FileId, LoadError> {
        let path = path.as_ref();
        let text = file_loader::load_file(path)?;
        Ok(host.set_document(path, &text))
    }

    /// Builds a scope from a primary type model and auxiliary ones, in the
    /// given fallback order.
    pub fn load_scope<P, I>(&self, primary: P, auxiliary: I) -> Result<SymbolScope, LoadError>
    where
        P: AsRef<Path>,
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut scope = SymbolScope::new(Arc::new(file_loader::load_type_model(primary.as_ref())?));
        for path in auxiliary {
            scope = scope.with_auxiliary(Arc::new(file_loader::load_type_model(path.as_ref())?));
        }
        Ok(scope)
    }

    /// Builds a scope from every type model under `dir`.
    ///
    /// The model at `primary` (relative to `dir`) comes first; the others
    /// follow in path order.
    pub fn load_scope_from_directory<P: AsRef<Path>>(
        &self,
        dir: P,
        primary: &str,
    ) -> Result<SymbolScope, LoadError> {
        let dir = dir.as_ref();
        let primary = dir.join(primary);
        let auxiliary: Vec<_> = file_loader::collect_file_paths(dir, TYPE_MODEL_EXTENSION)?
            .into_iter()
            .filter(|path| *path != primary)
            .collect();
        self.load_scope(&primary, auxiliary)
    }
}
