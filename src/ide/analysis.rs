//! AnalysisHost and Analysis — state management for navigation features.
//!
//! The `AnalysisHost` owns all mutable inputs (documents, type scope,
//! conventions) and hands out immutable `Analysis` snapshots. Any change
//! raises the host's [`ChangeSignal`]; the host marks itself dirty and the
//! next `analysis()` call rebuilds the def registry and swaps in a new
//! snapshot. Readers holding the old snapshot keep a complete, consistent
//! view.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use defnav::ide::AnalysisHost;
//! use defnav::scope::{SymbolScope, TypeModel};
//!
//! let scope = SymbolScope::new(Arc::new(TypeModel::builder("game").build()));
//! let mut host = AnalysisHost::new(scope);
//! let file = host.set_document("Defs/Walls.xml", "<Defs><ThingDef><defName>Wall</defName></ThingDef></Defs>");
//!
//! let analysis = host.analysis();
//! assert_eq!(analysis.registry().len(), 1);
//! # let _ = file;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{AliasMatcher, DefRegistry, MetadataDumpMatcher, ResolveConfig, Resolution, Resolver};
use crate::scope::SymbolScope;

use super::change::{ChangeKind, ChangeSignal};
use super::document::Document;
use super::goto::{GotoResult, Location, goto_definition};
use super::references::{ReferenceResult, find_usages};

type Documents = IndexMap<FileId, Arc<Document>>;

/// Owns all mutable state for the analysis layer.
///
/// Apply changes via `set_document()`, `remove_document()`, `set_scope()`
/// and `set_config()`, then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    /// Documents in load order
    documents: Arc<Documents>,
    /// Path to FileId; ids are never reused
    file_ids: IndexMap<PathBuf, FileId>,
    next_file_id: u32,
    scope: SymbolScope,
    config: Arc<ResolveConfig>,
    aliases: Arc<dyn AliasMatcher>,
    signal: Arc<ChangeSignal>,
    /// Set by the change subscription, cleared by a rebuild
    dirty: Arc<AtomicBool>,
    snapshot: RwLock<Arc<Analysis>>,
}

impl AnalysisHost {
    /// Create a host with no documents and default conventions.
    pub fn new(scope: SymbolScope) -> Self {
        Self::with_config(scope, ResolveConfig::default())
    }

    pub fn with_config(scope: SymbolScope, config: ResolveConfig) -> Self {
        let signal = Arc::new(ChangeSignal::new());
        let dirty = Arc::new(AtomicBool::new(false));
        {
            let dirty = Arc::clone(&dirty);
            signal.subscribe(move |_| dirty.store(true, Ordering::Release));
        }

        let documents = Arc::new(Documents::new());
        let config = Arc::new(config);
        let aliases: Arc<dyn AliasMatcher> = Arc::new(MetadataDumpMatcher);
        let snapshot = Analysis::build(&documents, &scope, &config, &aliases);

        Self {
            documents,
            file_ids: IndexMap::new(),
            next_file_id: 0,
            scope,
            config,
            aliases,
            signal,
            dirty,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The signal raised on every input change. Hosts that own other inputs
    /// (a type index watcher, say) may raise it too.
    pub fn signal(&self) -> Arc<ChangeSignal> {
        Arc::clone(&self.signal)
    }

    /// Add or replace a document. A path keeps its FileId across edits.
    pub fn set_document(&mut self, path: impl AsRef<Path>, text: &str) -> FileId {
        let path = path.as_ref();
        let file = match self.file_ids.get(path) {
            Some(&file) => file,
            None => {
                let file = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                self.file_ids.insert(path.to_path_buf(), file);
                file
            }
        };

        let document = Arc::new(Document::parse(path, text));
        Arc::make_mut(&mut self.documents).insert(file, document);
        self.signal.notify(ChangeKind::Documents);
        file
    }

    /// Remove a document. Returns whether it was loaded.
    pub fn remove_document(&mut self, path: impl AsRef<Path>) -> bool {
        let Some(file) = self.file_ids.shift_remove(path.as_ref()) else {
            return false;
        };
        Arc::make_mut(&mut self.documents).shift_remove(&file);
        self.signal.notify(ChangeKind::Documents);
        true
    }

    /// Replace the type scope (a type index was rebuilt).
    pub fn set_scope(&mut self, scope: SymbolScope) {
        self.scope = scope;
        self.signal.notify(ChangeKind::TypeIndex);
    }

    pub fn set_config(&mut self, config: ResolveConfig) {
        self.config = Arc::new(config);
        self.signal.notify(ChangeKind::Config);
    }

    /// Swap the alias matching strategy.
    pub fn set_alias_matcher(&mut self, aliases: Arc<dyn AliasMatcher>) {
        self.aliases = aliases;
        self.signal.notify(ChangeKind::Config);
    }

    pub fn has_document(&self, path: impl AsRef<Path>) -> bool {
        self.file_ids.contains_key(path.as_ref())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.file_ids.get(path.as_ref()).copied()
    }

    pub fn file_path(&self, file: FileId) -> Option<&Path> {
        self.documents.get(&file).map(|doc| doc.path())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Get a consistent snapshot for querying, rebuilding it first if any
    /// input changed since the last call.
    pub fn analysis(&self) -> Arc<Analysis> {
        if self.dirty.swap(false, Ordering::AcqRel) {
            let fresh = Analysis::build(&self.documents, &self.scope, &self.config, &self.aliases);
            *self.snapshot.write() = Arc::new(fresh);
        }
        Arc::clone(&self.snapshot.read())
    }
}

/// An immutable snapshot of the whole analysis.
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Analysis {
    documents: Arc<Documents>,
    scope: SymbolScope,
    config: Arc<ResolveConfig>,
    aliases: Arc<dyn AliasMatcher>,
    registry: Arc<DefRegistry>,
}

impl Analysis {
    fn build(
        documents: &Arc<Documents>,
        scope: &SymbolScope,
        config: &Arc<ResolveConfig>,
        aliases: &Arc<dyn AliasMatcher>,
    ) -> Self {
        let registry = DefRegistry::build(
            documents.iter().map(|(file, doc)| (*file, doc.green())),
            config,
        );
        tracing::info!(
            "analysis rebuilt: {} documents, {} def names",
            documents.len(),
            registry.len()
        );
        Self {
            documents: Arc::clone(documents),
            scope: scope.clone(),
            config: Arc::clone(config),
            aliases: Arc::clone(aliases),
            registry: Arc::new(registry),
        }
    }

    /// The resolver over this snapshot's inputs.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.scope, &self.config, &self.registry).with_aliases(self.aliases.as_ref())
    }

    pub fn scope(&self) -> &SymbolScope {
        &self.scope
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    pub fn registry(&self) -> &DefRegistry {
        &self.registry
    }

    pub fn document(&self, file: FileId) -> Option<&Document> {
        self.documents.get(&file).map(|doc| doc.as_ref())
    }

    /// Documents in load order.
    pub fn documents(&self) -> impl Iterator<Item = (FileId, &Document)> {
        self.documents.iter().map(|(file, doc)| (*file, doc.as_ref()))
    }

    /// Classify the token at `offset`.
    pub fn classify(&self, file: FileId, offset: TextSize) -> Option<Resolution> {
        let token = self.document(file)?.token_at(offset)?;
        self.resolver().classify(file, &token)
    }

    /// Whether the token at `offset` is worth classifying as a def usage.
    pub fn has_reference(&self, file: FileId, offset: TextSize) -> bool {
        self.document(file)
            .and_then(|doc| doc.token_at(offset))
            .is_some_and(|token| self.resolver().has_reference(&token, self.registry.names()))
    }

    pub fn goto_definition(&self, file: FileId, offset: TextSize) -> GotoResult {
        goto_definition(self, file, offset)
    }

    pub fn find_usages(&self, file: FileId, offset: TextSize, include_declaration: bool) -> ReferenceResult {
        find_usages(self, file, offset, include_declaration)
    }

    /// Convert a line/column position to an offset.
    pub fn offset(&self, file: FileId, position: LineCol) -> Option<TextSize> {
        self.document(file)?.line_index().offset(position)
    }

    pub(crate) fn location(&self, file: FileId, range: TextRange) -> Option<Location> {
        let document = self.document(file)?;
        Some(Location {
            file,
            range,
            start: document.line_col(range.start()),
        })
    }
}
