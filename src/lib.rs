//! # defnav
//!
//! Reference resolution between XML def documents and the statically-typed
//! object model they describe: go from a tag, attribute or text token to
//! the field, type, enum value or def declaration it denotes, and from a
//! def declaration back to every usage.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Workspace loading: documents, type models, config
//!   ↓
//! ide       → AnalysisHost/Analysis snapshots, goto, find usages
//!   ↓
//! hir       → Hierarchy, context and member resolution, def registry
//!   ↓
//! scope     → TypeIndex trait, TypeModel, SymbolScope
//!   ↓
//! syntax    → Rowan document trees, XML host adapter
//!   ↓
//! base      → Primitives (FileId, LineIndex, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → scope → hir → ide → project)
// ============================================================================

/// Foundation types: FileId, LineIndex, TextRange
pub mod base;

/// Syntax: rowan document trees and the XML adapter that builds them
pub mod syntax;

/// Type scope: the host's view of the object model
pub mod scope;

/// High-level IR: reference resolution
pub mod hir;

/// IDE features: snapshots, goto-definition, find-usages
pub mod ide;

/// Project management: loading from disk
pub mod project;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{DefNameValue, DefRegistry, Reference, ReferenceTarget, ResolveConfig, Resolution};
pub use ide::{Analysis, AnalysisHost, ChangeKind};
pub use scope::{SymbolScope, TypeContext, TypeIndex, TypeModel};
