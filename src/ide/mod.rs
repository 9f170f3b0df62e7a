//! IDE features — navigation APIs for editor integrations.
//!
//! This module is the interface between the resolution engine (HIR) and an
//! editor. It owns documents and snapshots; every query runs against an
//! immutable [`Analysis`].
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: readers never observe a half-rebuilt registry
//! 2. **No editor types**: positions are offsets and [`LineCol`](crate::base::LineCol)s
//! 3. **Composable**: built on top of [`hir`](crate::hir)
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(scope);
//! let file = host.set_document("Defs/Walls.xml", text);
//!
//! let analysis = host.analysis();
//! let targets = analysis.goto_definition(file, offset);
//! let usages = analysis.find_usages(file, offset, true);
//! ```

mod analysis;
mod change;
mod document;
mod goto;
mod references;

pub use analysis::{Analysis, AnalysisHost};
pub use change::{ChangeKind, ChangeSignal};
pub use document::Document;
pub use goto::{GotoResult, Location, NavigationKind, NavigationTarget, goto_definition};
pub use references::{ReferenceResult, Usage, find_usages};
