//! High-level IR (HIR) — reference resolution over document trees.
//!
//! Every function here is a pure lookup: inputs are a token, a
//! [`SymbolScope`](crate::scope::SymbolScope), a [`ResolveConfig`] and a
//! [`DefRegistry`], all passed explicitly. Failure is always "no result".
//!
//! ## Key Types
//!
//! - [`Hierarchy`] — enclosing tag names above a token
//! - [`DefRegistry`] — document-declared names and where they are declared
//! - [`Resolver`] — the per-snapshot bundle that classifies tokens
//! - [`Resolution`] — a token's role: [`Declaration`](Resolution::Declaration)
//!   or [`Reference`]
//!
//! ## Resolution Layers
//!
//! ```text
//! token
//!   │
//!   ▼
//! build_hierarchy(token)             ← enclosing tags, root excluded
//!   │
//!   ▼
//! resolve_context(hierarchy, scope)  ← TypeContext of the position
//!   │
//!   ├──▶ resolve_member(ctx, text)   ← IDENTIFIER: member, alias aware
//!   │
//!   └──▶ DefRegistry::get_tag_by_def ← TEXT/STRING: def names
//!   │
//!   ▼
//! Resolver::classify(file, token)    ← Declaration | Reference
//! ```

mod classify;
mod config;
mod context;
mod defs;
mod hierarchy;
mod members;

#[cfg(test)]
pub(crate) mod test_fixture;

pub use classify::{Reference, ReferenceTarget, Resolution, Resolver};
pub use config::ResolveConfig;
pub use context::resolve_context;
pub use defs::{
    DeclarationSite, DefDeclaration, DefNameValue, DefRegistry, declarations_in, declared_value,
    fold_name,
};
pub use hierarchy::{Hierarchy, HierarchySegment, build_hierarchy};
pub use members::{AliasMatcher, MemberMatch, MetadataDumpMatcher, resolve_member};
