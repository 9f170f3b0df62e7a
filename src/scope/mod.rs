//! Type Scope — read-only view of the object model the documents describe.
//!
//! The engine never compiles or type-checks anything. It consumes a host
//! supplied [`TypeIndex`] (one per assembly or mod) and combines several of
//! them into a [`SymbolScope`]: the application's own types first, then any
//! referenced libraries, in a fixed order.
//!
//! [`TypeModel`] is an in-memory index that can be built in code or loaded
//! from a JSON description; hosts with their own reflection data implement
//! [`TypeIndex`] directly.

mod model;
mod symbol_scope;
mod types;

pub use model::{FieldDef, TypeDef, TypeModel, TypeModelBuilder};
pub use symbol_scope::SymbolScope;
pub use types::{
    AttributeArgument, AttributeInstance, ClassType, EnumType, Member, TypeContext, TypeRef,
    short_name,
};

/// A host type index.
///
/// Lookups are pure and cheap; the host owns invalidation and replaces the
/// whole index when its model changes.
pub trait TypeIndex: Send + Sync {
    /// Human readable label for logs (assembly or mod name).
    fn label(&self) -> &str;

    /// Types whose short (unqualified) name is `name`, in declaration order.
    fn lookup_by_short_name(&self, name: &str) -> Vec<TypeContext>;

    /// The type with fully-qualified name `fqn`.
    fn lookup_by_fqn(&self, fqn: &str) -> Option<TypeContext>;

    /// Members declared directly on `ty` (inherited members excluded).
    fn members_of(&self, ty: &ClassType) -> Vec<Member>;

    /// Attributes attached to `member`.
    fn attributes_of(&self, member: &Member) -> Vec<AttributeInstance>;

    /// Whether `fqn` is the declarable root or transitively derives from it,
    /// as far as this index can tell.
    fn is_subtype_of_declarable_root(&self, fqn: &str) -> bool;

    fn contains(&self, fqn: &str) -> bool {
        self.lookup_by_fqn(fqn).is_some()
    }
}
