//! Aggregate view over one primary and several auxiliary type indices.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::TypeIndex;
use super::types::{AttributeInstance, ClassType, Member, TypeContext, TypeRef};

/// The primary index (the application's own types) plus auxiliary indices
/// (referenced libraries, mods).
///
/// Fallback order is fixed: primary first, then auxiliaries in the order
/// they were added. A scope is cheap to clone and is replaced wholesale
/// when any index changes.
#[derive(Clone)]
pub struct SymbolScope {
    primary: Arc<dyn TypeIndex>,
    auxiliary: Vec<Arc<dyn TypeIndex>>,
}

impl SymbolScope {
    pub fn new(primary: Arc<dyn TypeIndex>) -> Self {
        Self {
            primary,
            auxiliary: Vec::new(),
        }
    }

    pub fn with_auxiliary(mut self, index: Arc<dyn TypeIndex>) -> Self {
        self.auxiliary.push(index);
        self
    }

    pub fn primary(&self) -> &dyn TypeIndex {
        self.primary.as_ref()
    }

    /// Every index in fallback order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn TypeIndex>> {
        std::iter::once(&self.primary).chain(self.auxiliary.iter())
    }

    /// First type with this short name in the primary index.
    pub fn lookup_short_name(&self, name: &str) -> Option<TypeContext> {
        self.primary.lookup_by_short_name(name).into_iter().next()
    }

    /// First index that knows `fqn`, in fallback order.
    pub fn lookup_fqn(&self, fqn: &str) -> Option<TypeContext> {
        self.all().find_map(|index| index.lookup_by_fqn(fqn))
    }

    /// Resolve a top-level type name: short name in the primary index,
    /// otherwise a fully-qualified name in any index.
    pub fn lookup_type(&self, name: &str) -> Option<TypeContext> {
        self.lookup_short_name(name)
            .or_else(|| self.lookup_fqn(name))
    }

    /// Resolve a member's declared type.
    pub fn resolve_type_ref(&self, ty: &TypeRef) -> Option<TypeContext> {
        let name = ty.name();
        self.lookup_fqn(name)
            .or_else(|| self.lookup_short_name(name))
    }

    /// Members declared directly on `ty`, from the index that owns it.
    pub fn members_of(&self, ty: &ClassType) -> Vec<Member> {
        self.all()
            .find(|index| index.contains(&ty.fqn))
            .map(|index| index.members_of(ty))
            .unwrap_or_default()
    }

    /// Members of `ty` followed by inherited members, nearest base first.
    pub fn all_members_of(&self, ty: &ClassType) -> Vec<Member> {
        let mut members = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = Some(ty.clone());

        while let Some(class) = current {
            if !visited.insert(class.fqn.clone()) {
                tracing::warn!("inheritance cycle through {}", class.fqn);
                break;
            }
            members.extend(self.members_of(&class));
            current = class
                .base
                .as_deref()
                .and_then(|base| self.lookup_fqn(base))
                .and_then(|ctx| ctx.as_class().map(|c| ClassType::clone(c)));
        }

        members
    }

    pub fn attributes_of(&self, member: &Member) -> Vec<AttributeInstance> {
        self.all()
            .find(|index| index.contains(&member.owner))
            .map(|index| index.attributes_of(member))
            .unwrap_or_default()
    }

    /// Whether `fqn` derives from the declarable root.
    ///
    /// Walks the base chain across indices, so a library type deriving from
    /// a root declared in the primary index still qualifies.
    pub fn is_subtype_of_declarable_root(&self, fqn: &str) -> bool {
        let mut visited: FxHashSet<SmolStr> = FxHashSet::default();
        let mut current = Some(SmolStr::new(fqn));

        while let Some(name) = current {
            if self.all().any(|index| index.is_subtype_of_declarable_root(&name)) {
                return true;
            }
            if !visited.insert(name.clone()) {
                return false;
            }
            current = self
                .lookup_fqn(&name)
                .and_then(|ctx| ctx.as_class().and_then(|c| c.base.clone()));
        }
        false
    }
}

impl fmt::Debug for SymbolScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolScope")
            .field("primary", &self.primary.label())
            .field(
                "auxiliary",
                &self.auxiliary.iter().map(|i| i.label()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
