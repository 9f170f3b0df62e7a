//! Context Resolver — the type a document position is considered to have.

use crate::scope::{SymbolScope, TypeContext, TypeRef};

use super::{Hierarchy, HierarchySegment, ResolveConfig};

/// Walk `hierarchy` from the outermost def down and return the type of the
/// innermost position.
///
/// The first segment names a top-level type. Every following segment names
/// a member of the current type (own or inherited, exact match); the member's
/// declared type becomes the new context, with collections unwrapped to their
/// element type. A list-item segment directly under a collection keeps the
/// element type. A class attribute on any segment replaces the context with
/// the named type. An enumeration ends the walk.
///
/// `None` means the position has no usable context.
pub fn resolve_context(
    hierarchy: &Hierarchy,
    scope: &SymbolScope,
    config: &ResolveConfig,
) -> Option<TypeContext> {
    let (first, rest) = hierarchy.segments().split_first()?;

    let seed = scope.lookup_type(&first.name);
    let Some(mut current) = with_override(first, seed, scope) else {
        tracing::trace!("no top-level type named {}", first.name);
        return None;
    };
    // Collection layers unwrapped but not yet entered through a list item
    let mut open_items = 0usize;

    for segment in rest {
        let TypeContext::Concrete(class) = &current else {
            tracing::trace!("{} is an enumeration, {} has no context", current.fqn(), segment.name);
            return None;
        };

        if open_items > 0 && segment.name == config.list_item_tag {
            open_items -= 1;
            current = with_override(segment, Some(current.clone()), scope)?;
            continue;
        }

        let Some(member) = scope
            .all_members_of(class)
            .into_iter()
            .find(|m| m.name == segment.name)
        else {
            tracing::trace!("{} has no member {}", class.fqn, segment.name);
            return None;
        };

        let (element, layers) = unwrap_collections(&member.ty, config);
        open_items = layers;
        let resolved = scope.resolve_type_ref(element);
        if resolved.is_none() && segment.class_override.is_none() {
            tracing::trace!("{}.{} has no usable type ({})", class.fqn, member.name, element.name());
            return None;
        }
        current = with_override(segment, resolved, scope)?;
    }

    Some(current)
}

/// Strip every collection layer from `ty`, returning the innermost element
/// type and the number of layers removed.
fn unwrap_collections<'a>(ty: &'a TypeRef, config: &ResolveConfig) -> (&'a TypeRef, usize) {
    let mut current = ty;
    let mut layers = 0;
    while let Some(element) = current.collection_element(&config.collections) {
        current = element;
        layers += 1;
    }
    (current, layers)
}

fn with_override(
    segment: &HierarchySegment,
    context: Option<TypeContext>,
    scope: &SymbolScope,
) -> Option<TypeContext> {
    match &segment.class_override {
        Some(class) => match scope.lookup_type(class) {
            Some(substituted) => Some(substituted),
            None => {
                tracing::debug!("class override {} on <{}> not found", class, segment.name);
                context
            }
        },
        None => context,
    }
}
