//! Hierarchy Builder — the chain of enclosing tags above a token.

use smol_str::SmolStr;

use crate::syntax::{AstNode, SyntaxKind, SyntaxToken, Tag};

use super::ResolveConfig;

/// One enclosing tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchySegment {
    pub name: SmolStr,
    /// Value of the tag's class attribute (`<li Class="CompProperties_Power">`)
    pub class_override: Option<SmolStr>,
}

impl HierarchySegment {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            class_override: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<SmolStr>) -> Self {
        self.class_override = Some(class.into());
        self
    }
}

/// Enclosing tag names from the outermost def down to the token, root
/// excluded, innermost last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
    segments: Vec<HierarchySegment>,
}

impl Hierarchy {
    pub fn new(segments: Vec<HierarchySegment>) -> Self {
        Self { segments }
    }

    /// Build a hierarchy of plain tag names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::new(names.into_iter().map(HierarchySegment::new).collect())
    }

    pub fn segments(&self) -> &[HierarchySegment] {
        &self.segments
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Walk the tags enclosing `token` outward and record their names.
///
/// Character data and attribute values belong to the tag that contains
/// them. A tag's own name (in its header or footer) does not: it names a
/// member of the enclosing tag, so that tag is skipped. The outermost tag
/// is never part of the result.
pub fn build_hierarchy(token: &SyntaxToken, config: &ResolveConfig) -> Hierarchy {
    let names_own_tag = token.kind() == SyntaxKind::IDENTIFIER
        && token.parent().is_some_and(|p| {
            matches!(p.kind(), SyntaxKind::TAG_HEADER | SyntaxKind::TAG_FOOTER)
        });

    let mut segments: Vec<HierarchySegment> = token
        .parent_ancestors()
        .filter_map(Tag::cast)
        .skip(usize::from(names_own_tag))
        .filter(|tag| !tag.is_root())
        .filter_map(|tag| {
            let name = tag.name()?;
            let class_override = tag
                .attribute(&config.class_attribute)
                .and_then(|a| a.value());
            Some(HierarchySegment {
                name,
                class_override,
            })
        })
        .collect();

    segments.reverse();
    tracing::trace!(
        "hierarchy for {:?}: {:?}",
        token.text(),
        segments.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
    );
    Hierarchy { segments }
}
