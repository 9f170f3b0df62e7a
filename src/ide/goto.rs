//! Go-to-definition implementation.

use smol_str::SmolStr;

use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{DefDeclaration, Reference, ReferenceTarget, Resolution};

use super::Analysis;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<NavigationTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result with a single target.
    pub fn single(target: NavigationTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// What kind of symbol a navigation target is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationKind {
    Type,
    Member,
    EnumValue,
    Def,
}

/// A place inside a loaded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: FileId,
    pub range: TextRange,
    /// Start of `range`
    pub start: LineCol,
}

/// A symbol to navigate to.
///
/// Object model symbols live in compiled code the engine cannot see, so
/// they carry no [`Location`]; the host resolves them by `container` and
/// `name` in its own symbol store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    pub kind: NavigationKind,
    pub name: SmolStr,
    /// Fully-qualified owner: the type itself, the member's declaring type,
    /// the enumeration, or the def type
    pub container: SmolStr,
    pub location: Option<Location>,
    /// Member documentation, for display
    pub doc: Option<String>,
}

impl NavigationTarget {
    pub(crate) fn from_declaration(analysis: &Analysis, decl: &DefDeclaration) -> Self {
        Self {
            kind: NavigationKind::Def,
            name: decl.value.def_name.clone(),
            container: decl.value.def_type.clone(),
            location: analysis.location(decl.file, decl.range),
            doc: None,
        }
    }

    pub(crate) fn from_reference(analysis: &Analysis, reference: &Reference) -> Self {
        match &reference.target {
            ReferenceTarget::Type(ty) => Self {
                kind: NavigationKind::Type,
                name: SmolStr::new(ty.short_name()),
                container: SmolStr::new(ty.fqn()),
                location: None,
                doc: None,
            },
            ReferenceTarget::Member(member) => Self {
                kind: NavigationKind::Member,
                name: member.name.clone(),
                container: member.owner.clone(),
                location: None,
                doc: member.doc.clone(),
            },
            ReferenceTarget::EnumValue { enumeration, value } => Self {
                kind: NavigationKind::EnumValue,
                name: value.clone(),
                container: enumeration.fqn.clone(),
                location: None,
                doc: None,
            },
            ReferenceTarget::Def(decl) => Self::from_declaration(analysis, decl),
        }
    }
}

/// Find the declaration of whatever is at `offset`.
///
/// A declaration site navigates to itself.
pub fn goto_definition(analysis: &Analysis, file: FileId, offset: TextSize) -> GotoResult {
    let Some(resolution) = analysis.classify(file, offset) else {
        return GotoResult::empty();
    };

    let target = match &resolution {
        Resolution::Declaration(decl) => NavigationTarget::from_declaration(analysis, decl),
        Resolution::Reference(reference) => NavigationTarget::from_reference(analysis, reference),
    };
    GotoResult::single(target)
}
