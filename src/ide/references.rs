//! Find usages implementation.

use smol_str::SmolStr;

use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{ReferenceTarget, Resolution};
use crate::syntax::{SyntaxKind, ast};

use super::Analysis;

/// Result of a find-usages request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceResult {
    /// Every usage found, in load order then source order.
    pub usages: Vec<Usage>,
    /// Whether declaration sites were requested.
    pub include_declaration: bool,
}

impl ReferenceResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any usages were found.
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Get the number of usages.
    pub fn len(&self) -> usize {
        self.usages.len()
    }
}

/// One token that denotes the searched symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Usage {
    pub file: FileId,
    pub range: TextRange,
    pub start: LineCol,
    /// Whether this is the declaration (vs a reference).
    pub is_declaration: bool,
}

/// The identity a usage search compares.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SymbolKey {
    Type(SmolStr),
    Member { owner: SmolStr, name: SmolStr },
    EnumValue { enumeration: SmolStr, value: SmolStr },
    Def { file: FileId, range: TextRange },
}

impl SymbolKey {
    fn of(resolution: &Resolution) -> Self {
        let target = match resolution {
            Resolution::Declaration(decl) => {
                return SymbolKey::Def {
                    file: decl.file,
                    range: decl.range,
                };
            }
            Resolution::Reference(reference) => &reference.target,
        };
        match target {
            ReferenceTarget::Type(ty) => SymbolKey::Type(SmolStr::new(ty.fqn())),
            ReferenceTarget::Member(member) => SymbolKey::Member {
                owner: member.owner.clone(),
                name: member.name.clone(),
            },
            ReferenceTarget::EnumValue { enumeration, value } => SymbolKey::EnumValue {
                enumeration: enumeration.fqn.clone(),
                value: value.clone(),
            },
            ReferenceTarget::Def(decl) => SymbolKey::Def {
                file: decl.file,
                range: decl.range,
            },
        }
    }

    /// Token kinds that can denote this symbol.
    fn admits(&self, kind: SyntaxKind) -> bool {
        match self {
            SymbolKey::Type(_) => matches!(kind, SyntaxKind::IDENTIFIER | SyntaxKind::STRING),
            SymbolKey::Member { .. } => kind == SyntaxKind::IDENTIFIER,
            SymbolKey::EnumValue { .. } => kind == SyntaxKind::TEXT,
            SymbolKey::Def { .. } => matches!(kind, SyntaxKind::TEXT | SyntaxKind::STRING),
        }
    }
}

/// Find every token denoting the same symbol as the token at `offset`.
///
/// The anchor may be a declaration or any reference to it. Declaration
/// sites are reported only when `include_declaration` is set.
pub fn find_usages(
    analysis: &Analysis,
    file: FileId,
    offset: TextSize,
    include_declaration: bool,
) -> ReferenceResult {
    let Some(anchor) = analysis.classify(file, offset) else {
        return ReferenceResult::empty();
    };
    let key = SymbolKey::of(&anchor);
    // Def names are matched by text first; only candidates get classified
    let def_name = anchor.def_declaration().map(|decl| decl.value.def_name.clone());
    let case_sensitive = analysis.config().case_sensitive_def_names;

    let resolver = analysis.resolver();
    let mut usages = Vec::new();

    for (doc_file, document) in analysis.documents() {
        for token in document
            .syntax()
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| key.admits(t.kind()))
        {
            if def_name
                .as_ref()
                .is_some_and(|name| !same_name(ast::unquote(token.text()), name, case_sensitive))
            {
                continue;
            }
            let Some(resolution) = resolver.classify(doc_file, &token) else {
                continue;
            };
            if SymbolKey::of(&resolution) != key {
                continue;
            }
            let is_declaration = matches!(resolution, Resolution::Declaration(_));
            if is_declaration && !include_declaration {
                continue;
            }
            let range = token.text_range();
            usages.push(Usage {
                file: doc_file,
                range,
                start: document.line_col(range.start()),
                is_declaration,
            });
        }
    }

    tracing::debug!("{} usages of {:?}", usages.len(), key);
    ReferenceResult {
        usages,
        include_declaration,
    }
}

fn same_name(text: &str, name: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text == name
    } else {
        text.to_lowercase() == name.to_lowercase()
    }
}
