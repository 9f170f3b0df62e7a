//! Reference Factory — what a single document token denotes.
//!
//! Rules, first match wins:
//!
//! 1. TEXT inside a `defName` tag declares a def name.
//! 2. STRING value of a `Name` attribute declares one; of a `ParentName`
//!    attribute references one; of a `Class` attribute names a type.
//! 3. Any other TEXT is a def-name usage, or an enum value when its
//!    position is typed as an enumeration.
//! 4. IDENTIFIER is a member name, or a bare type name when nothing
//!    encloses it.
//! 5. Everything else denotes nothing.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::scope::{EnumType, Member, SymbolScope, TypeContext};
use crate::syntax::{AstNode, Attribute, SyntaxKind, SyntaxToken, Tag, ast};

use super::context::resolve_context;
use super::defs::{DefDeclaration, DefNameValue, DefRegistry, declared_value, fold_name};
use super::hierarchy::build_hierarchy;
use super::members::{AliasMatcher, MetadataDumpMatcher, resolve_member};
use super::ResolveConfig;

/// What a reference points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceTarget {
    Type(TypeContext),
    Member(Member),
    EnumValue {
        enumeration: Arc<EnumType>,
        value: SmolStr,
    },
    Def(DefDeclaration),
}

/// A token that refers to something declared elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub file: FileId,
    /// Range of the source token
    pub range: TextRange,
    /// Text of the source token, unquoted
    pub text: SmolStr,
    pub target: ReferenceTarget,
    /// Canonical name of the target when it differs from `text` (alias match)
    pub display_name: Option<SmolStr>,
}

impl Reference {
    /// The name to show for this reference.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.text)
    }
}

/// The role of a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The token is the registered declaration of a def name
    Declaration(DefDeclaration),
    Reference(Reference),
}

impl Resolution {
    pub fn range(&self) -> TextRange {
        match self {
            Resolution::Declaration(decl) => decl.range,
            Resolution::Reference(reference) => reference.range,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Resolution::Reference(reference) => Some(reference),
            Resolution::Declaration(_) => None,
        }
    }

    /// The def declaration this token declares or refers to.
    pub fn def_declaration(&self) -> Option<&DefDeclaration> {
        match self {
            Resolution::Declaration(decl) => Some(decl),
            Resolution::Reference(Reference {
                target: ReferenceTarget::Def(decl),
                ..
            }) => Some(decl),
            Resolution::Reference(_) => None,
        }
    }
}

/// Everything one resolution cycle reads, passed explicitly.
///
/// Built once per snapshot; every call is a pure function of these inputs.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    pub scope: &'a SymbolScope,
    pub config: &'a ResolveConfig,
    pub registry: &'a DefRegistry,
    pub aliases: &'a dyn AliasMatcher,
}

impl<'a> Resolver<'a> {
    pub fn new(scope: &'a SymbolScope, config: &'a ResolveConfig, registry: &'a DefRegistry) -> Self {
        Self {
            scope,
            config,
            registry,
            aliases: &MetadataDumpMatcher,
        }
    }

    pub fn with_aliases(self, aliases: &'a dyn AliasMatcher) -> Self {
        Self { aliases, ..self }
    }

    /// Classify `token` of document `file`.
    pub fn classify(&self, file: FileId, token: &SyntaxToken) -> Option<Resolution> {
        match token.kind() {
            SyntaxKind::TEXT if self.in_def_name_tag(token) => self.declaration(file, token),
            SyntaxKind::TEXT => self.text_usage(file, token),
            SyntaxKind::STRING => self.attribute_value(file, token),
            SyntaxKind::IDENTIFIER => self.identifier(file, token),
            _ => None,
        }
    }

    /// Cheap pre-check: TEXT outside a `defName` tag whose text is a known
    /// def name. `names` holds names in lookup form, as
    /// [`DefRegistry::names`] does.
    pub fn has_reference(&self, token: &SyntaxToken, names: &FxHashSet<SmolStr>) -> bool {
        token.kind() == SyntaxKind::TEXT
            && !self.in_def_name_tag(token)
            && names.contains(fold_name(token.text(), self.config.case_sensitive_def_names).as_str())
    }

    fn in_def_name_tag(&self, token: &SyntaxToken) -> bool {
        token
            .parent()
            .and_then(Tag::cast)
            .and_then(|tag| tag.name())
            .is_some_and(|name| name == self.config.def_name_tag)
    }

    /// Rules 1 and 2: a declaring site. A site that lost to an earlier
    /// declaration of the same value refers to the winner.
    fn declaration(&self, file: FileId, token: &SyntaxToken) -> Option<Resolution> {
        let (value, _, _) = declared_value(token, self.config)?;
        let Some(registered) = self.registry.get_tag_by_def(&value) else {
            tracing::debug!("{} is not registered", value);
            return None;
        };

        if registered.file == file && registered.range == token.text_range() {
            return Some(Resolution::Declaration(registered.clone()));
        }
        Some(self.reference(file, token, ReferenceTarget::Def(registered.clone()), None))
    }

    fn attribute_value(&self, file: FileId, token: &SyntaxToken) -> Option<Resolution> {
        let attribute = token.parent().and_then(Attribute::cast)?;
        let name = attribute.name_token()?;
        let name = name.text();

        if self.config.declaration_attribute == name {
            self.declaration(file, token)
        } else if self.config.reference_attribute == name {
            let def_type = attribute.tag()?.name()?;
            let value = DefNameValue::new(crate::scope::short_name(&def_type), ast::unquote(token.text()));
            let registered = self.registry.get_tag_by_def(&value)?;
            Some(self.reference(file, token, ReferenceTarget::Def(registered.clone()), None))
        } else if self.config.class_attribute == name {
            let ty = self.scope.lookup_type(ast::unquote(token.text()))?;
            Some(self.reference(file, token, ReferenceTarget::Type(ty), None))
        } else {
            None
        }
    }

    /// Rule 3.
    fn text_usage(&self, file: FileId, token: &SyntaxToken) -> Option<Resolution> {
        let hierarchy = build_hierarchy(token, self.config);
        if hierarchy.is_empty() {
            return None;
        }
        let context = resolve_context(&hierarchy, self.scope, self.config)?;
        let text = token.text();

        match context {
            TypeContext::Enumeration(enumeration) => {
                if !enumeration.has_value(text) {
                    tracing::trace!("{} is not a value of {}", text, enumeration.fqn);
                    return None;
                }
                let target = ReferenceTarget::EnumValue {
                    enumeration,
                    value: SmolStr::new(text),
                };
                Some(self.reference(file, token, target, None))
            }
            TypeContext::Concrete(class) => {
                if !self.scope.is_subtype_of_declarable_root(&class.fqn) {
                    return None;
                }
                let value = DefNameValue::new(crate::scope::short_name(&class.fqn), text);
                let registered = self.registry.get_tag_by_def(&value)?;
                Some(self.reference(file, token, ReferenceTarget::Def(registered.clone()), None))
            }
        }
    }

    /// Rule 4.
    fn identifier(&self, file: FileId, token: &SyntaxToken) -> Option<Resolution> {
        let hierarchy = build_hierarchy(token, self.config);
        let text = token.text();

        if hierarchy.is_empty() {
            let ty = if self.config.is_qualified(text) {
                self.scope.lookup_fqn(text)
            } else {
                self.scope.lookup_short_name(text)
            }?;
            return Some(self.reference(file, token, ReferenceTarget::Type(ty), None));
        }

        let context = resolve_context(&hierarchy, self.scope, self.config)?;
        let found = resolve_member(&context, text, self.scope, self.config, self.aliases)?;
        let display_name = found.display_name().cloned();
        Some(self.reference(file, token, ReferenceTarget::Member(found.member), display_name))
    }

    fn reference(
        &self,
        file: FileId,
        token: &SyntaxToken,
        target: ReferenceTarget,
        display_name: Option<SmolStr>,
    ) -> Resolution {
        Resolution::Reference(Reference {
            file,
            range: token.text_range(),
            text: SmolStr::new(ast::unquote(token.text())),
            target,
            display_name,
        })
    }
}
