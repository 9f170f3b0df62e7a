//! Def-Name Registry — names declared by documents rather than by the
//! object model.
//!
//! A def is declared either by the text of its `<defName>` tag or by the
//! value of a `Name="..."` attribute (abstract parents). Both are keyed by
//! the name of the def's own tag, so `<ThingDef><defName>Wall</defName>`
//! declares `ThingDef/Wall`.

use std::fmt;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::scope::short_name;
use crate::syntax::{AstNode, Attribute, GreenNode, SyntaxKind, SyntaxNode, SyntaxToken, Tag, ast};

use super::ResolveConfig;

/// Identity of a document-declared name: (def type short name, def name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefNameValue {
    pub def_type: SmolStr,
    pub def_name: SmolStr,
}

impl DefNameValue {
    pub fn new(def_type: impl Into<SmolStr>, def_name: impl Into<SmolStr>) -> Self {
        Self {
            def_type: def_type.into(),
            def_name: def_name.into(),
        }
    }
}

impl fmt::Display for DefNameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.def_type, self.def_name)
    }
}

/// How a def name was declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationSite {
    /// `<defName>Wall</defName>`
    DefNameTag,
    /// `<ThingDef Name="BaseWall">`
    NameAttribute,
}

/// A declaration found by scanning a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefDeclaration {
    /// The value as spelled at the declaration
    pub value: DefNameValue,
    pub file: FileId,
    /// Range of the declaring token (the text, or the quoted attribute value)
    pub range: TextRange,
    /// Range of the whole def tag
    pub tag_range: TextRange,
    pub site: DeclarationSite,
}

/// If `token` is a declaration site, the name it declares.
///
/// A qualified def tag (`<MyMod.TurretDef>`) declares under its short name,
/// the same type name a typed usage looks up.
///
/// Returns the declared value, the range of the def tag, and the site kind.
pub fn declared_value(
    token: &SyntaxToken,
    config: &ResolveConfig,
) -> Option<(DefNameValue, TextRange, DeclarationSite)> {
    match token.kind() {
        SyntaxKind::TEXT => {
            let tag = token.parent().and_then(Tag::cast)?;
            if tag.name()? != config.def_name_tag {
                return None;
            }
            let def = tag.parent_tag()?;
            let value = DefNameValue::new(short_name(&def.name()?), token.text());
            Some((value, def.syntax().text_range(), DeclarationSite::DefNameTag))
        }
        SyntaxKind::STRING => {
            let attribute = token.parent().and_then(Attribute::cast)?;
            if config.declaration_attribute != attribute.name_token()?.text() {
                return None;
            }
            let name = ast::unquote(token.text());
            if name.is_empty() {
                return None;
            }
            let def = attribute.tag()?;
            let value = DefNameValue::new(short_name(&def.name()?), name);
            Some((value, def.syntax().text_range(), DeclarationSite::NameAttribute))
        }
        _ => None,
    }
}

/// Every declaration in one document, in source order.
pub fn declarations_in(file: FileId, root: &SyntaxNode, config: &ResolveConfig) -> Vec<DefDeclaration> {
    root.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter_map(|token| {
            let (value, tag_range, site) = declared_value(&token, config)?;
            Some(DefDeclaration {
                value,
                file,
                range: token.text_range(),
                tag_range,
                site,
            })
        })
        .collect()
}

/// Index of document-declared names.
///
/// Built from scratch once per invalidation and read-only afterwards. When
/// two sites declare the same value, the one in the earliest loaded document
/// (lowest [`FileId`], then lowest offset) is kept; the rest are available
/// from [`DefRegistry::duplicates`].
#[derive(Clone, Debug, Default)]
pub struct DefRegistry {
    case_sensitive: bool,
    /// Keyed by the normalized value
    entries: FxHashMap<DefNameValue, DefDeclaration>,
    names: FxHashSet<SmolStr>,
    duplicates: Vec<DefDeclaration>,
}

impl DefRegistry {
    pub fn new(config: &ResolveConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive_def_names,
            ..Self::default()
        }
    }

    /// Scan every document for declaration sites.
    ///
    /// Documents are scanned in parallel and merged in [`FileId`] order, so
    /// the result does not depend on scheduling.
    pub fn build<'a>(
        documents: impl IntoIterator<Item = (FileId, &'a GreenNode)>,
        config: &ResolveConfig,
    ) -> Self {
        let mut documents: Vec<_> = documents.into_iter().collect();
        documents.sort_by_key(|(file, _)| *file);

        let per_document: Vec<Vec<DefDeclaration>> = documents
            .par_iter()
            .map(|(file, green)| {
                let root = SyntaxNode::new_root((*green).clone());
                declarations_in(*file, &root, config)
            })
            .collect();

        let mut registry = Self::new(config);
        for declaration in per_document.into_iter().flatten() {
            registry.insert(declaration);
        }
        tracing::debug!(
            "def registry built: {} names from {} documents, {} duplicates",
            registry.len(),
            documents.len(),
            registry.duplicates.len()
        );
        registry
    }

    /// Register a declaration. Returns false, and records a duplicate, when
    /// the value is already declared.
    pub fn insert(&mut self, declaration: DefDeclaration) -> bool {
        let key = self.key(&declaration.value);
        if let Some(existing) = self.entries.get(&key) {
            tracing::warn!(
                "{} declared again in {} at {:?}, keeping {} at {:?}",
                declaration.value,
                declaration.file,
                declaration.range,
                existing.file,
                existing.range
            );
            self.duplicates.push(declaration);
            return false;
        }
        self.names
            .insert(fold_name(&declaration.value.def_name, self.case_sensitive));
        self.entries.insert(key, declaration);
        true
    }

    pub fn has_tag(&self, value: &DefNameValue) -> bool {
        self.entries.contains_key(&self.key(value))
    }

    /// The stored spelling of `value`.
    pub fn get_def_name(&self, value: &DefNameValue) -> Option<&DefNameValue> {
        self.get_tag_by_def(value).map(|decl| &decl.value)
    }

    pub fn get_tag_by_def(&self, value: &DefNameValue) -> Option<&DefDeclaration> {
        self.entries.get(&self.key(value))
    }

    /// Every declared def name in lookup form: lowercased when def names
    /// are case-insensitive.
    pub fn names(&self) -> &FxHashSet<SmolStr> {
        &self.names
    }

    /// Whether any def type declares `name`.
    pub fn knows_name(&self, name: &str) -> bool {
        self.names.contains(fold_name(name, self.case_sensitive).as_str())
    }

    /// Declarations that lost to an earlier one.
    pub fn duplicates(&self) -> &[DefDeclaration] {
        &self.duplicates
    }

    /// All kept declarations, in load order.
    pub fn declarations(&self) -> Vec<&DefDeclaration> {
        let mut all: Vec<_> = self.entries.values().collect();
        all.sort_by_key(|decl| (decl.file, decl.range.start()));
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(&self, value: &DefNameValue) -> DefNameValue {
        DefNameValue::new(
            fold_name(&value.def_type, self.case_sensitive),
            fold_name(&value.def_name, self.case_sensitive),
        )
    }
}

/// The form a def name or type is looked up by.
pub fn fold_name(name: &str, case_sensitive: bool) -> SmolStr {
    if case_sensitive {
        SmolStr::new(name)
    } else {
        SmolStr::new(name.to_lowercase())
    }
}
