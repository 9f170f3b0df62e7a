//! Types handed out by a [`TypeIndex`](super::TypeIndex).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The last segment of a qualified name (`Verse.ThingDef` → `ThingDef`).
pub fn short_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

/// The type a document position is considered to have.
///
/// Whether a type is an enumeration is decided once, when the index builds
/// the context, and never re-derived from names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeContext {
    Concrete(Arc<ClassType>),
    Enumeration(Arc<EnumType>),
}

impl TypeContext {
    pub fn fqn(&self) -> &str {
        match self {
            TypeContext::Concrete(class) => &class.fqn,
            TypeContext::Enumeration(en) => &en.fqn,
        }
    }

    pub fn short_name(&self) -> &str {
        short_name(self.fqn())
    }

    pub fn as_class(&self) -> Option<&Arc<ClassType>> {
        match self {
            TypeContext::Concrete(class) => Some(class),
            TypeContext::Enumeration(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Arc<EnumType>> {
        match self {
            TypeContext::Enumeration(en) => Some(en),
            TypeContext::Concrete(_) => None,
        }
    }
}

/// A class or struct of the object model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassType {
    pub fqn: SmolStr,
    /// Fully-qualified name of the base type, if any
    pub base: Option<SmolStr>,
}

/// An enumeration and its value names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    pub fqn: SmolStr,
    pub values: Vec<SmolStr>,
}

impl EnumType {
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A field-like member of a [`ClassType`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: SmolStr,
    /// Fully-qualified name of the declaring type
    pub owner: SmolStr,
    pub ty: TypeRef,
    /// Documentation, for display only
    pub doc: Option<String>,
}

/// The declared type of a member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named(SmolStr),
    Generic { name: SmolStr, args: Vec<TypeRef> },
}

impl TypeRef {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn generic(name: impl Into<SmolStr>, args: impl IntoIterator<Item = TypeRef>) -> Self {
        TypeRef::Generic {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) | TypeRef::Generic { name, .. } => name,
        }
    }

    /// The element type, when this is one of the given collection types.
    ///
    /// `collections` may hold fully-qualified or short names.
    pub fn collection_element(&self, collections: &[SmolStr]) -> Option<&TypeRef> {
        let TypeRef::Generic { name, args } = self else {
            return None;
        };
        let is_collection = collections
            .iter()
            .any(|c| c == name || c == short_name(name));
        if is_collection { args.first() } else { None }
    }
}

/// An attribute instance attached to a member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInstance {
    /// Fully-qualified attribute type name
    #[serde(rename = "type")]
    pub type_name: SmolStr,
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<AttributeArgument>,
}

/// A positional attribute argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeArgument {
    /// A string constant the host could evaluate
    Constant(SmolStr),
    /// Anything the host could not evaluate. `metadata` is the host's
    /// rendered dump of the attribute, when it can produce one.
    Expression { metadata: Option<String> },
}
