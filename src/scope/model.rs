//! In-memory [`TypeIndex`] built from type descriptions.
//!
//! The JSON form mirrors what a reflection dump of an assembly produces:
//!
//! ```json
//! {
//!   "label": "Assembly-CSharp",
//!   "declarable_root": "Verse.Def",
//!   "types": [
//!     { "name": "Verse.Def", "fields": [{ "name": "defName", "type": "System.String" }] },
//!     { "name": "Verse.ThingDef", "base": "Verse.Def", "fields": [
//!         { "name": "comps", "type": { "name": "List", "args": ["Verse.CompProperties"] } },
//!         { "name": "label", "type": "System.String",
//!           "attributes": [{ "type": "Verse.LoadAliasAttribute", "args": ["title"] }] }
//!     ] },
//!     { "name": "Verse.Gender", "enum": ["None", "Male", "Female"] }
//!   ]
//! }
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::TypeIndex;
use super::types::{
    AttributeArgument, AttributeInstance, ClassType, EnumType, Member, TypeContext, TypeRef,
    short_name,
};

/// Attribute type used by [`FieldDef::alias`].
const LOAD_ALIAS_ATTRIBUTE: &str = "Verse.LoadAliasAttribute";

/// Description of one type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Fully-qualified name
    pub name: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,
    /// Present only for enumerations
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<SmolStr>>,
}

impl TypeDef {
    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            base: None,
            fields: Vec::new(),
            values: None,
        }
    }

    pub fn enumeration<I, S>(name: impl Into<SmolStr>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            name: name.into(),
            base: None,
            fields: Vec::new(),
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn extends(mut self, base: impl Into<SmolStr>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    fn context(&self) -> TypeContext {
        match &self.values {
            Some(values) => TypeContext::Enumeration(Arc::new(EnumType {
                fqn: self.name.clone(),
                values: values.clone(),
            })),
            None => TypeContext::Concrete(Arc::new(ClassType {
                fqn: self.name.clone(),
                base: self.base.clone(),
            })),
        }
    }
}

/// Description of one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: SmolStr,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<SmolStr>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Vec::new(),
            doc: None,
        }
    }

    /// Attach a load alias with a constant argument.
    pub fn alias(self, alias: impl Into<SmolStr>) -> Self {
        self.attribute(AttributeInstance {
            type_name: SmolStr::new(LOAD_ALIAS_ATTRIBUTE),
            args: vec![AttributeArgument::Constant(alias.into())],
        })
    }

    pub fn attribute(mut self, attribute: AttributeInstance) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

#[derive(Deserialize)]
struct RawModel {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    declarable_root: Option<SmolStr>,
    types: Vec<TypeDef>,
}

/// Builder for [`TypeModel`].
#[derive(Debug, Default)]
pub struct TypeModelBuilder {
    label: String,
    declarable_root: Option<SmolStr>,
    types: Vec<TypeDef>,
}

impl TypeModelBuilder {
    pub fn declarable_root(mut self, fqn: impl Into<SmolStr>) -> Self {
        self.declarable_root = Some(fqn.into());
        self
    }

    pub fn type_def(mut self, def: TypeDef) -> Self {
        self.types.push(def);
        self
    }

    pub fn build(self) -> TypeModel {
        TypeModel::new(self.label, self.declarable_root, self.types)
    }
}

/// An in-memory type index.
#[derive(Debug)]
pub struct TypeModel {
    label: String,
    declarable_root: Option<SmolStr>,
    /// Types by fully-qualified name, in declaration order
    types: IndexMap<SmolStr, (TypeDef, TypeContext)>,
    /// Short name → fully-qualified names, in declaration order
    by_short_name: FxHashMap<SmolStr, Vec<SmolStr>>,
}

impl TypeModel {
    pub fn builder(label: impl Into<String>) -> TypeModelBuilder {
        TypeModelBuilder {
            label: label.into(),
            ..TypeModelBuilder::default()
        }
    }

    /// Build a model. When two descriptions share a name the first is kept.
    pub fn new(
        label: impl Into<String>,
        declarable_root: Option<SmolStr>,
        defs: impl IntoIterator<Item = TypeDef>,
    ) -> Self {
        let label = label.into();
        let mut types = IndexMap::new();
        let mut by_short_name: FxHashMap<SmolStr, Vec<SmolStr>> = FxHashMap::default();

        for def in defs {
            if types.contains_key(&def.name) {
                tracing::warn!("[{}] duplicate type {} ignored", label, def.name);
                continue;
            }
            by_short_name
                .entry(SmolStr::new(short_name(&def.name)))
                .or_default()
                .push(def.name.clone());
            let context = def.context();
            types.insert(def.name.clone(), (def, context));
        }

        Self {
            label,
            declarable_root,
            types,
            by_short_name,
        }
    }

    /// Parse the JSON form shown in the module docs.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawModel = serde_json::from_str(json)?;
        Ok(Self::new(
            raw.label.unwrap_or_else(|| "types".to_string()),
            raw.declarable_root,
            raw.types,
        ))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn def(&self, fqn: &str) -> Option<&TypeDef> {
        self.types.get(fqn).map(|(def, _)| def)
    }
}

impl TypeIndex for TypeModel {
    fn label(&self) -> &str {
        &self.label
    }

    fn lookup_by_short_name(&self, name: &str) -> Vec<TypeContext> {
        self.by_short_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|fqn| self.types.get(fqn).map(|(_, ctx)| ctx.clone()))
            .collect()
    }

    fn lookup_by_fqn(&self, fqn: &str) -> Option<TypeContext> {
        self.types.get(fqn).map(|(_, ctx)| ctx.clone())
    }

    fn members_of(&self, ty: &ClassType) -> Vec<Member> {
        let Some(def) = self.def(&ty.fqn) else {
            return Vec::new();
        };
        def.fields
            .iter()
            .map(|field| Member {
                name: field.name.clone(),
                owner: def.name.clone(),
                ty: field.ty.clone(),
                doc: field.doc.clone(),
            })
            .collect()
    }

    fn attributes_of(&self, member: &Member) -> Vec<AttributeInstance> {
        self.def(&member.owner)
            .and_then(|def| def.fields.iter().find(|f| f.name == member.name))
            .map(|field| field.attributes.clone())
            .unwrap_or_default()
    }

    fn is_subtype_of_declarable_root(&self, fqn: &str) -> bool {
        let Some(root) = &self.declarable_root else {
            return false;
        };

        let mut visited = FxHashSet::default();
        let mut current = Some(SmolStr::new(fqn));
        while let Some(name) = current {
            if name == *root {
                return true;
            }
            if !visited.insert(name.clone()) {
                tracing::warn!("[{}] inheritance cycle through {}", self.label, name);
                return false;
            }
            current = self.def(&name).and_then(|def| def.base.clone());
        }
        false
    }
}
