//! Naming conventions the resolution rules depend on.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Conventions of the def format and the object model behind it.
///
/// The defaults describe RimWorld: `<defName>` declares, `Name="..."` and
/// `ParentName="..."` declare and reference abstract parents, list elements
/// are `<li>`, and aliases are `[LoadAlias("...")]` attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Tag whose text declares a def name
    pub def_name_tag: SmolStr,
    /// Attribute whose value declares a def name
    pub declaration_attribute: SmolStr,
    /// Attribute whose value references a def name
    pub reference_attribute: SmolStr,
    /// Tag used for the elements of a collection
    pub list_item_tag: SmolStr,
    /// Attribute that substitutes the type of the tag carrying it
    pub class_attribute: SmolStr,
    /// Fully-qualified type of the alias attribute
    pub alias_attribute: SmolStr,
    /// Generic types whose first argument is the element type.
    /// Fully-qualified or short names.
    pub collections: Vec<SmolStr>,
    pub qualifier_separator: char,
    /// When false, def names are folded to lowercase for lookup; the stored
    /// declaration keeps its original spelling.
    pub case_sensitive_def_names: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            def_name_tag: SmolStr::new_static("defName"),
            declaration_attribute: SmolStr::new_static("Name"),
            reference_attribute: SmolStr::new_static("ParentName"),
            list_item_tag: SmolStr::new_static("li"),
            class_attribute: SmolStr::new_static("Class"),
            alias_attribute: SmolStr::new_static("Verse.LoadAliasAttribute"),
            collections: [
                "System.Collections.Generic.List",
                "System.Collections.Generic.HashSet",
                "System.Collections.Generic.IEnumerable",
                "List",
                "HashSet",
            ]
            .into_iter()
            .map(SmolStr::new_static)
            .collect(),
            qualifier_separator: '.',
            case_sensitive_def_names: true,
        }
    }
}

impl ResolveConfig {
    /// Whether `name` contains a namespace qualifier.
    pub fn is_qualified(&self, name: &str) -> bool {
        name.contains(self.qualifier_separator)
    }
}
