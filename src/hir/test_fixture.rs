//! A small RimWorld-shaped object model shared by the unit tests.

use std::sync::Arc;

use crate::scope::{
    AttributeArgument, AttributeInstance, FieldDef, SymbolScope, TypeDef, TypeModel, TypeRef,
};

fn list_of(element: &str) -> TypeRef {
    TypeRef::generic("System.Collections.Generic.List", [TypeRef::named(element)])
}

pub(crate) fn model() -> TypeModel {
    TypeModel::builder("Assembly-CSharp")
        .declarable_root("Verse.Def")
        .type_def(
            TypeDef::class("Verse.Def")
                .field(FieldDef::new("defName", TypeRef::named("System.String")))
                .field(
                    FieldDef::new("description", TypeRef::named("System.String"))
                        .alias("desc")
                        .doc("Shown in the info card"),
                ),
        )
        .type_def(TypeDef::class("Verse.BuildableDef").extends("Verse.Def"))
        .type_def(
            TypeDef::class("Verse.ThingDef")
                .extends("Verse.BuildableDef")
                .field(FieldDef::new("comps", list_of("Verse.CompProperties")))
                .field(FieldDef::new("building", TypeRef::named("Verse.BuildingProperties")))
                .field(FieldDef::new("stuffCategories", list_of("Verse.StuffCategoryDef")))
                .field(
                    FieldDef::new("stackLimit", TypeRef::named("System.Int32")).attribute(
                        AttributeInstance {
                            type_name: "Verse.LoadAliasAttribute".into(),
                            args: vec![AttributeArgument::Expression {
                                metadata: Some(
                                    "[Verse.LoadAliasAttribute(Arguments: \"maxStack\")]".into(),
                                ),
                            }],
                        },
                    ),
                ),
        )
        .type_def(
            TypeDef::class("Verse.Building")
                .field(FieldDef::new("comps", list_of("Verse.CompProperties"))),
        )
        .type_def(
            TypeDef::class("Verse.CompProperties")
                .field(FieldDef::new("compClass", TypeRef::named("System.Type"))),
        )
        .type_def(
            TypeDef::class("Verse.CompProperties_Power")
                .extends("Verse.CompProperties")
                .field(FieldDef::new("basePowerConsumption", TypeRef::named("System.Single"))),
        )
        .type_def(
            TypeDef::class("Verse.BuildingProperties")
                .field(FieldDef::new("smoothedThing", TypeRef::named("Verse.ThingDef")))
                .field(FieldDef::new("isNaturalRock", TypeRef::named("System.Boolean"))),
        )
        .type_def(
            TypeDef::class("Verse.PawnKindDef")
                .extends("Verse.Def")
                .field(FieldDef::new("race", TypeRef::named("Verse.ThingDef")))
                .field(FieldDef::new("fixedGender", TypeRef::named("Verse.Gender"))),
        )
        .type_def(TypeDef::class("Verse.StuffCategoryDef").extends("Verse.Def"))
        .type_def(TypeDef::enumeration("Verse.Gender", ["None", "Male", "Female"]))
        .build()
}

pub(crate) fn scope() -> SymbolScope {
    SymbolScope::new(Arc::new(model()))
}
