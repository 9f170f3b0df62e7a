#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Go-to-definition across documents.

use defnav::LineCol;
use defnav::ide::{NavigationKind, NavigationTarget};

use crate::helpers::analysis_helpers::{host_with_scope, offset_of, rimworld_host};
use crate::helpers::fixtures::{self, PAWNS_XML, TERRAIN_XML, WALLS_XML};

fn single(targets: Vec<NavigationTarget>) -> NavigationTarget {
    assert_eq!(targets.len(), 1, "{targets:?}");
    targets.into_iter().next().unwrap()
}

#[test]
fn test_goto_def_usage_in_other_document() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let result = analysis.goto_definition(ids[2], offset_of(PAWNS_XML, "Wall</race>", 0));
    let target = single(result.targets);

    assert_eq!(target.kind, NavigationKind::Def);
    assert_eq!(target.name, "Wall");
    assert_eq!(target.container, "ThingDef");

    let location = target.location.unwrap();
    assert_eq!(location.file, ids[0]);
    assert_eq!(&WALLS_XML[location.range], "Wall");
    assert_eq!(location.start, LineCol::new(8, 13));
}

#[test]
fn test_goto_declaration_is_itself() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();
    let offset = offset_of(TERRAIN_XML, "Heavy</defName>", 0);

    let target = single(analysis.goto_definition(ids[1], offset).targets);
    let location = target.location.unwrap();

    assert_eq!(location.file, ids[1]);
    assert!(location.range.contains(offset));
}

#[test]
fn test_goto_parent_name() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let target = single(
        analysis
            .goto_definition(ids[0], offset_of(WALLS_XML, "\"WallBase\"", 1))
            .targets,
    );

    assert_eq!(target.kind, NavigationKind::Def);
    assert_eq!(target.name, "WallBase");
    let location = target.location.unwrap();
    assert_eq!(&WALLS_XML[location.range], "\"WallBase\"");
}

#[test]
fn test_goto_member_has_no_location() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let target = single(analysis.goto_definition(ids[0], offset_of(WALLS_XML, "label>", 0)).targets);

    assert_eq!(target.kind, NavigationKind::Member);
    assert_eq!(target.name, "label");
    assert_eq!(target.container, "Verse.Def");
    assert_eq!(target.doc.as_deref(), Some("Lowercase display name"));
    assert_eq!(target.location, None);
}

#[test]
fn test_goto_alias_lands_on_real_member() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let target = single(analysis.goto_definition(ids[0], offset_of(WALLS_XML, "maxStack>", 0)).targets);

    assert_eq!(target.name, "stackLimit");
    assert_eq!(target.container, "Verse.ThingDef");
}

#[test]
fn test_goto_enum_value() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let target = single(analysis.goto_definition(ids[2], offset_of(PAWNS_XML, "Male", 0)).targets);

    assert_eq!(target.kind, NavigationKind::EnumValue);
    assert_eq!(target.name, "Male");
    assert_eq!(target.container, "Verse.Gender");
}

#[test]
fn test_goto_type() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let target = single(analysis.goto_definition(ids[1], offset_of(TERRAIN_XML, "TerrainDef>", 0)).targets);

    assert_eq!(target.kind, NavigationKind::Type);
    assert_eq!(target.name, "TerrainDef");
    assert_eq!(target.container, "Verse.TerrainDef");
}

#[test]
fn test_goto_nothing() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    assert!(analysis.goto_definition(ids[0], offset_of(WALLS_XML, "A wall.", 0)).is_empty());
    assert!(analysis.goto_definition(ids[1], offset_of(TERRAIN_XML, "unknownField", 0)).is_empty());
    assert!(analysis.goto_definition(ids[0], 10_000.into()).is_empty());
}

#[test]
fn test_goto_through_auxiliary_index() {
    let turrets = r#"<Defs>
  <MyMod.TurretDef>
    <defName>Autocannon</defName>
    <range>30</range>
    <ammo>Wall</ammo>
    <label>autocannon</label>
  </MyMod.TurretDef>
</Defs>"#;
    let (host, ids) = host_with_scope(
        fixtures::modded_scope(),
        &[("Walls.xml", WALLS_XML), ("Turrets.xml", turrets)],
    );
    let analysis = host.analysis();

    let range = single(analysis.goto_definition(ids[1], offset_of(turrets, "range>", 0)).targets);
    assert_eq!(range.container, "MyMod.TurretDef");

    // inherited from the primary index
    let label = single(analysis.goto_definition(ids[1], offset_of(turrets, "label>", 0)).targets);
    assert_eq!(label.container, "Verse.Def");

    let ammo = single(analysis.goto_definition(ids[1], offset_of(turrets, "Wall</ammo>", 0)).targets);
    assert_eq!(ammo.location.unwrap().file, ids[0]);

    // a qualified def tag declares under the short type name
    let declaration = single(analysis.goto_definition(ids[1], offset_of(turrets, "Autocannon", 0)).targets);
    assert_eq!(declaration.container, "TurretDef");
}
