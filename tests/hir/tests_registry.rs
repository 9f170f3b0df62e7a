#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Def registry: identity, load order and name folding.

use defnav::FileId;
use defnav::hir::{DeclarationSite, DefNameValue, DefRegistry, ResolveConfig};
use defnav::syntax::{Parse, parse_document};

use crate::helpers::analysis_helpers::{classify, host_with, offset_of};
use crate::helpers::fixtures::{PAWNS_XML, TERRAIN_XML, WALLS_XML};

fn build(texts: &[&str], config: &ResolveConfig) -> DefRegistry {
    let parses: Vec<Parse> = texts.iter().map(|text| parse_document(text)).collect();
    DefRegistry::build(
        parses
            .iter()
            .enumerate()
            .map(|(i, parse)| (FileId::new(i as u32), &parse.green)),
        config,
    )
}

#[test]
fn test_registry_identity() {
    let registry = build(&[WALLS_XML, TERRAIN_XML, PAWNS_XML], &ResolveConfig::default());

    for decl in registry.declarations() {
        assert!(registry.has_tag(&decl.value));
        assert_eq!(registry.get_def_name(&decl.value), Some(&decl.value));
        assert_eq!(registry.get_tag_by_def(&decl.value), Some(decl));
    }
}

#[test]
fn test_registry_contents() {
    let registry = build(&[WALLS_XML, TERRAIN_XML, PAWNS_XML], &ResolveConfig::default());
    let values: Vec<String> = registry
        .declarations()
        .iter()
        .map(|decl| decl.value.to_string())
        .collect();

    assert_eq!(
        values,
        [
            "ThingDef/WallBase",
            "ThingDef/Wall",
            "TerrainDef/Granite_Rough",
            "TerrainDef/Granite_Smooth",
            "TerrainAffordanceDef/Heavy",
            "ResearchProjectDef/Stonecutting",
            "PawnKindDef/Colonist",
        ]
    );
    assert!(registry.duplicates().is_empty());
    assert!(registry.names().contains("Granite_Rough"));
    assert!(!registry.names().contains("Medieval"));
}

#[test]
fn test_declaration_sites() {
    let registry = build(&[WALLS_XML], &ResolveConfig::default());

    let base = registry.get_tag_by_def(&DefNameValue::new("ThingDef", "WallBase")).unwrap();
    assert_eq!(base.site, DeclarationSite::NameAttribute);

    let wall = registry.get_tag_by_def(&DefNameValue::new("ThingDef", "Wall")).unwrap();
    assert_eq!(wall.site, DeclarationSite::DefNameTag);
    assert_eq!(&WALLS_XML[wall.range], "Wall");
    assert!(WALLS_XML[wall.tag_range].starts_with("<ThingDef ParentName"));
    assert!(wall.tag_range.contains_range(wall.range));
}

#[test]
fn test_def_type_is_part_of_identity() {
    let text = "<Defs>
  <ThingDef><defName>Steel</defName></ThingDef>
  <StuffCategoryDef><defName>Steel</defName></StuffCategoryDef>
</Defs>";
    let registry = build(&[text], &ResolveConfig::default());

    assert_eq!(registry.len(), 2);
    assert!(registry.duplicates().is_empty());
    assert!(!registry.has_tag(&DefNameValue::new("TerrainDef", "Steel")));
}

#[test]
fn test_first_loaded_declaration_wins() {
    let first = "<Defs><ThingDef><defName>Wall</defName></ThingDef></Defs>";
    let second = "<Defs><ThingDef><defName>Wall</defName><label>mine</label></ThingDef></Defs>";
    let registry = build(&[first, second], &ResolveConfig::default());

    let wall = registry.get_tag_by_def(&DefNameValue::new("ThingDef", "Wall")).unwrap();
    assert_eq!(wall.file, FileId::new(0));
    assert_eq!(registry.duplicates().len(), 1);
    assert_eq!(registry.duplicates()[0].file, FileId::new(1));
}

#[test]
fn test_first_declaration_in_document_wins() {
    let text = "<Defs>
  <ThingDef Name=\"Wall\"><defName>Wall</defName></ThingDef>
</Defs>";
    let registry = build(&[text], &ResolveConfig::default());

    let wall = registry.get_tag_by_def(&DefNameValue::new("ThingDef", "Wall")).unwrap();
    assert_eq!(wall.site, DeclarationSite::NameAttribute);
    assert_eq!(registry.duplicates().len(), 1);
}

#[test]
fn test_losing_duplicate_refers_to_winner() {
    let first = "<Defs><ThingDef><defName>Wall</defName></ThingDef></Defs>";
    let second = "<Defs><ThingDef><defName>Wall</defName></ThingDef></Defs>";
    let (host, ids) = host_with(&[("A.xml", first), ("B.xml", second)]);
    let analysis = host.analysis();

    let winner = classify(&analysis, ids[0], first, "Wall", 0).unwrap();
    let loser = classify(&analysis, ids[1], second, "Wall", 0).unwrap();

    assert!(loser.as_reference().is_some());
    assert_eq!(loser.def_declaration(), winner.def_declaration());
}

#[test]
fn test_case_sensitive_by_default() {
    let registry = build(&[WALLS_XML], &ResolveConfig::default());

    assert!(registry.has_tag(&DefNameValue::new("ThingDef", "Wall")));
    assert!(!registry.has_tag(&DefNameValue::new("ThingDef", "wall")));
    assert!(!registry.has_tag(&DefNameValue::new("thingdef", "Wall")));
}

#[test]
fn test_case_insensitive_returns_stored_spelling() {
    let config = ResolveConfig {
        case_sensitive_def_names: false,
        ..ResolveConfig::default()
    };
    let registry = build(&[WALLS_XML], &config);

    let found = registry.get_def_name(&DefNameValue::new("thingdef", "WALL")).unwrap();
    assert_eq!(found, &DefNameValue::new("ThingDef", "Wall"));
}

#[test]
fn test_case_insensitive_usage_resolves() {
    let config = ResolveConfig {
        case_sensitive_def_names: false,
        ..ResolveConfig::default()
    };
    let usage = "<Defs><PawnKindDef><race>WALL</race></PawnKindDef></Defs>";
    let mut host = defnav::AnalysisHost::with_config(crate::helpers::fixtures::game_scope(), config);
    let walls = host.set_document("Walls.xml", WALLS_XML);
    let pawns = host.set_document("Pawns.xml", usage);
    let analysis = host.analysis();

    let resolution = classify(&analysis, pawns, usage, "WALL", 0).unwrap();
    let decl = resolution.def_declaration().unwrap();
    assert_eq!(decl.file, walls);
    assert_eq!(decl.value.def_name, "Wall");

    assert!(analysis.has_reference(pawns, offset_of(usage, "WALL", 0)));
    assert!(analysis.registry().knows_name("wall"));
}

#[test]
fn test_byte_order_mark_document_declares_defs() {
    let text = "\u{FEFF}<Defs>\n  <ThingDef>\n    <defName>Wall</defName>\n  </ThingDef>\n</Defs>";
    let registry = build(&[text], &ResolveConfig::default());

    let decl = registry.get_tag_by_def(&DefNameValue::new("ThingDef", "Wall")).unwrap();
    assert_eq!(decl.site, DeclarationSite::DefNameTag);
    assert_eq!(&text[decl.range], "Wall");
}

#[test]
fn test_empty_name_attribute_declares_nothing() {
    let registry = build(&["<Defs><ThingDef Name=\"\"/></Defs>"], &ResolveConfig::default());

    assert!(registry.is_empty());
}
