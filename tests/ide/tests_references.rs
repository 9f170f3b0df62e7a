#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Find usages across documents.

use defnav::FileId;
use defnav::ide::Usage;

use crate::helpers::analysis_helpers::{host_with, offset_of, rimworld_host};
use crate::helpers::fixtures::{PAWNS_XML, TERRAIN_XML, WALLS_XML};

fn texts<'a>(usages: &[Usage], files: &[(FileId, &'a str)]) -> Vec<&'a str> {
    usages
        .iter()
        .map(|usage| {
            let text = files.iter().find(|(id, _)| *id == usage.file).unwrap().1;
            &text[usage.range]
        })
        .collect()
}

#[test]
fn test_usages_of_def_from_declaration() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let result = analysis.find_usages(ids[0], offset_of(WALLS_XML, "Wall</defName>", 0), true);

    // <unknownField>Wall</unknownField> has no typed context
    let files: Vec<_> = result.usages.iter().map(|u| u.file).collect();
    assert_eq!(files, [ids[0], ids[0], ids[2]]);
    assert!(result.usages[0].is_declaration);
    assert!(!result.usages[1].is_declaration);
    assert!(!result.usages[2].is_declaration);
    assert_eq!(
        result.usages[2].range,
        defnav::TextRange::at(offset_of(PAWNS_XML, "Wall</race>", 0) - defnav::TextSize::new(1), 4.into())
    );
}

#[test]
fn test_usages_same_from_any_anchor() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let from_declaration = analysis.find_usages(ids[0], offset_of(WALLS_XML, "Wall</defName>", 0), true);
    let from_reference = analysis.find_usages(ids[2], offset_of(PAWNS_XML, "Wall</race>", 0), true);

    assert_eq!(from_declaration.usages, from_reference.usages);
}

#[test]
fn test_usages_without_declaration() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let result = analysis.find_usages(ids[2], offset_of(PAWNS_XML, "Wall</race>", 0), false);

    assert_eq!(result.len(), 2);
    assert!(!result.include_declaration);
    assert!(result.usages.iter().all(|u| !u.is_declaration));
}

#[test]
fn test_usages_of_name_attribute() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();
    let files = [(ids[0], WALLS_XML)];

    let result = analysis.find_usages(ids[0], offset_of(WALLS_XML, "\"WallBase\"", 0), true);

    assert_eq!(texts(&result.usages, &files), ["\"WallBase\"", "\"WallBase\""]);
    assert!(result.usages[0].is_declaration);
    assert!(!result.usages[1].is_declaration);
}

#[test]
fn test_usages_of_member_across_documents() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    // every <defName> header and footer, whatever the def type
    let result = analysis.find_usages(ids[2], offset_of(PAWNS_XML, "defName>", 0), true);

    assert_eq!(result.len(), 2 + 8 + 2);
    assert!(result.usages.iter().all(|u| !u.is_declaration));
}

#[test]
fn test_usages_of_aliased_member() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();
    let files = [(ids[0], WALLS_XML)];

    let result = analysis.find_usages(ids[0], offset_of(WALLS_XML, "desc>", 0), true);

    assert_eq!(texts(&result.usages, &files), ["desc", "desc"]);
}

#[test]
fn test_usages_of_enum_value() {
    let other = "<Defs><PawnKindDef><defName>Visitor</defName><fixedGender>Male</fixedGender></PawnKindDef>\
                 <PawnKindDef><defName>Guard</defName><fixedGender>Female</fixedGender></PawnKindDef></Defs>";
    let (host, ids) = host_with(&[("Pawns.xml", PAWNS_XML), ("Visitors.xml", other)]);
    let analysis = host.analysis();

    let result = analysis.find_usages(ids[0], offset_of(PAWNS_XML, "Male", 0), true);

    let files: Vec<_> = result.usages.iter().map(|u| u.file).collect();
    assert_eq!(files, [ids[0], ids[1]]);
}

#[test]
fn test_usages_of_type() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();
    let files = [(ids[0], WALLS_XML), (ids[1], TERRAIN_XML), (ids[2], PAWNS_XML)];

    let result = analysis.find_usages(ids[0], offset_of(WALLS_XML, "ThingDef", 0), true);

    assert_eq!(texts(&result.usages, &files), ["ThingDef"; 4]);
    assert!(result.usages.iter().all(|u| u.file == ids[0]));
}

#[test]
fn test_usages_of_nothing() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    assert!(analysis.find_usages(ids[0], offset_of(WALLS_XML, "A wall.", 0), true).is_empty());
    assert!(analysis.find_usages(ids[1], offset_of(TERRAIN_XML, "Wall</unknownField>", 0), true).is_empty());
}

#[test]
fn test_usages_report_line_and_column() {
    let (host, ids) = rimworld_host();
    let analysis = host.analysis();

    let result = analysis.find_usages(ids[2], offset_of(PAWNS_XML, "Wall</race>", 0), false);
    let in_pawns = result.usages.iter().find(|u| u.file == ids[2]).unwrap();

    assert_eq!(in_pawns.start, defnav::LineCol::new(3, 10));
}
