#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Loading a workspace from disk.

use std::fs;
use std::path::Path;

use defnav::project::{LoadError, WorkspaceLoader, load_config};
use defnav::AnalysisHost;
use tempfile::TempDir;

use crate::helpers::analysis_helpers::{classify, offset_of};
use crate::helpers::fixtures::{GAME_TYPES, MOD_TYPES, PAWNS_XML, TERRAIN_XML, WALLS_XML};

fn write(dir: &Path, relative: &str, text: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Types/Assembly-CSharp.json", GAME_TYPES);
    write(dir.path(), "Types/MyMod.json", MOD_TYPES);
    write(dir.path(), "Defs/Buildings/Walls.xml", WALLS_XML);
    write(dir.path(), "Defs/Terrain.xml", TERRAIN_XML);
    write(dir.path(), "Defs/Pawns.xml", PAWNS_XML);
    write(dir.path(), "Defs/readme.txt", "not a def");
    dir
}

#[test]
fn test_load_workspace_and_resolve() {
    let dir = workspace();
    let loader = WorkspaceLoader::new();

    let scope = loader
        .load_scope_from_directory(dir.path().join("Types"), "Assembly-CSharp.json")
        .unwrap();
    assert_eq!(scope.all().count(), 2);

    let mut host = AnalysisHost::new(scope);
    let ids = loader.load_directory_into_host(dir.path().join("Defs"), &mut host).unwrap();
    assert_eq!(ids.len(), 3);

    // path order: Buildings/Walls.xml, Pawns.xml, Terrain.xml
    let pawns = host.file_id(dir.path().join("Defs/Pawns.xml")).unwrap();
    let walls = host.file_id(dir.path().join("Defs/Buildings/Walls.xml")).unwrap();
    assert_eq!(ids, [walls, pawns, host.file_id(dir.path().join("Defs/Terrain.xml")).unwrap()]);

    let analysis = host.analysis();
    let resolution = classify(&analysis, pawns, PAWNS_XML, "Wall</race>", 0).unwrap();
    assert_eq!(resolution.def_declaration().unwrap().file, walls);
}

#[test]
fn test_reload_keeps_file_ids() {
    let dir = workspace();
    let loader = WorkspaceLoader::new();
    let scope = loader
        .load_scope(dir.path().join("Types/Assembly-CSharp.json"), std::iter::empty::<&Path>())
        .unwrap();
    let mut host = AnalysisHost::new(scope);

    let first = loader.load_directory_into_host(dir.path().join("Defs"), &mut host).unwrap();
    let second = loader.load_directory_into_host(dir.path().join("Defs"), &mut host).unwrap();

    assert_eq!(first, second);
    assert_eq!(host.document_count(), 3);
}

#[test]
fn test_load_single_file() {
    let dir = workspace();
    let loader = WorkspaceLoader::new();
    let scope = loader
        .load_scope(
            dir.path().join("Types/Assembly-CSharp.json"),
            [dir.path().join("Types/MyMod.json")],
        )
        .unwrap();
    let mut host = AnalysisHost::new(scope);

    let file = loader
        .load_file_into_host(dir.path().join("Defs/Terrain.xml"), &mut host)
        .unwrap();
    let analysis = host.analysis();

    assert!(classify(&analysis, file, TERRAIN_XML, "Granite_Smooth</smoothed", 0).is_some());
    assert!(analysis.has_reference(file, offset_of(TERRAIN_XML, "Granite_Smooth</smoothed", 0)));
}

#[test]
fn test_load_errors() {
    let dir = workspace();
    let loader = WorkspaceLoader::new();
    let mut host = AnalysisHost::new(crate::helpers::fixtures::game_scope());

    assert!(matches!(
        loader.load_directory_into_host(dir.path().join("Missing"), &mut host),
        Err(LoadError::DirectoryNotFound(_))
    ));
    assert!(matches!(
        loader.load_file_into_host(dir.path().join("Defs/readme.txt"), &mut host),
        Err(LoadError::UnsupportedExtension(_))
    ));

    write(dir.path(), "Types/Broken.json", "{ \"types\": [");
    assert!(matches!(
        loader.load_scope(dir.path().join("Types/Broken.json"), std::iter::empty::<&Path>()),
        Err(LoadError::Json { .. })
    ));
    assert_eq!(host.document_count(), 0);
}

#[test]
fn test_load_config_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "defnav.json",
        r#"{ "def_name_tag": "id", "case_sensitive_def_names": false }"#,
    );

    let config = load_config(&dir.path().join("defnav.json")).unwrap();

    assert_eq!(config.def_name_tag, "id");
    assert!(!config.case_sensitive_def_names);
    assert_eq!(config.list_item_tag, "li");
}

#[test]
fn test_loaded_config_drives_resolution() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "defnav.json", r#"{ "def_name_tag": "id" }"#);
    let config = load_config(&dir.path().join("defnav.json")).unwrap();

    let defs = "<Defs><ThingDef><id>Wall</id></ThingDef><PawnKindDef><race>Wall</race></PawnKindDef></Defs>";
    let mut host = AnalysisHost::with_config(crate::helpers::fixtures::game_scope(), config);
    let file = host.set_document("Defs.xml", defs);
    let analysis = host.analysis();

    let usage = classify(&analysis, file, defs, "Wall</race>", 0).unwrap();
    assert_eq!(usage.def_declaration().unwrap().value.to_string(), "ThingDef/Wall");
}
