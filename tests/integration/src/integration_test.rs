//! End-to-end integration test for a full sync
//!
//! Exercises the complete flow: import settings and project view on disk ->
//! query arguments -> snapshot JSON -> reconciliation on the in-memory host.

use pretty_assertions::assert_eq;
use qsync_core::config::ImportSettings;
use qsync_core::model::InMemoryProject;
use qsync_core::plugin::PluginRegistry;
use qsync_core::sync::{ProjectListener, ProjectUpdater, SyncContext};
use qsync_core::{Error, SyncTransaction};
use qsync_fs::NormalizedPath;
use qsync_project::ProjectSnapshot;
use qsync_test_utils::TestWorkspace;
use std::fs;

const PROJECT_VIEW: &str = r#"
directories = ["java/com/app", "-java/com/app/experimental"]
workspace_type = "android"
"#;

const SNAPSHOT: &str = r#"{
    "project": {
        "libraries": [
            { "name": ".dependencies", "classes_jar": [{ "path": ".qsync/jars", "recursive": true }] }
        ],
        "modules": [
            {
                "name": ".workspace",
                "type": "MODULE_TYPE_DEFAULT",
                "library_name": [".dependencies"],
                "content_entries": [
                    {
                        "root": { "base": "WORKSPACE", "path": "java/com/app" },
                        "sources": [{ "path": "java/com/app", "package_prefix": "com.app" }],
                        "excludes": ["java/com/app/experimental"]
                    },
                    {
                        "root": { "base": "PROJECT", "path": ".qsync/gensrc" },
                        "sources": [{ "path": ".qsync/gensrc", "is_generated": true }]
                    }
                ],
                "resource_directories": ["java/com/app/res"]
            }
        ]
    }
}"#;

/// Set up a workspace with settings, a project view and a snapshot file.
fn setup() -> (TestWorkspace, ImportSettings) {
    let ws = TestWorkspace::new();
    ws.mkdir("java/com/app/res");
    ws.write_project_view(PROJECT_VIEW);
    let settings_path = ws.write_settings("app");
    let settings = ImportSettings::load(&settings_path).expect("Should load settings");
    (ws, settings)
}

fn load_snapshot(ws: &TestWorkspace, settings: &ImportSettings) -> ProjectSnapshot {
    let view = settings.load_project_view().expect("Should load view");
    let path = ws.project_dir().join("snapshot.json");
    fs::write(&path, SNAPSHOT).unwrap();
    let mut snapshot = ProjectSnapshot::load(&path).expect("Should load snapshot");
    snapshot.query_spec = view.query_spec();
    snapshot
}

#[test]
fn test_project_view_to_query_args() {
    let (_ws, settings) = setup();
    let view = settings.load_project_view().unwrap();
    let spec = view.query_spec();

    assert_eq!(
        spec.query_args(),
        [
            "(//java/com/app/...:* - //java/com/app/experimental/...:*)",
            "--output=streamed_proto",
            "--relative_locations=true",
        ]
    );
    assert_eq!(spec.cache_key(), view.query_spec().cache_key());
}

#[test]
fn test_full_sync() {
    let (ws, settings) = setup();
    let snapshot = load_snapshot(&ws, &settings);
    let view = settings.load_project_view().unwrap();
    let updater = ProjectUpdater::new(
        InMemoryProject::new(),
        &settings,
        view,
        PluginRegistry::with_builtins(),
    )
    .expect("Should build updater");

    let mut context = SyncContext::new();
    updater
        .graph_created(&mut context, &snapshot)
        .expect("Sync should succeed");

    let workspace = NormalizedPath::new(ws.workspace_root());
    let project = NormalizedPath::new(ws.project_dir());
    let state = updater.host().snapshot();

    let library = state.library(".dependencies").expect("library should exist");
    assert_eq!(
        library.model.jar_directory_recursive(&project.join(".qsync/jars").to_ide_url()),
        Some(true)
    );

    let module = state.module(".workspace").expect("module should exist");
    assert_eq!(
        module.file_path,
        project.join(".qsync/modules/.workspace.iml")
    );
    let entries = module.roots.content_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].url(), workspace.join("java/com/app").to_ide_url());
    assert_eq!(
        entries[0].exclude_folders(),
        [workspace.join("java/com/app/experimental").to_ide_url()]
    );
    // source folder plus the android resource root
    assert_eq!(entries[0].source_folders().len(), 2);
    assert_eq!(entries[1].url(), project.join(".qsync/gensrc").to_ide_url());
    assert!(entries[1].source_folders()[0].properties.generated);
    assert_eq!(module.roots.library_entries()[0].library, library.handle);
}

#[test]
fn test_failed_resync_keeps_previous_model() {
    let (ws, settings) = setup();
    let snapshot = load_snapshot(&ws, &settings);
    let updater = ProjectUpdater::new(
        InMemoryProject::new(),
        &settings,
        settings.load_project_view().unwrap(),
        PluginRegistry::with_builtins(),
    )
    .unwrap();
    updater
        .graph_created(&mut SyncContext::new(), &snapshot)
        .expect("First sync should succeed");
    let before = updater.host().snapshot();

    let mut broken = snapshot.clone();
    broken.project.libraries.clear();
    let err = updater
        .graph_created(&mut SyncContext::new(), &broken)
        .unwrap_err();

    assert!(matches!(err, Error::MissingLibrary { .. }));
    assert_eq!(updater.host().snapshot(), before);

    // the host is still usable after a rollback
    let libraries = updater
        .host()
        .run(|models| Ok(models.all_libraries().len()))
        .unwrap();
    assert_eq!(libraries, 1);
}

#[test]
fn test_report_is_json() {
    let (ws, settings) = setup();
    let snapshot = load_snapshot(&ws, &settings);
    let updater = ProjectUpdater::new(
        InMemoryProject::new(),
        &settings,
        settings.load_project_view().unwrap(),
        PluginRegistry::new(),
    )
    .unwrap();

    let report = updater
        .update_project_model(snapshot.project(), &mut SyncContext::new())
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["libraries"][0], ".dependencies");
    assert_eq!(json["modules"][0], ".workspace");
    assert_eq!(json["removed_libraries"], 0);
}
