//! End-to-end syncs against a temporary project directory.

use std::fs;

use ide_config::{Collection, Database, IdeConfiguration, Server};
use ide_fs::{IdeaFile, IdeaLayout};
use ide_sync::{Error, FileAction, SyncEngine, SyncOptions};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn config_with_database(driver: &str) -> IdeConfiguration {
    let mut db = Database::new("app_db", driver, "localhost", 3306, "appdb");
    db.user = Some("root".to_string());
    IdeConfiguration {
        databases: [db].into_iter().collect(),
        ..IdeConfiguration::default()
    }
}

fn engine(temp: &TempDir) -> SyncEngine {
    SyncEngine::for_project(IdeaLayout::new(temp.path()))
}

#[test]
fn test_first_sync_creates_data_source_files() {
    let temp = TempDir::new().unwrap();
    let mut config = config_with_database("mysql");

    let report = engine(&temp)
        .sync(&mut config, SyncOptions::default())
        .unwrap();

    let files: Vec<_> = report.changes.iter().map(|c| (c.file, c.action)).collect();
    assert_eq!(
        files,
        vec![
            (IdeaFile::DataSources, FileAction::Created),
            (IdeaFile::DataSourcesLocal, FileAction::Created),
        ]
    );
    assert!(!temp.path().join(".idea/workspace.xml").exists());

    let uuid = config.databases.get("app_db").unwrap().id.clone().unwrap();
    let shared = fs::read_to_string(temp.path().join(".idea/dataSources.xml")).unwrap();
    let local = fs::read_to_string(temp.path().join(".idea/dataSources.local.xml")).unwrap();
    assert!(shared.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(shared.contains(&format!("uuid=\"{}\"", uuid)));
    assert!(shared.contains("<jdbc-url>jdbc:mysql://localhost:3306/appdb</jdbc-url>"));
    assert!(local.contains(&format!("uuid=\"{}\"", uuid)));
    assert!(local.contains("<user-name>root</user-name>"));
}

#[test]
fn test_second_sync_is_unchanged_and_keeps_uuid() {
    let temp = TempDir::new().unwrap();
    let engine = engine(&temp);

    let mut first = config_with_database("mysql");
    engine.sync(&mut first, SyncOptions::default()).unwrap();
    let shared_path = temp.path().join(".idea/dataSources.xml");
    let written = fs::read_to_string(&shared_path).unwrap();

    let mut second = config_with_database("mysql");
    let report = engine.sync(&mut second, SyncOptions::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(
        second.databases.get("app_db").unwrap().id,
        first.databases.get("app_db").unwrap().id
    );
    assert_eq!(fs::read_to_string(&shared_path).unwrap(), written);
    assert!(report.changes.iter().all(|c| c.diff().is_empty()));
}

#[rstest]
#[case::empty_user("")]
#[case::blank_user("  ")]
fn test_rerun_with_blank_user_is_unchanged(#[case] user: &str) {
    let temp = TempDir::new().unwrap();
    let engine = engine(&temp);
    let configured = || {
        let mut config = config_with_database("mysql");
        config.databases.get_mut("app_db").unwrap().user = Some(user.to_string());
        config
    };

    engine.sync(&mut configured(), SyncOptions::default()).unwrap();
    let local = fs::read_to_string(temp.path().join(".idea/dataSources.local.xml")).unwrap();
    assert!(local.contains(&format!("<user-name>{}</user-name>", user)));

    for _ in 0..2 {
        let report = engine.sync(&mut configured(), SyncOptions::default()).unwrap();
        let actions: Vec<_> = report.changes.iter().map(|c| (c.file, c.action)).collect();
        assert_eq!(
            actions,
            vec![
                (IdeaFile::DataSources, FileAction::Unchanged),
                (IdeaFile::DataSourcesLocal, FileAction::Unchanged),
            ]
        );
    }
}

#[test]
fn test_hand_edited_file_is_updated_in_place() {
    let temp = TempDir::new().unwrap();
    let idea = temp.path().join(".idea");
    fs::create_dir_all(&idea).unwrap();
    fs::write(
        idea.join("dataSources.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project version="4">
  <component name="DataSourceManagerImpl" format="xml" multifile-model="true">
    <data-source source="LOCAL" name="app_db" uuid="11111111-2222-4333-8444-555555555555">
      <driver-ref>mysql</driver-ref>
      <jdbc-url>jdbc:mysql://old-host:3306/appdb</jdbc-url>
    </data-source>
  </component>
</project>
"#,
    )
    .unwrap();
    let mut config = config_with_database("mysql");

    let report = engine(&temp)
        .sync(&mut config, SyncOptions::default())
        .unwrap();

    let shared = &report.changes[0];
    assert_eq!(shared.action, FileAction::Updated);
    let diff = shared.diff();
    assert!(diff.contains("-      <jdbc-url>jdbc:mysql://old-host:3306/appdb</jdbc-url>"));
    assert!(diff.contains("+      <jdbc-url>jdbc:mysql://localhost:3306/appdb</jdbc-url>"));
    assert_eq!(
        config.databases.get("app_db").unwrap().id.as_deref(),
        Some("11111111-2222-4333-8444-555555555555")
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let mut config = config_with_database("postgresql");
    let mut web = Server::new("web", "localhost", 8080);
    web.mappings.insert("src".to_string(), "/var/www/src".to_string());
    config.servers = [web].into_iter().collect();

    let report = engine(&temp)
        .sync(&mut config, SyncOptions { dry_run: true })
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.written().count(), 3);
    assert!(!temp.path().join(".idea").exists());

    let workspace = report
        .changes
        .iter()
        .find(|c| c.file == IdeaFile::Workspace)
        .unwrap();
    assert!(workspace.diff().contains("+    <servers>"));
    assert!(config.servers.get("web").unwrap().id.is_some());
}

#[rstest]
#[case::unsupported_driver("oracle")]
#[case::unknown_case("MySQL")]
fn test_failed_merge_writes_no_file(#[case] driver: &str) {
    let temp = TempDir::new().unwrap();
    let mut config = config_with_database(driver);
    config.servers = [Server::new("web", "localhost", 8080)]
        .into_iter()
        .collect();
    let before = config.clone();

    let err = engine(&temp)
        .sync(&mut config, SyncOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedDriver { .. }));
    assert!(!temp.path().join(".idea").exists());
    assert_eq!(config, before);
}

#[test]
fn test_malformed_project_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let idea = temp.path().join(".idea");
    fs::create_dir_all(&idea).unwrap();
    fs::write(idea.join("dataSources.xml"), "<project><component></project>").unwrap();
    let mut config = config_with_database("mysql");

    let err = engine(&temp)
        .sync(&mut config, SyncOptions::default())
        .unwrap_err();

    match err {
        Error::InvalidProjectFile { path, .. } => assert_eq!(path, idea.join("dataSources.xml")),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!idea.join("dataSources.local.xml").exists());
}

#[test]
fn test_empty_configuration_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let mut config = IdeConfiguration {
        databases: Collection::new(),
        servers: Collection::new(),
        ..IdeConfiguration::default()
    };

    let report = engine(&temp)
        .sync(&mut config, SyncOptions::default())
        .unwrap();

    assert!(report.changes.is_empty());
    assert!(!temp.path().join(".idea").exists());
}
