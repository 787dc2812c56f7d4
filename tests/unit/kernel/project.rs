use super::*;

fn files(pairs: &[(&str, &str)]) -> Files {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_generate_id_is_eight_hex_chars() {
    let id = ProjectId::generate();
    assert_eq!(id.as_str().len(), 8);
    assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(ProjectId::generate(), ProjectId::generate());
}

#[test]
fn test_starter_files_have_entry_and_app() {
    let starter = starter_files();
    assert_eq!(
        starter.keys().collect::<Vec<_>>(),
        vec!["index.js", "App.jsx", "package.json"]
    );
    let store = ProjectStore::new(ProjectId::new("p"), starter);
    assert_eq!(store.active_file(), DEFAULT_ACTIVE_FILE);
}

#[test]
fn test_initial_active_falls_back_to_first_key_or_empty() {
    let store = ProjectStore::new(ProjectId::new("p"), files(&[("b.js", ""), ("a.js", "")]));
    assert_eq!(store.active_file(), "b.js");

    let empty = ProjectStore::new(ProjectId::new("p"), Files::new());
    assert_eq!(empty.active_file(), "");
}

#[test]
fn test_set_files_replaces_and_bumps_revision() {
    let mut store = ProjectStore::new(ProjectId::new("p"), files(&[("App.jsx", "1")]));
    assert_eq!(store.revision(), 0);

    assert!(store.set_files(files(&[("App.jsx", "2")])));
    assert_eq!(store.revision(), 1);
    assert_eq!(store.files().get("App.jsx").map(String::as_str), Some("2"));

    assert!(!store.set_files(files(&[("App.jsx", "2")])));
    assert_eq!(store.revision(), 1);
}

#[test]
fn test_set_files_repairs_dangling_active_file() {
    let mut store = ProjectStore::new(
        ProjectId::new("p"),
        files(&[("App.jsx", ""), ("index.js", "")]),
    );
    assert_eq!(store.active_file(), "App.jsx");

    store.set_files(files(&[("index.js", ""), ("x.css", "")]));
    assert_eq!(store.active_file(), "index.js");

    store.set_files(Files::new());
    assert_eq!(store.active_file(), "");
}

#[test]
fn test_set_active_file_requires_known_key() {
    let mut store = ProjectStore::new(
        ProjectId::new("p"),
        files(&[("App.jsx", ""), ("index.js", "")]),
    );

    assert!(!store.set_active_file("missing.js"));
    assert_eq!(store.active_file(), "App.jsx");

    assert!(store.set_active_file("index.js"));
    assert!(!store.set_active_file("index.js"));
    assert!(store.set_active_file(""));
    assert_eq!(store.active_file(), "");
}

#[test]
fn test_set_active_file_does_not_touch_revision() {
    let mut store = ProjectStore::new(
        ProjectId::new("p"),
        files(&[("App.jsx", ""), ("index.js", "")]),
    );
    store.set_active_file("index.js");
    assert_eq!(store.revision(), 0);
    assert_eq!(store.identity(), 0);
}

#[test]
fn test_replace_project_keeps_active_when_present() {
    let mut store = ProjectStore::new(
        ProjectId::new("a"),
        files(&[("App.jsx", ""), ("index.js", "")]),
    );
    store.set_active_file("index.js");

    store.replace_project(ProjectId::new("b"), files(&[("App.jsx", "x"), ("index.js", "y")]));
    assert_eq!(store.id().as_str(), "b");
    assert_eq!(store.active_file(), "index.js");

    store.replace_project(ProjectId::new("c"), files(&[("main.js", "z")]));
    assert_eq!(store.active_file(), "main.js");
    assert_eq!(store.revision(), 2);
    assert_eq!(store.identity(), 0);
}

#[test]
fn test_bump_identity_counts() {
    let mut store = ProjectStore::new(ProjectId::new("p"), Files::new());
    assert_eq!(store.bump_identity(), 1);
    assert_eq!(store.bump_identity(), 2);
    assert_eq!(store.identity(), 2);
}

#[test]
fn test_project_id_serializes_transparently() {
    let id = ProjectId::new("abc123");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    assert_eq!(id.to_string(), "abc123");
}

#[test]
fn test_project_id_parse_trims_and_refuses_session_keys() {
    assert_eq!(ProjectId::parse("  abc ").unwrap().as_str(), "abc");
    assert_eq!(ProjectId::parse(" "), Err(ValidationError::EmptyProjectId));
    assert_eq!(
        ProjectId::parse("token"),
        Err(ValidationError::ReservedProjectId("token".into()))
    );
    assert!(ProjectId::parse("settings").is_err());
    assert!(ProjectId::parse("tokens").is_ok());
}

#[test]
fn test_user_file_on_stylesheet_path_is_renamed_in_place() {
    let store = ProjectStore::new(
        ProjectId::new("p"),
        files(&[
            ("a.js", "1"),
            (STYLESHEET_PATH, "body{}"),
            ("user-theme.css", "taken"),
        ]),
    );
    assert_eq!(
        store.files().keys().collect::<Vec<_>>(),
        vec!["a.js", "user-theme-2.css", "user-theme.css"]
    );
    assert_eq!(store.files()["user-theme-2.css"], "body{}");

    let mut store = ProjectStore::new(ProjectId::new("p"), files(&[("a.js", "1")]));
    store.replace_project(ProjectId::new("q"), files(&[(STYLESHEET_PATH, "x")]));
    assert_eq!(store.active_file(), "user-theme.css");
    assert!(!store.files().contains_key(STYLESHEET_PATH));

    assert!(store.set_files(files(&[(STYLESHEET_PATH, "y")])));
    assert_eq!(store.files()["user-theme.css"], "y");
}
