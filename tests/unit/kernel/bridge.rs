use super::*;

fn files(pairs: &[(&str, &str)]) -> Files {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn project() -> Files {
    files(&[("index.js", "import App from './App';"), ("App.jsx", "v0")])
}

#[test]
fn test_reseed_injects_presentation() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");

    assert_eq!(bridge.live_instance(), Some(snapshot.instance));
    assert_eq!(bridge.focused(), "App.jsx");
    assert_eq!(snapshot.active_file, "App.jsx");
    assert_eq!(
        snapshot.files.get(STYLESHEET_PATH),
        Some(&snapshot.stylesheet)
    );
    assert!(snapshot.files["index.js"].starts_with(STYLESHEET_IMPORT));
    assert_eq!(snapshot.files["App.jsx"], "v0");
}

#[test]
fn test_reseed_issues_fresh_instances() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let a = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx").instance;
    let b = bridge.reseed(ReseedReason::Structural, &project(), "App.jsx").instance;
    assert_ne!(a, b);
    assert_eq!(bridge.live_instance(), Some(b));
}

#[test]
fn test_strip_presentation_round_trips() {
    let original = project();
    let injected = inject_presentation(&original, "body{}");
    assert_eq!(strip_presentation(injected.clone()), original);

    let twice = inject_presentation(&injected, "body{}");
    assert_eq!(twice["index.js"].matches(STYLESHEET_IMPORT).count(), 1);
}

#[test]
fn test_inject_without_entry_only_adds_stylesheet() {
    let only_app = files(&[("App.jsx", "x")]);
    let injected = inject_presentation(&only_app, "css");
    assert_eq!(injected.len(), 2);
    assert_eq!(strip_presentation(injected), only_app);
}

#[test]
fn test_burst_of_edits_flushes_once_with_final_content() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");
    let t0 = Instant::now();

    for i in 0..10u64 {
        let mut edited = snapshot.files.clone();
        edited.insert("App.jsx".into(), format!("v{}", i + 1));
        let now = t0 + Duration::from_millis(i * 5);
        assert!(bridge.on_sandbox_edit(snapshot.instance, edited, now));
        assert_eq!(bridge.poll(now), None);
    }

    let last_edit = t0 + Duration::from_millis(45);
    assert_eq!(bridge.poll(last_edit + Duration::from_millis(199)), None);

    let update = bridge.poll(last_edit + DEBOUNCE_WINDOW).unwrap();
    assert_eq!(update.instance, snapshot.instance);
    assert_eq!(update.files["App.jsx"], "v10");
    assert!(!update.files.contains_key(STYLESHEET_PATH));
    assert!(!update.files["index.js"].starts_with(STYLESHEET_IMPORT));

    assert_eq!(bridge.poll(last_edit + Duration::from_secs(5)), None);
}

#[test]
fn test_edits_from_stale_instance_are_dropped() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let old = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");
    bridge.reseed(ReseedReason::ProjectLoaded, &project(), "App.jsx");
    let t0 = Instant::now();

    assert!(!bridge.on_sandbox_edit(old.instance, project(), t0));
    assert!(!bridge.has_pending());
    assert_eq!(bridge.poll(t0 + Duration::from_secs(1)), None);
}

#[test]
fn test_reseed_discards_pending_update() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");
    let t0 = Instant::now();

    bridge.on_sandbox_edit(snapshot.instance, project(), t0);
    assert!(bridge.has_pending());
    assert_eq!(bridge.next_deadline(), Some(t0 + DEBOUNCE_WINDOW));

    bridge.reseed(ReseedReason::ActiveFileSwitched, &project(), "index.js");
    assert!(!bridge.has_pending());
    assert_eq!(bridge.poll(t0 + Duration::from_secs(1)), None);
}

#[test]
fn test_teardown_releases_instance() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");
    bridge.teardown();

    assert_eq!(bridge.live_instance(), None);
    assert!(!bridge.on_sandbox_edit(snapshot.instance, project(), Instant::now()));
}

#[test]
fn test_sandbox_active_file_echo() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");

    assert_eq!(bridge.on_sandbox_active_file(snapshot.instance, "App.jsx"), None);
    assert_eq!(
        bridge.on_sandbox_active_file(snapshot.instance, "index.js"),
        Some("index.js".to_string())
    );
    assert!(bridge.is_focused("index.js"));
    assert_eq!(bridge.on_sandbox_active_file(snapshot.instance, ""), None);

    let next = bridge.reseed(ReseedReason::Structural, &project(), "App.jsx");
    assert_eq!(bridge.on_sandbox_active_file(snapshot.instance, "index.js"), None);
    assert!(bridge.is_focused("App.jsx"));
    assert_ne!(next.instance, snapshot.instance);
}

#[test]
fn test_set_theme_restyles_live_instance_only_on_change() {
    let mut bridge = SandboxBridge::new(Theme::Light);
    assert_eq!(bridge.set_theme(Theme::Light), None);
    assert_eq!(bridge.set_theme(Theme::Dark), None);

    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");
    assert_eq!(snapshot.stylesheet, preview_theme::stylesheet(Theme::Dark));

    let (instance, css) = bridge.set_theme(Theme::Light).unwrap();
    assert_eq!(instance, snapshot.instance);
    assert_eq!(css, preview_theme::stylesheet(Theme::Light));
    assert_eq!(bridge.live_instance(), Some(snapshot.instance));
}

#[test]
fn test_custom_window() {
    let mut bridge = SandboxBridge::with_window(Duration::from_millis(50), Theme::Light);
    let snapshot = bridge.reseed(ReseedReason::Mount, &project(), "App.jsx");
    let t0 = Instant::now();
    bridge.on_sandbox_edit(snapshot.instance, project(), t0);
    assert!(bridge.poll(t0 + Duration::from_millis(50)).is_some());
}
