//! End-to-end reload behavior against in-memory and file-backed sources.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use proxy_dynconf::{DirSource, DynamicConf, MemorySource, ReloadCallback};

fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_source_reload_and_tenant_fallback() {
    common::init_tracing();
    let source = Arc::new(MemorySource::new());
    source.put("proxy-dynconf.properties", "timeout=100\n");
    let conf = DynamicConf::new(source.clone());

    conf.reload();
    assert_eq!(conf.get_i32_for("timeout", None, None, 50), 100);

    source.put("proxy-dynconf.properties", "timeout=100\n7.g.timeout=5\n");
    conf.reload();
    assert_eq!(conf.get_i32_for("timeout", Some(7), Some("g"), 50), 5);
    assert_eq!(conf.get_i32_for("timeout", Some(1), Some("x"), 50), 100);

    source.put("proxy-dynconf.properties", "");
    conf.reload();
    assert_eq!(conf.get_i32_for("timeout", Some(7), Some("g"), 50), 50);
    assert_eq!(conf.get_i32_for("timeout", Some(1), Some("x"), 50), 50);
}

#[test]
fn test_unchanged_source_reload_is_noop() {
    common::init_tracing();
    let source = Arc::new(MemorySource::new());
    source.put("proxy-dynconf.properties", "timeout=100\n");
    let conf = DynamicConf::new(source.clone());
    let listener = Arc::new(common::CountingCallback::default());
    conf.register(listener.clone());

    conf.reload();
    conf.reload();
    assert_eq!(listener.hits(), 1);
}

#[test]
fn test_parse_failure_keeps_previous_snapshot() {
    common::init_tracing();
    let source = Arc::new(MemorySource::new());
    source.put("proxy-dynconf.properties", "timeout=100\n");
    let conf = DynamicConf::new(source.clone());
    let listener = Arc::new(common::CountingCallback::default());
    conf.register(listener.clone());

    conf.reload();
    assert_eq!(listener.hits(), 1);

    source.put("proxy-dynconf.properties", "timeout=200\nnot a pair\n");
    conf.reload();

    assert_eq!(conf.get_i32("timeout", 0), 100);
    assert_eq!(listener.hits(), 1);
}

#[test]
fn test_missing_primary_becomes_empty_configuration() {
    common::init_tracing();
    let source = Arc::new(MemorySource::new());
    source.put("proxy-dynconf.properties", "timeout=100\n");
    let conf = DynamicConf::new(source.clone());
    let listener = Arc::new(common::CountingCallback::default());
    conf.register(listener.clone());

    conf.reload();
    assert_eq!(conf.get_i32("timeout", 0), 100);

    source.remove("proxy-dynconf.properties");
    conf.reload();

    assert_eq!(conf.get_i32("timeout", 0), 0);
    assert_eq!(listener.hits(), 2);
}

#[test]
fn test_direct_injection_matches_source_driven_reload() {
    common::init_tracing();
    let source = Arc::new(MemorySource::new());
    source.put("proxy-dynconf.properties", "timeout=100\n7.g.timeout=5\nname=primary\n");
    let from_source = DynamicConf::new(source.clone());
    from_source.reload();

    let injected = DynamicConf::new(Arc::new(MemorySource::new()));
    injected.reload_with(map(&[
        ("timeout", "100"),
        ("7.g.timeout", "5"),
        ("name", "primary"),
    ]));

    for conf in [&from_source, &injected] {
        assert_eq!(conf.get_i32_for("timeout", Some(7), Some("g"), 50), 5);
        assert_eq!(conf.get_i32_for("timeout", Some(1), Some("x"), 50), 100);
        assert_eq!(conf.get_string("name", ""), "primary");
    }
}

#[test]
fn test_listener_isolation() {
    struct AlwaysPanics;

    impl ReloadCallback for AlwaysPanics {
        fn on_reload(&self) {
            panic!("listener failure");
        }
    }

    common::init_tracing();
    let conf = DynamicConf::new(Arc::new(MemorySource::new()));
    let healthy = Arc::new(common::CountingCallback::default());
    conf.register(Arc::new(AlwaysPanics));
    conf.register(healthy.clone());

    conf.reload_with(map(&[("timeout", "100")]));
    conf.reload_with(map(&[("timeout", "200")]));

    assert_eq!(healthy.hits(), 2);
    assert_eq!(conf.get_i32("timeout", 0), 200);
}

#[test]
fn test_override_file_merge_on_disk() {
    common::init_tracing();
    let dir = std::env::temp_dir().join(format!("dynconf_override_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let primary = dir.join("proxy-dynconf.properties");
    let secondary = dir.join("override.properties");
    std::fs::write(&secondary, "timeout=25\nextra=yes\n").unwrap();
    std::fs::write(
        &primary,
        format!("timeout=100\ndynamic.conf.file.path={}\n", secondary.display()),
    )
    .unwrap();

    let conf = DynamicConf::new(Arc::new(DirSource::new(&dir)));
    conf.reload();

    assert_eq!(conf.get_i32("timeout", 0), 25);
    assert_eq!(conf.get_string("extra", ""), "yes");

    // Losing the override file is best-effort: the reload falls back to
    // the primary content.
    std::fs::remove_file(&secondary).unwrap();
    conf.reload();

    assert_eq!(conf.get_i32("timeout", 0), 100);
    assert_eq!(conf.get_string("extra", "gone"), "gone");

    std::fs::remove_dir_all(&dir).unwrap_or_default();
}
