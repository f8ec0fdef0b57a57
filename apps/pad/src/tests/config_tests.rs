use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_are_valid() {
    let settings = Settings::default();
    assert_eq!(settings.grid_size, 8);
    assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    settings.validate().expect("defaults validate");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
            server_url = "http://digits.local:8080"
            grid_size = 16
            cell_size_px = 24.5
        "#,
    )
    .expect("parse");

    assert_eq!(settings.server_url, "http://digits.local:8080");
    assert_eq!(settings.grid_size, 16);
    assert_eq!(settings.cell_size_px, 24.5);
    assert_eq!(settings.request_timeout_ms, 10_000);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "bind_addr = \"0.0.0.0\"").is_err());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "grid_size = 16").expect("parse");
    apply_env(
        &mut settings,
        env_from(&[
            ("PAD_SERVER_URL", "http://first:1"),
            ("APP__SERVER_URL", "http://second:2"),
            ("APP__GRID_SIZE", "12"),
            ("APP__REQUEST_TIMEOUT_MS", "250"),
        ]),
    )
    .expect("env");

    assert_eq!(settings.server_url, "http://second:2");
    assert_eq!(settings.grid_size, 12);
    assert_eq!(settings.request_timeout(), Duration::from_millis(250));
}

#[test]
fn unparsable_env_values_fail() {
    let mut settings = Settings::default();
    let err = apply_env(&mut settings, env_from(&[("APP__GRID_SIZE", "eight")]))
        .expect_err("must fail");
    assert!(err.to_string().contains("APP__GRID_SIZE"));
}

#[test]
fn validation_rejects_unusable_settings() {
    let broken = [
        Settings {
            grid_size: 0,
            ..Settings::default()
        },
        Settings {
            cell_size_px: 0.0,
            ..Settings::default()
        },
        Settings {
            cell_size_px: f64::NAN,
            ..Settings::default()
        },
        Settings {
            request_timeout_ms: 0,
            ..Settings::default()
        },
        Settings {
            server_url: "not a url".into(),
            ..Settings::default()
        },
    ];
    for settings in broken {
        assert!(settings.validate().is_err(), "{settings:?}");
    }
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("pad_missing_{suffix}.toml"));

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.cell_size_px, Settings::default().cell_size_px);
}

#[test]
fn config_file_on_disk_is_read() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("pad_config_{suffix}.toml"));
    fs::write(&path, "cell_size_px = 12.0\n").expect("write config");

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.cell_size_px, 12.0);

    fs::remove_file(path).expect("cleanup");
}
