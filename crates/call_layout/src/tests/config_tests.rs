use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_six_grid_tiles() {
    assert_eq!(LayoutSettings::default().grid_max_items, 6);
}

#[test]
fn reads_grid_capacity_from_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("call_layout.toml");
    fs::write(&path, "grid_max_items = 4\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.grid_max_items, 4);
}

#[test]
fn explicit_missing_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings(Some(&dir.path().join("absent.toml"))).expect_err("missing");
    assert!(err.to_string().contains("failed to read layout settings"));
}

#[test]
fn malformed_settings_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("call_layout.toml");
    fs::write(&path, "grid_max_items = \"lots\"\n").expect("write settings");

    let err = load_settings(Some(&path)).expect_err("malformed");
    assert!(err.to_string().contains("failed to parse layout settings"));
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = LayoutSettings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[("GRID_MAX_ITEMS", "3"), ("APP__GRID_MAX_ITEMS", "9")]),
    )
    .expect("overrides");
    assert_eq!(settings.grid_max_items, 9);
}

#[test]
fn rejects_non_numeric_env_override() {
    let mut settings = LayoutSettings::default();
    let err = apply_env_overrides(&mut settings, lookup_from(&[("GRID_MAX_ITEMS", "many")]))
        .expect_err("invalid");
    assert_eq!(
        err,
        SettingsError::InvalidValue {
            key: "grid_max_items",
            value: "many".into()
        }
    );
}

#[test]
fn zero_capacity_is_rejected() {
    assert_eq!(
        LayoutSettings::with_grid_max_items(0),
        Err(SettingsError::ZeroGridCapacity)
    );
}
