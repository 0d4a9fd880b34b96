// =============================================================================
// Persistance du modèle entre deux lancements
// Model persistence across two launches
// =============================================================================

use rgba_tool_lib::{AppState, Channel, ColorModel, JsonPreferences, Preferences, Preset, Rgba};
use tempfile::TempDir;

#[test]
fn test_first_launch_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let prefs = JsonPreferences::open(dir.path().join("preferences.json")).unwrap();

    let model = ColorModel::load(&prefs);
    assert_eq!(model.rgba(), Rgba::new(255, 178, 85, 100).unwrap());
}

#[test]
fn test_model_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("RGB-A Tool").join("preferences.json");

    // Premier lancement / First launch
    let mut prefs = JsonPreferences::open(&path).unwrap();
    let mut model = ColorModel::load(&prefs);
    model.as_magenta();
    model.set_green(17).unwrap();
    model.set_alpha(33).unwrap();
    model.save(&mut prefs).unwrap();
    let saved = model.rgba();
    drop(model);
    drop(prefs);

    // Second lancement / Second launch
    let prefs = JsonPreferences::open(&path).unwrap();
    let model = ColorModel::load(&prefs);
    assert_eq!(model.rgba(), saved);
    assert_eq!(model.rgba(), Rgba::new(255, 17, 255, 33).unwrap());
}

#[test]
fn test_file_uses_channel_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    let mut prefs = JsonPreferences::open(&path).unwrap();
    ColorModel::new(1, 2, 3, 4).unwrap().save(&mut prefs).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["red"], 1);
    assert_eq!(json["green"], 2);
    assert_eq!(json["blue"], 3);
    assert_eq!(json["alpha"], 4);
}

#[test]
fn test_app_state_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    let state = AppState::new(Box::new(JsonPreferences::open(&path).unwrap()));
    state.apply_preset(Preset::Yellow);
    state.set_channel(Channel::Alpha, 0).unwrap();
    state.save().unwrap();

    let prefs = JsonPreferences::open(&path).unwrap();
    assert_eq!(prefs.get_int("blue", -1), 0);

    let reopened = AppState::new(Box::new(prefs));
    let view = reopened.view();
    assert_eq!(view.hex, "FFFF00");
    assert_eq!(view.alpha, 0);
    assert_eq!(view.summary, "Alpha: 0.0 Hex: FFFF00");
}
