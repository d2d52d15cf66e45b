use blobtone_engine::domain::DEFAULT_PALETTE;
use blobtone_engine::{SimConfig, WorldCore};

#[test]
fn partial_json_fills_in_defaults() {
    let config = SimConfig::from_json(r#"{"width": 800, "height": 600, "maxEntities": 50}"#).unwrap();
    assert_eq!(config.width, 800.0);
    assert_eq!(config.height, 600.0);
    assert_eq!(config.max_entities, 50);
    assert_eq!(config.cell_size, SimConfig::default().cell_size);
    assert_eq!(config.palette, DEFAULT_PALETTE.to_vec());
}

#[test]
fn config_survives_json_round_trip() {
    let config = SimConfig { seed: 7, loop_envelope: true, ..SimConfig::default() };
    let json = config.to_json().unwrap();
    assert!(json.contains("\"loopEnvelope\":true"));
    assert_eq!(SimConfig::from_json(&json).unwrap(), config);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(SimConfig::from_json(r#"{"friction": 1.5}"#).is_err());
    assert!(SimConfig::from_json(r#"{"cellSize": 0}"#).is_err());
    assert!(SimConfig::from_json(r#"{"palette": []}"#).is_err());
    assert!(SimConfig::from_json("not json").is_err());
    assert!(WorldCore::from_json(r#"{"width": -1}"#).is_err());
}

#[test]
fn small_cell_size_is_allowed() {
    // Only a warning: wide bodies may miss each other but nothing breaks.
    let config = SimConfig::from_json(r#"{"cellSize": 10}"#).unwrap();
    assert_eq!(config.cell_size, 10.0);
}
