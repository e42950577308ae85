//! Integration tests for the CLI binary
//!
//! Run the compiled `tourguide-cli` on offline commands and check its output.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tourguide-cli"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("TOURGUIDE_LOGGING__LOG_FILTER", "warn")
        .output()
        .unwrap_or_else(|e| panic!("failed to run tourguide-cli: {e}"))
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "tourguide-cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn distance_paris_fixture() {
    let out = stdout(&run(&["distance", "48.8566", "2.3522", "48.8606", "2.3376"]));
    assert_eq!(out.trim(), "1.157 km");
}

#[test]
fn distance_rejects_out_of_range_latitude() {
    let output = run(&["distance", "95", "0", "0", "0"]);
    assert!(!output.status.success());
}

#[test]
fn options_for_one_kilometer() {
    let out = stdout(&run(&["options", "1.0"]));
    let lines: Vec<&str> = out.lines().map(str::trim).collect();
    assert_eq!(
        lines,
        vec![
            "🧭 1.00 km",
            "Walking · 12 min · 0€",
            "Public transit · 4 min · 2€",
            "Taxi · 2 min · 7€",
        ]
    );
}

#[test]
fn options_short_leg_is_walking_only() {
    let out = stdout(&run(&["options", "0.2", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let options = json["options"].as_array().unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0]["mode"], "walking");
    assert_eq!(options[0]["travel_time_minutes"], 2);
}

#[test]
fn options_between_points() {
    let out = stdout(&run(&[
        "options",
        "--from",
        "48.8566,2.3522",
        "--to",
        "48.8606,2.3376",
        "--json",
    ]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let distance = json["distance_km"].as_f64().unwrap();
    assert!((distance - 1.157).abs() < 1e-3);
    assert_eq!(json["options"].as_array().map(Vec::len), Some(3));
}

#[test]
fn itinerary_offline_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "city": "Paris",
            "stops": [
                {{"name": "Tour Eiffel", "address": "Champ de Mars", "coordinates": [48.8584, 2.2945]}},
                {{"name": "Louvre", "address": "Rue de Rivoli", "coordinates": [48.8606, 2.3376]}},
                {{"name": "Notre-Dame", "address": "Parvis Notre-Dame", "coordinates": [48.8530, 2.3499]}},
                {{"name": "Sacré-Cœur", "address": "Montmartre", "coordinates": [48.8867, 2.3431]}}
            ]
        }}"#
    )
    .unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let out = stdout(&run(&["itinerary", &path, "--offline", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    let legs = json["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 3);
    assert!(legs.iter().all(|l| l["source"] == "estimated"));
    assert_eq!(legs[0]["step_id"], 1);
    assert_eq!(json["summary"]["walking"]["hours"], 1);
    assert_eq!(json["summary"]["walking"]["minutes"], 38);
}

#[test]
fn itinerary_offline_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"name": "Hôtel de Ville", "coordinates": [48.8566, 2.3522]}},
            {{"name": "Louvre", "coordinates": [48.8606, 2.3376]}}
        ]"#
    )
    .unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let out = stdout(&run(&["itinerary", &path, "--offline"]));
    assert!(out.contains("Step 1: Hôtel de Ville → Louvre"));
    assert!(out.contains("Walking time: 13min"));
}

#[test]
fn itinerary_missing_file_fails() {
    let output = run(&["itinerary", "/nonexistent/tour.json", "--offline"]);
    assert!(!output.status.success());
}

#[test]
fn config_prints_defaults() {
    let out = stdout(&run(&["config"]));
    assert!(out.contains("[transport]"));
    assert!(out.contains("lookup_timeout_secs = 20"));
    assert!(out.contains("[logging]"));
}
