//! Shared fixtures for integration tests.

use std::path::PathBuf;

use bubblerun_lib::{Coordinates, StarSystem};

/// Faction every fixture scenario is built around.
#[allow(dead_code)]
pub const FIXTURE_FACTION: &str = "EDA Kunti League";

/// Path to the fixtures directory shared by the workspace.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the populated-systems fixture dump.
#[allow(dead_code)]
pub fn fixture_dataset_path() -> PathBuf {
    fixtures_dir().join("systemsPopulated.json")
}

#[allow(dead_code)]
pub fn system(name: &str, x: f64, y: f64, z: f64) -> StarSystem {
    StarSystem::new(name, Coordinates::new(x, y, z))
}

/// Antai, Wuy jugun and Arun in that order.
#[allow(dead_code)]
pub fn kunti_triangle() -> Vec<StarSystem> {
    vec![
        system("Antai", 10.0, -20.0, 30.0),
        system("Wuy jugun", 24.28125, -34.0, 39.9375),
        system("Arun", 18.0, -24.0, 31.0),
    ]
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
