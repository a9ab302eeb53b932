#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_ledger::config::{Config, ConfigManager};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh data directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Data directory whose config hides the month header and colours.
pub fn quiet_home() -> PathBuf {
    let home = temp_home();
    let manager = ConfigManager::with_base_dir(home.clone()).expect("config manager");
    let config = Config {
        show_month: false,
        color: false,
        ..Config::default()
    };
    manager.save(&config).expect("save config");
    home
}
