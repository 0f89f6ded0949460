#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the developer's own config file.
pub fn rt() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("routinely_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("routinely");
    cmd.env("HOME", &home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_routinely.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a fresh DB (schema + default user `me`).
pub fn init_db(db_path: &str) {
    rt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a routine through the CLI.
pub fn add_routine(db_path: &str, name: &str, start: &str, end: &str) {
    rt().args([
        "--db", db_path, "routine", "add", name, "--start", start, "--end", end,
    ])
    .assert()
    .success();
}
