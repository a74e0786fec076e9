use std::process::Command;

use tempfile::TempDir;

#[test]
fn where_honours_the_state_dir_override() {
    let root = TempDir::new().unwrap();
    let state_dir = root.path().join("wavepaper-state");

    let output = Command::new(env!("CARGO_BIN_EXE_wavepaper"))
        .env("WAVEPAPER_STATE_DIR", &state_dir)
        .arg("where")
        .output()
        .expect("failed to run wavepaper where");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    assert!(stdout.contains(&state_dir.display().to_string()));
    assert!(stdout.contains("state.toml"));
}

#[test]
fn malformed_arguments_fail_before_the_window_opens() {
    let output = Command::new(env!("CARGO_BIN_EXE_wavepaper"))
        .args(["--mode", "sepia"])
        .output()
        .expect("failed to run wavepaper with a bad mode");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("stderr is utf-8");
    assert!(stderr.contains("sepia"));

    let output = Command::new(env!("CARGO_BIN_EXE_wavepaper"))
        .args(["--size", "0x720"])
        .output()
        .expect("failed to run wavepaper with a bad size");
    assert!(!output.status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_wavepaper"))
        .args(["--still=-2"])
        .output()
        .expect("failed to run wavepaper with a bad still time");
    assert!(!output.status.success());
}
