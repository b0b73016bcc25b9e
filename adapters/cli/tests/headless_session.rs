use std::process::Command;

#[test]
fn default_level_runs_to_an_outcome() {
    let output = Command::new(env!("CARGO_BIN_EXE_wild-defense"))
        .args(["--place", "chameleon@7,5", "--place", "meerkat@9,7"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch wild-defense");

    assert!(output.status.success(), "wild-defense exited with {}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Wild Defense."));
    assert!(
        stdout.contains("You win!") || stdout.contains("Game Over! You survived"),
        "unexpected output: {stdout}"
    );
    assert!(stdout.contains("Towers: 2"));
}

#[test]
fn frame_limit_stops_an_unfinished_session() {
    let output = Command::new(env!("CARGO_BIN_EXE_wild-defense"))
        .args(["--max-ticks", "30"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch wild-defense");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Stopped after 30 frames."), "unexpected output: {stdout}");
}

#[test]
fn missing_level_file_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_wild-defense"))
        .args(["--config", "does/not/exist.toml"])
        .output()
        .expect("failed to launch wild-defense");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does/not/exist.toml"), "unexpected error: {stderr}");
}
