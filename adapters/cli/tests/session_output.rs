use std::process::Command;

fn snake_grid(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_snake-grid"))
        .args(args)
        .output()
        .expect("failed to launch snake-grid")
}

#[test]
fn reversal_prints_the_final_score() {
    let output = snake_grid(&["--input", "0:ArrowLeft", "--max-frames", "120"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("Game Over! Your score: "),
        "unexpected output: {stdout}"
    );
}

#[test]
fn idle_session_reports_exhausted_frames() {
    let output = snake_grid(&["--max-frames", "10"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Session ended after 10 frames with score 0");
}

#[test]
fn show_prints_the_grid() {
    let output = snake_grid(&[
        "--width", "160", "--height", "40", "--cell-size", "20", "--max-frames", "1", "--show",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("score: 0"));
    let grid: Vec<&str> = lines.by_ref().take(2).collect();
    assert_eq!(grid.len(), 2);
    assert!(grid.iter().all(|row| row.chars().count() == 8));
    assert_eq!(grid.concat().matches('@').count(), 1);
}

#[test]
fn malformed_input_is_rejected() {
    let output = snake_grid(&["--input", "soon:ArrowUp"]);
    assert!(!output.status.success());
}

#[test]
fn zero_fps_is_rejected() {
    let output = snake_grid(&["--fps", "0"]);
    assert!(!output.status.success());
}
