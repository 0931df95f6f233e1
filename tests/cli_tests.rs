// CLI-level checks that run without a TTY.

use assert_cmd::Command;

#[test]
fn list_categories_runs_headless() {
    let output = Command::cargo_bin("taja")
        .unwrap()
        .arg("--list-categories")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("korean:"));
    assert!(stdout.contains("english:"));
    assert!(stdout.contains("home-row"));
    assert!(stdout.contains("all-keys"));
}

#[test]
fn bare_run_requires_a_tty() {
    let output = Command::cargo_bin("taja").unwrap().output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn unknown_category_is_rejected_with_listing() {
    let output = Command::cargo_bin("taja")
        .unwrap()
        .args(["-c", "no-such-category"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown category"));
    assert!(stderr.contains("home-row"));
}

#[test]
fn help_describes_the_drill() {
    let output = Command::cargo_bin("taja")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--words-only"));
    assert!(stdout.contains("--list-categories"));
}
