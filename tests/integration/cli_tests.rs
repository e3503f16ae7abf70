//! CLI integration tests
//!
//! These tests run the compiled binary against temporary projects.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn spritegen() -> Command {
    Command::cargo_bin("spritegen").unwrap()
}

/// Temp project with the default layout and one icon in each source set
fn project_with_icons() -> TempDir {
    let dir = TempDir::new().unwrap();
    let svg = dir.path().join("assets/svg");
    let optimized = svg.join("optimized");
    fs::create_dir_all(&optimized).unwrap();

    fs::write(
        svg.join("moon.svg"),
        r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#,
    )
    .unwrap();
    fs::write(
        optimized.join("star.svg"),
        r#"<svg viewBox="0 0 20 20" width="20" fill="red"><path fill="red" d="M2 2"/></svg>"#,
    )
    .unwrap();

    dir
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_cli_help() {
    spritegen().arg("--help").assert().success().stdout(
        predicate::str::contains("spritegen")
            .and(predicate::str::contains("--strict"))
            .and(predicate::str::contains("--dry-run"))
            .and(predicate::str::contains("--watch")),
    );
}

#[test]
fn test_cli_version() {
    spritegen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("spritegen"));
}

// ============================================================================
// Generation runs
// ============================================================================

#[test]
fn test_cli_generates_wrappers() {
    let project = project_with_icons();

    spritegen()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing wrapper templates"));

    let components = project.path().join("templates/components/svg");
    let moon = fs::read_to_string(components.join("moon.html.tera")).unwrap();
    let star = fs::read_to_string(components.join("star.html.tera")).unwrap();

    assert!(moon.contains("href='#moon'"));
    assert!(star.contains("href='#optimized/star'"));
    assert!(star.contains("viewbox='0 0 20 20'"));

    // The optimized source was normalized in place
    let source = fs::read_to_string(project.path().join("assets/svg/optimized/star.svg")).unwrap();
    assert!(!source.contains("fill"));
}

#[test]
fn test_cli_json_report_to_file() {
    let project = project_with_icons();
    let report_path = project.path().join("report.json");

    spritegen()
        .arg(project.path())
        .args(["--format", "json", "--output"])
        .arg(&report_path)
        .assert()
        .success();

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains(r#""generated": 2"#));
    assert!(report.contains(r#""sprite_ref": "optimized/star""#));
}

#[test]
fn test_cli_quiet_suppresses_banners() {
    let project = project_with_icons();

    spritegen()
        .arg(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clearing generated wrappers").not());
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let project = project_with_icons();

    spritegen()
        .arg(project.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!project.path().join("templates/components/svg").exists());
    let source = fs::read_to_string(project.path().join("assets/svg/optimized/star.svg")).unwrap();
    assert!(source.contains("fill"));
}

#[test]
fn test_cli_strip_list_override() {
    let project = project_with_icons();

    spritegen()
        .arg(project.path())
        .args(["--strip", "stroke"])
        .assert()
        .success();

    // The replacement list only names stroke, so width/fill survive
    let source = fs::read_to_string(project.path().join("assets/svg/optimized/star.svg")).unwrap();
    assert!(source.contains("width"));
    assert!(source.contains("fill"));
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_cli_missing_source_dirs_fail() {
    let empty = TempDir::new().unwrap();

    spritegen()
        .arg(empty.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("source directory not found"));
}

#[test]
fn test_cli_strict_fails_on_malformed_icon() {
    let project = project_with_icons();
    fs::write(
        project.path().join("assets/svg/broken.svg"),
        "<html>not an icon</html>",
    )
    .unwrap();

    spritegen()
        .arg(project.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.svg"));

    // Without --strict the same project succeeds
    spritegen().arg(project.path()).assert().success();
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_cli_config_file_overrides_layout() {
    let dir = TempDir::new().unwrap();
    let icons = dir.path().join("icons");
    let optimized = dir.path().join("icons-optimized");
    fs::create_dir_all(&icons).unwrap();
    fs::create_dir_all(&optimized).unwrap();
    fs::write(icons.join("sun.svg"), r#"<svg viewBox="0 0 5 5"/>"#).unwrap();

    fs::write(
        dir.path().join("spritegen.toml"),
        r#"
svg_dir = "icons"
optimized_dir = "icons-optimized"
components_dir = "out"
"#,
    )
    .unwrap();

    spritegen().arg(dir.path()).assert().success();

    let wrapper = fs::read_to_string(dir.path().join("out/sun.html.tera")).unwrap();
    assert!(wrapper.contains("href='#sun'"));
    assert!(wrapper.contains("viewbox='0 0 5 5'"));
}
