//! End-to-end pipeline tests over temporary project directories.

use spritegen::config::{Config, MalformedPolicy};
use spritegen::pipeline::{Pipeline, PipelineError};
use spritegen::IconOrigin;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

/// Build a temp project with the default directory layout
fn setup() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("assets/svg/optimized")).unwrap();
    let config = Config::default().resolved(dir.path());
    (dir, config)
}

fn write_plain(config: &Config, name: &str, content: &str) {
    fs::write(config.svg_dir.join(name), content).unwrap();
}

fn write_optimized(config: &Config, name: &str, content: &str) {
    fs::write(config.optimized_dir.join(name), content).unwrap();
}

/// Map of output filename to content, sorted by name
fn output_contents(config: &Config) -> BTreeMap<String, String> {
    if !config.components_dir.exists() {
        return BTreeMap::new();
    }
    fs::read_dir(&config.components_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let content = fs::read_to_string(entry.path()).unwrap();
            (name, content)
        })
        .collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_full_run_on_optimized_star() {
    let (_dir, config) = setup();
    write_optimized(
        &config,
        "star.svg",
        r#"<svg viewBox="0 0 20 20" width="20" fill="red"><path fill="red" d="M2 2 L18 18"/></svg>"#,
    );

    let summary = Pipeline::new(&config).run().unwrap();

    // The optimized source lost its presentation attributes in place
    let normalized = fs::read_to_string(config.optimized_dir.join("star.svg")).unwrap();
    assert!(!normalized.contains("width"));
    assert!(!normalized.contains("fill"));
    assert!(normalized.contains(r#"viewBox="0 0 20 20""#));

    // Exactly one wrapper, pointing at the optimized sprite entry
    let outputs = output_contents(&config);
    assert_eq!(outputs.len(), 1);
    let wrapper = &outputs["star.html.tera"];
    assert!(wrapper.contains("viewbox='0 0 20 20'"));
    assert!(wrapper.contains("href='#optimized/star'"));

    assert_eq!(summary.normalized, 1);
    assert_eq!(summary.wrappers.len(), 1);
    assert!(summary.skipped.is_empty());
}

#[test]
fn test_sprite_reference_follows_origin() {
    let (_dir, config) = setup();
    write_plain(&config, "icon-a.svg", r#"<svg viewBox="0 0 24 24"/>"#);
    write_optimized(&config, "icon-b.svg", r#"<svg viewBox="0 0 24 24"/>"#);

    Pipeline::new(&config).run().unwrap();

    let outputs = output_contents(&config);
    assert!(outputs["icon-a.html.tera"].contains("href='#icon-a'"));
    assert!(outputs["icon-b.html.tera"].contains("href='#optimized/icon-b'"));
}

#[test]
fn test_missing_view_box_still_produces_wrapper() {
    let (_dir, config) = setup();
    write_plain(&config, "dot.svg", "<svg><circle r='2'/></svg>");

    Pipeline::new(&config).run().unwrap();

    let outputs = output_contents(&config);
    assert!(outputs["dot.html.tera"].contains("viewbox=''"));
}

#[test]
fn test_malformed_icon_skipped_batch_continues() {
    let (_dir, config) = setup();
    write_plain(&config, "broken.svg", "<html><body/></html>");
    write_plain(&config, "fine.svg", r#"<svg viewBox="0 0 4 4"/>"#);

    let summary = Pipeline::new(&config).run().unwrap();

    let outputs = output_contents(&config);
    assert_eq!(outputs.len(), 1);
    assert!(outputs.contains_key("fine.html.tera"));
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0].path.ends_with("broken.svg"));
}

#[test]
fn test_strict_mode_aborts_on_malformed() {
    let (_dir, mut config) = setup();
    config.on_malformed = MalformedPolicy::Abort;
    write_optimized(&config, "broken.svg", "not xml at all");

    let err = Pipeline::new(&config).run().unwrap_err();
    assert!(matches!(err, PipelineError::MalformedSvg { .. }));
}

#[test]
fn test_two_runs_are_byte_identical() {
    let (_dir, config) = setup();
    write_plain(
        &config,
        "a.svg",
        r#"<svg viewBox="0 0 10 10"><path d="M0 0"/></svg>"#,
    );
    write_optimized(
        &config,
        "b.svg",
        r#"<svg viewBox="0 0 8 8" width="8"><rect fill="red"/></svg>"#,
    );

    Pipeline::new(&config).run().unwrap();
    let first = output_contents(&config);

    Pipeline::new(&config).run().unwrap();
    let second = output_contents(&config);

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_duplicate_name_resolves_to_optimized() {
    let (_dir, config) = setup();
    write_plain(&config, "star.svg", r#"<svg viewBox="0 0 1 1"/>"#);
    write_optimized(&config, "star.svg", r#"<svg viewBox="0 0 2 2"/>"#);

    let summary = Pipeline::new(&config).run().unwrap();

    let outputs = output_contents(&config);
    assert_eq!(outputs.len(), 1);
    assert!(outputs["star.html.tera"].contains("href='#optimized/star'"));
    assert!(outputs["star.html.tera"].contains("viewbox='0 0 2 2'"));

    assert_eq!(summary.wrappers.len(), 1);
    assert_eq!(summary.wrappers[0].origin, IconOrigin::Optimized);
    assert!(summary.wrappers[0]
        .replaced
        .as_ref()
        .unwrap()
        .ends_with("star.svg"));
}

// ============================================================================
// Discovery edge cases
// ============================================================================

#[test]
fn test_only_real_svg_extensions_are_picked_up() {
    let (_dir, config) = setup();
    write_plain(&config, "star.svg", "<svg/>");
    write_plain(&config, "UPPER.SVG", "<svg/>");
    write_plain(&config, "backup.svg.bak", "<svg/>");
    write_plain(&config, "weird.svgx", "<svg/>");
    write_plain(&config, "note-on-svg.txt", "not an icon");

    Pipeline::new(&config).run().unwrap();

    let outputs = output_contents(&config);
    let names: Vec<&String> = outputs.keys().collect();
    assert_eq!(names, vec!["UPPER.html.tera", "star.html.tera"]);
    assert!(outputs["UPPER.html.tera"].contains("href='#UPPER'"));
}

#[test]
fn test_optimized_subdir_does_not_leak_into_plain_set() {
    let (_dir, config) = setup();
    // Only the nested optimized directory has an icon; the flat plain scan
    // must not pick it up as a plain icon too.
    write_optimized(&config, "gem.svg", "<svg/>");

    let summary = Pipeline::new(&config).run().unwrap();

    assert_eq!(summary.wrappers.len(), 1);
    assert_eq!(summary.wrappers[0].origin, IconOrigin::Optimized);
    assert!(summary.wrappers[0].replaced.is_none());
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn test_stale_wrappers_are_removed() {
    let (_dir, config) = setup();
    fs::create_dir_all(&config.components_dir).unwrap();
    fs::write(config.components_dir.join("removed-icon.html.tera"), "old").unwrap();
    write_plain(&config, "kept.svg", "<svg/>");

    let summary = Pipeline::new(&config).run().unwrap();

    let outputs = output_contents(&config);
    assert!(!outputs.contains_key("removed-icon.html.tera"));
    assert!(outputs.contains_key("kept.html.tera"));
    assert_eq!(summary.cleaned, 1);
}

#[test]
fn test_clean_leaves_subdirectories() {
    let (_dir, config) = setup();
    fs::create_dir_all(config.components_dir.join("nested")).unwrap();
    fs::write(config.components_dir.join("nested/inner.html.tera"), "x").unwrap();
    write_plain(&config, "a.svg", "<svg/>");

    Pipeline::new(&config).run().unwrap();

    assert!(config.components_dir.join("nested/inner.html.tera").exists());
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_missing_source_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    // No assets/ tree at all
    let config = Config::default().resolved(dir.path());

    let err = Pipeline::new(&config).run().unwrap_err();
    assert!(matches!(err, PipelineError::MissingSourceDir { .. }));
}

#[test]
fn test_dry_run_leaves_filesystem_untouched() {
    let (_dir, config) = setup();
    let original = r#"<svg viewBox="0 0 20 20" width="20"><path fill="red" d="M0 0"/></svg>"#;
    write_optimized(&config, "star.svg", original);
    fs::create_dir_all(&config.components_dir).unwrap();
    fs::write(config.components_dir.join("stale.html.tera"), "old").unwrap();

    let summary = Pipeline::new(&config).with_dry_run(true).run().unwrap();

    // Everything is reported, nothing is changed
    assert_eq!(summary.cleaned, 1);
    assert_eq!(summary.rewritten, 1);
    assert_eq!(summary.wrappers.len(), 1);
    assert!(summary.dry_run);

    assert!(config.components_dir.join("stale.html.tera").exists());
    assert_eq!(
        fs::read_to_string(config.optimized_dir.join("star.svg")).unwrap(),
        original
    );
    assert!(!config.components_dir.join("star.html.tera").exists());
}
