//! Unit tests for categories and discovery

use std::fs;
use tempfile::TempDir;
use wpt_harness::categories::{self, CATEGORIES};

#[test]
fn test_known_categories() {
    let names = categories::names();
    assert_eq!(names.len(), CATEGORIES.len());
    for name in ["console", "encoding", "url", "fetch-api", "streams", "abort"] {
        assert!(names.contains(&name), "missing category {}", name);
    }
    assert!(categories::patterns("url").unwrap().contains(&"url/url-origin.any.js"));
    assert!(categories::patterns("dom").is_none());
}

#[test]
fn test_discover_exact_paths_sorted() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("url")).unwrap();
    fs::write(root.path().join("url/b.any.js"), "").unwrap();
    fs::write(root.path().join("url/a.any.js"), "").unwrap();

    let found = categories::discover(root.path(), &["url/b.any.js", "url/a.any.js", "url/missing.any.js"]);
    assert_eq!(
        found,
        vec![root.path().join("url/a.any.js"), root.path().join("url/b.any.js")]
    );
}

#[test]
fn test_discover_wildcard_is_shallow() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("streams/nested")).unwrap();
    fs::write(root.path().join("streams/one.any.js"), "").unwrap();
    fs::write(root.path().join("streams/two.any.js"), "").unwrap();
    fs::write(root.path().join("streams/readme.md"), "").unwrap();
    fs::write(root.path().join("streams/nested/three.any.js"), "").unwrap();

    let found = categories::discover(root.path(), &["streams/*.any.js"]);
    assert_eq!(
        found,
        vec![root.path().join("streams/one.any.js"), root.path().join("streams/two.any.js")]
    );
}

#[test]
fn test_discover_deduplicates() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("hr-time")).unwrap();
    fs::write(root.path().join("hr-time/monotonic-clock.any.js"), "").unwrap();

    let found = categories::discover(
        root.path(),
        &["hr-time/monotonic-clock.any.js", "hr-time/*.any.js"],
    );
    assert_eq!(found.len(), 1);
}

#[test]
fn test_discover_missing_directory() {
    let root = TempDir::new().unwrap();
    assert!(categories::discover(root.path(), &["nowhere/*.js"]).is_empty());
}
