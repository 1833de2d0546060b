//! Unit tests for fixture injection

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wpt_harness::{FixtureSpec, Fixtures, TestCase};

fn url_test(root: &Path, name: &str) -> TestCase {
    let path = root.join("url").join(name);
    fs::create_dir_all(root.join("url/resources")).unwrap();
    fs::write(&path, "promise_test(() => fetch('resources/urltestdata.json'));").unwrap();
    TestCase::load(root, &path).unwrap()
}

#[test]
fn test_builtin_table_covers_url_tests() {
    let fixtures = Fixtures::new();
    let spec = fixtures.lookup("url/url-constructor.any.js").unwrap();
    assert_eq!(
        spec.resources,
        vec![
            "resources/urltestdata.json".to_string(),
            "resources/urltestdata-javascript-only.json".to_string()
        ]
    );
    assert!(fixtures.lookup("url/url-origin.any.js").is_some());
    assert!(fixtures.lookup("url/url-tojson.any.js").is_none());
}

#[test]
fn test_render_embeds_data_as_string_literal() {
    let root = TempDir::new().unwrap();
    let test = url_test(root.path(), "url-origin.any.js");
    fs::write(
        root.path().join("url/resources/urltestdata.json"),
        "[{\"input\": \"http://a/\\\"b\"}]\n",
    )
    .unwrap();

    let block = Fixtures::new().render(&test).unwrap();
    assert!(block.contains("\"resources/urltestdata.json\": \"[{\\\"input\\\": \\\"http://a/\\\\\\\"b\\\"}]\\n\""));
    assert!(block.contains("globalThis.fetch = function (input, init)"));
    assert!(block.contains("realFetch.call(this, input, init)"));
}

#[test]
fn test_missing_data_file_left_out() {
    let root = TempDir::new().unwrap();
    let test = url_test(root.path(), "url-constructor.any.js");
    fs::write(root.path().join("url/resources/urltestdata.json"), "[]").unwrap();

    let block = Fixtures::new().render(&test).unwrap();
    assert!(block.contains("\"resources/urltestdata.json\""));
    assert!(!block.contains("urltestdata-javascript-only.json"));
}

#[test]
fn test_no_block_without_any_data() {
    let root = TempDir::new().unwrap();
    let test = url_test(root.path(), "url-origin.any.js");
    assert!(Fixtures::new().render(&test).is_none());
}

#[test]
fn test_unlisted_test_gets_no_block() {
    let root = TempDir::new().unwrap();
    let test = url_test(root.path(), "url-tojson.any.js");
    fs::write(root.path().join("url/resources/urltestdata.json"), "[]").unwrap();
    assert!(Fixtures::new().render(&test).is_none());
}

#[test]
fn test_custom_entry() {
    let root = TempDir::new().unwrap();
    let test = url_test(root.path(), "url-tojson.any.js");
    fs::write(root.path().join("url/resources/extra.json"), "{}").unwrap();

    let mut fixtures = Fixtures::empty();
    fixtures.add(FixtureSpec::new("url/url-tojson.any.js", &["resources/extra.json"]));
    let block = fixtures.render(&test).unwrap();
    assert!(block.contains("\"resources/extra.json\": \"{}\""));
}
