//! Unit tests for META directive parsing

use wpt_harness::{DirectiveKind, Directives};

#[test]
fn test_parse_scripts_in_order() {
    let source = r#"// META: global=window,worker
// META: script=/common/sab.js
// META: script=resources/encodings.js
// META: title=Encoding labels
test(() => {});
"#;

    let directives = Directives::parse(source);
    assert_eq!(
        directives.scripts(),
        &["/common/sab.js".to_string(), "resources/encodings.js".to_string()]
    );
    assert_eq!(directives.title(), Some("Encoding labels"));
    assert_eq!(directives.timeout(), None);
}

#[test]
fn test_no_directives_is_empty() {
    let directives = Directives::parse("test(() => {});\n");
    assert!(directives.is_empty());
    for kind in DirectiveKind::ALL {
        assert!(directives.get(kind).is_empty());
    }
}

#[test]
fn test_unknown_keys_ignored() {
    let directives = Directives::parse("// META: variant=?1-10\n// META: timeout=long\n");
    assert_eq!(directives.timeout(), Some("long"));
    assert!(directives.scripts().is_empty());
}

#[test]
fn test_value_split_on_first_equals() {
    let directives = Directives::parse("// META: title=a=b\n");
    assert_eq!(directives.title(), Some("a=b"));
}

#[test]
fn test_indented_and_spaced_directive() {
    let directives = Directives::parse("   // META:  script = helper.js  \n");
    assert_eq!(directives.scripts(), &["helper.js".to_string()]);
}

#[test]
fn test_line_without_equals_ignored() {
    let directives = Directives::parse("// META: script\n");
    assert!(directives.is_empty());
}

#[test]
fn test_directives_after_header_ignored() {
    let mut source = String::new();
    for i in 0..20 {
        source.push_str(&format!("// line {}\n", i));
    }
    source.push_str("// META: script=late.js\n");

    let directives = Directives::parse(&source);
    assert!(directives.scripts().is_empty());
}

#[test]
fn test_directive_on_last_header_line() {
    let mut source = String::new();
    for i in 0..19 {
        source.push_str(&format!("// line {}\n", i));
    }
    source.push_str("// META: script=edge.js\n");

    let directives = Directives::parse(&source);
    assert_eq!(directives.scripts(), &["edge.js".to_string()]);
}

#[test]
fn test_kind_keys_round_trip() {
    for kind in DirectiveKind::ALL {
        assert_eq!(DirectiveKind::from_key(kind.key()), Some(kind));
    }
    assert_eq!(DirectiveKind::from_key("variant"), None);
}
