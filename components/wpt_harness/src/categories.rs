//! WinterCG minimum-common-API categories and test discovery

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Category name to corpus-relative file patterns
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "console",
        &[
            "console/console-is-a-namespace.any.js",
            "console/console-tests-historical.any.js",
            "console/console-log-large-array.any.js",
        ],
    ),
    (
        "encoding",
        &[
            "encoding/api-basics.any.js",
            "encoding/textdecoder-fatal.any.js",
            "encoding/textdecoder-labels.any.js",
            "encoding/textencoder-constructor-non-utf.any.js",
            "encoding/textencoder-utf16-surrogates.any.js",
        ],
    ),
    ("hr-time", &["hr-time/monotonic-clock.any.js"]),
    ("performance", &["hr-time/monotonic-clock.any.js"]),
    (
        "url",
        &[
            "url/url-constructor.any.js",
            "url/url-origin.any.js",
            "url/url-tojson.any.js",
            "url/urlsearchparams-constructor.any.js",
            "url/urlsearchparams-get.any.js",
            "url/urlsearchparams-getall.any.js",
            "url/urlsearchparams-has.any.js",
            "url/urlsearchparams-set.any.js",
            "url/urlsearchparams-size.any.js",
            "url/urlsearchparams-stringifier.any.js",
        ],
    ),
    (
        "fetch-api",
        &[
            "fetch/api/headers/headers-basic.any.js",
            "fetch/api/request/request-consume-empty.any.js",
            "fetch/api/response/response-consume-empty.any.js",
        ],
    ),
    ("webcrypto", &["WebCryptoAPI/getRandomValues.any.js"]),
    ("base64", &["html/webappapis/atob/base64.any.js"]),
    (
        "timers",
        &[
            "html/webappapis/timers/cleartimeout-clearinterval.any.js",
            "html/webappapis/timers/missing-timeout-setinterval.any.js",
            "html/webappapis/timers/negative-settimeout.any.js",
            "html/webappapis/timers/negative-setinterval.any.js",
        ],
    ),
    (
        "streams",
        &[
            "streams/readable-streams/default-reader.any.js",
            "streams/writable-streams/constructor.any.js",
        ],
    ),
    ("abort", &["dom/abort/abort-signal-any.any.js"]),
];

/// Patterns registered for a category
pub fn patterns(category: &str) -> Option<&'static [&'static str]> {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, patterns)| *patterns)
}

/// All category names in table order
pub fn names() -> Vec<&'static str> {
    CATEGORIES.iter().map(|(name, _)| *name).collect()
}

/// Find the test files matching `patterns` under `corpus_root`, sorted by path.
///
/// A pattern is either an exact corpus-relative path or `dir/*suffix`, which
/// matches regular files directly inside `dir` whose names end in `suffix`.
pub fn discover<S: AsRef<str>>(corpus_root: &Path, patterns: &[S]) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        match pattern.split_once('*') {
            Some((dir, suffix)) if !suffix.contains('*') => {
                let dir = corpus_root.join(dir.trim_end_matches('/'));
                if !dir.is_dir() {
                    warn!(pattern, "pattern directory not found");
                    continue;
                }
                let matches = WalkDir::new(&dir)
                    .min_depth(1)
                    .max_depth(1)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .filter(|e| e.file_name().to_string_lossy().ends_with(suffix));
                for entry in matches {
                    found.insert(entry.into_path());
                }
            }
            Some(_) => warn!(pattern, "unsupported pattern: more than one wildcard"),
            None => {
                let path = corpus_root.join(pattern);
                if path.is_file() {
                    found.insert(path);
                } else {
                    warn!(pattern, "test file not found");
                }
            }
        }
    }

    found.into_iter().collect()
}
