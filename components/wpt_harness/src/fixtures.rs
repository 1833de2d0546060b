//! Inline data fixtures for tests that `fetch` files from their own directory
//!
//! The engine has no network-backed `fetch`, so for a short, enumerated list
//! of tests the referenced data files are embedded in the wrapper and a shim
//! answers requests for exactly those paths. Every other request goes to the
//! original `fetch` untouched.

use crate::test_case::TestCase;
use tracing::warn;

/// Tests that need fixture data, with the logical paths they fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSpec {
    /// Corpus-relative test path
    pub test: String,
    /// Logical resource paths, relative to the test's directory
    pub resources: Vec<String>,
}

impl FixtureSpec {
    /// Create a fixture entry
    pub fn new(test: &str, resources: &[&str]) -> Self {
        Self {
            test: test.to_string(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Built-in fixture table
pub const DEFAULT_FIXTURES: &[(&str, &[&str])] = &[
    (
        "url/url-constructor.any.js",
        &[
            "resources/urltestdata.json",
            "resources/urltestdata-javascript-only.json",
        ],
    ),
    ("url/url-origin.any.js", &["resources/urltestdata.json"]),
];

/// Lookup table of fixture entries
#[derive(Debug, Clone)]
pub struct Fixtures {
    specs: Vec<FixtureSpec>,
}

impl Fixtures {
    /// Create the built-in table
    pub fn new() -> Self {
        Self {
            specs: DEFAULT_FIXTURES
                .iter()
                .map(|(test, resources)| FixtureSpec::new(test, resources))
                .collect(),
        }
    }

    /// Create an empty table
    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// Register an entry
    pub fn add(&mut self, spec: FixtureSpec) {
        self.specs.push(spec);
    }

    /// Find the entry for a corpus-relative test path
    pub fn lookup(&self, relative: &str) -> Option<&FixtureSpec> {
        self.specs.iter().find(|s| s.test == relative)
    }

    /// Render the fixture block for a test, if it has one.
    ///
    /// Data files that cannot be read are left out of the shim, so requests
    /// for them fall through to the real `fetch`.
    pub fn render(&self, test: &TestCase) -> Option<String> {
        let spec = self.lookup(&test.relative)?;

        let mut entries = Vec::new();
        for resource in &spec.resources {
            let path = test.dir().join(resource);
            match std::fs::read_to_string(&path) {
                Ok(data) => entries.push((resource.as_str(), data)),
                Err(e) => {
                    warn!(test = %test.relative, resource = %resource, error = %e, "fixture data unavailable");
                }
            }
        }

        if entries.is_empty() {
            return None;
        }
        Some(fetch_shim(&entries))
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the JavaScript that installs the `fetch` interceptor
fn fetch_shim(entries: &[(&str, String)]) -> String {
    let mut table = String::new();
    for (resource, data) in entries {
        // JSON string literals are valid JavaScript string literals
        let key = serde_json::Value::from(*resource).to_string();
        let value = serde_json::Value::from(data.as_str()).to_string();
        table.push_str(&format!("    {}: {},\n", key, value));
    }

    format!(
        r#"(function () {{
  const fixtures = {{
{table}  }};
  const realFetch = globalThis.fetch;
  globalThis.fetch = function (input, init) {{
    const key = typeof input === "string" ? input : (input && input.url);
    if (Object.prototype.hasOwnProperty.call(fixtures, key)) {{
      const body = fixtures[key];
      return Promise.resolve({{
        ok: true,
        status: 200,
        url: key,
        text: () => Promise.resolve(body),
        json: () => Promise.resolve(JSON.parse(body)),
      }});
    }}
    if (typeof realFetch === "function") {{
      return realFetch.call(this, input, init);
    }}
    return Promise.reject(new TypeError("fetch is not available"));
  }};
}})();
"#
    )
}
