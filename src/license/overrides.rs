use std::collections::HashMap;

/// A trusted replacement for a package's published license metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// Resolves immediately to the literal text `public domain`.
    PublicDomain,
    /// Used as the sole SPDX candidate; license and repository URLs are dropped.
    License(String),
}

impl Override {
    /// Parse a configured label. "public domain" in any case is the sentinel.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("public domain") {
            Override::PublicDomain
        } else {
            Override::License(label.to_string())
        }
    }
}

/// Packages whose registry metadata is known to be wrong or missing.
const BUILTIN: &[(&str, &str)] = &[
    ("json-schema@0.2.3", "BSD-3-Clause"),
    ("jsonify@0.0.0", "Public domain"),
    ("buffers@0.1.1", "MIT"),
];

/// Immutable `name@version` → [`Override`] mapping, built once at startup.
#[derive(Debug, Clone)]
pub struct OverrideTable {
    entries: HashMap<String, Override>,
}

impl OverrideTable {
    /// The built-in entries, with `extra` (from config) added on top.
    /// A configured entry replaces a built-in one with the same identity.
    pub fn new<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut entries: HashMap<String, Override> = BUILTIN
            .iter()
            .map(|(id, label)| (id.to_string(), Override::from_label(label)))
            .collect();
        for (id, label) in extra {
            entries.insert(id.clone(), Override::from_label(label));
        }
        Self { entries }
    }

    #[cfg(test)]
    pub fn builtin() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn lookup(&self, id: &str) -> Option<&Override> {
        self.entries.get(id)
    }
}
