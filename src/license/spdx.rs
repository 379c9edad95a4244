use crate::models::{UNKNOWN, UNLICENSED};

/// Base URL of the SPDX license-list text files.
pub const SPDX_TEXT_BASE: &str =
    "https://raw.githubusercontent.com/spdx/license-list-data/master/text/";

/// URL of the reference text for an SPDX identifier.
pub fn text_url(id: &str) -> String {
    format!("{}{}.txt", SPDX_TEXT_BASE, id)
}

/// Normalize common non-SPDX strings to their SPDX equivalents.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "Apache 2.0" | "Apache License 2.0" | "Apache License, Version 2.0" | "Apache2" => {
            "Apache-2.0".to_string()
        }
        "MIT License" | "The MIT License" => "MIT".to_string(),
        "BSD" | "BSD License" => "BSD-3-Clause".to_string(),
        "BSD 2-Clause" | "Simplified BSD" => "BSD-2-Clause".to_string(),
        "BSD 3-Clause" | "New BSD" | "Modified BSD" => "BSD-3-Clause".to_string(),
        "GNU GPL v2" | "GNU General Public License v2" | "GPL v2" | "GPLv2" => {
            "GPL-2.0".to_string()
        }
        "GNU GPL v3" | "GNU General Public License v3" | "GPL v3" | "GPLv3" => {
            "GPL-3.0".to_string()
        }
        "GNU LGPL v2.1" | "LGPL v2.1" | "LGPLv2.1" => "LGPL-2.1".to_string(),
        "GNU LGPL v3" | "LGPL v3" | "LGPLv3" => "LGPL-3.0".to_string(),
        "Mozilla Public License 2.0" | "MPL 2.0" | "MPLv2" => "MPL-2.0".to_string(),
        "ISC License" => "ISC".to_string(),
        "CC0" => "CC0-1.0".to_string(),
        "AGPL v3" | "AGPLv3" | "GNU AGPL v3" => "AGPL-3.0".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Id(String),
    Operator,
    With,
}

/// Split on whitespace and parentheses. `AND`/`OR` become operators; `/`
/// is treated as an OR shorthand, as some ecosystems use it.
fn tokenize(expr: &str) -> Vec<Token> {
    let spaced = expr.replace(['(', ')'], " ").replace('/', " OR ");
    spaced
        .split_whitespace()
        .map(|word| match word {
            "AND" | "OR" | "and" | "or" => Token::Operator,
            "WITH" | "with" => Token::With,
            id => Token::Id(id.to_string()),
        })
        .collect()
}

/// Candidate SPDX identifiers for a declared license expression, in the
/// order they appear. Exception clauses (`WITH ...`) are dropped.
///
/// ```text
/// "(MIT OR Apache-2.0)"                  -> ["MIT", "Apache-2.0"]
/// "GPL-2.0 WITH Classpath-exception-2.0" -> ["GPL-2.0"]
/// "MIT License"                          -> ["MIT"]
/// ```
pub fn license_ids(expr: &str) -> Vec<String> {
    let trimmed = expr.trim().trim_end_matches('*').trim();
    if trimmed.is_empty()
        || trimmed == UNKNOWN
        || trimmed == UNLICENSED
        || trimmed.to_uppercase().starts_with("SEE LICENSE IN")
    {
        return Vec::new();
    }

    // Whole-string spellings such as "Apache License, Version 2.0" contain
    // spaces, so try them before tokenizing.
    let whole = normalize(trimmed);
    if whole != trimmed {
        return vec![whole];
    }

    let mut ids: Vec<String> = Vec::new();
    let mut skip_exception = false;
    for token in tokenize(trimmed) {
        match token {
            Token::With => skip_exception = true,
            Token::Operator => skip_exception = false,
            Token::Id(_) if skip_exception => skip_exception = false,
            Token::Id(id) => {
                let id = normalize(&id);
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
    }
    ids
}
