use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::models::{Failures, Package};
use crate::resolver::Resolver;

/// What a completed run wrote.
#[derive(Debug, Default, PartialEq)]
pub struct Tally {
    pub written: usize,
    /// Identities whose license text could not be found.
    pub unresolved: Vec<String>,
}

/// One package block: header, blank line, text, blank line.
pub fn record(id: &str, text: &str) -> String {
    format!("# {}\n\n{}\n\n", id, text)
}

/// Resolve every package in order and write one block each to `output`,
/// truncating it first. Unresolved packages are written with an empty body
/// and counted in `failures`.
pub async fn write_licenses(
    output: &Path,
    packages: &[Package],
    resolver: &Resolver<'_>,
    failures: &mut Failures,
) -> Result<Tally> {
    let mut file = File::create(output)
        .await
        .with_context(|| format!("creating {}", output.display()))?;
    let mut tally = Tally::default();

    for package in packages {
        let resolution = resolver.resolve(&package.id, &package.metadata).await;
        if !resolution.is_resolved() {
            failures.record();
            tally.unresolved.push(package.id.clone());
        }

        file.write_all(record(&package.id, resolution.text()).as_bytes())
            .await
            .with_context(|| format!("writing {}", output.display()))?;
        tally.written += 1;
    }

    file.flush()
        .await
        .with_context(|| format!("flushing {}", output.display()))?;
    Ok(tally)
}
