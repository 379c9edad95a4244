//! Discover installed npm packages under a directory.
//!
//! Walks `node_modules/` (including `@scope/` directories and nested
//! `node_modules/`) and reads each `package.json` into a [`Package`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::license::spdx::license_ids;
use crate::models::{Package, PackageMetadata, ROOT_PARENTS, UNKNOWN, UNLICENSED};
use crate::resolver::github::GithubRepo;

#[derive(Debug, Deserialize)]
struct Manifest {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    private: bool,
    license: Option<LicenseField>,
    licenses: Option<LegacyLicenses>,
    repository: Option<RepositoryField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseField {
    Id(String),
    Object {
        #[serde(rename = "type")]
        kind: Option<String>,
        url: Option<String>,
    },
}

impl LicenseField {
    fn kind(&self) -> Option<&str> {
        match self {
            LicenseField::Id(id) => Some(id),
            LicenseField::Object { kind, .. } => kind.as_deref(),
        }
    }

    fn url(&self) -> Option<&str> {
        match self {
            LicenseField::Id(_) => None,
            LicenseField::Object { url, .. } => url.as_deref(),
        }
    }
}

/// The deprecated `licenses` field: usually an array, occasionally a single entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyLicenses {
    Many(Vec<LicenseField>),
    One(LicenseField),
}

impl LegacyLicenses {
    fn entries(&self) -> &[LicenseField] {
        match self {
            LegacyLicenses::Many(entries) => entries,
            LegacyLicenses::One(entry) => std::slice::from_ref(entry),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Url(String),
    Object { url: Option<String> },
}

impl RepositoryField {
    fn url(&self) -> Option<&str> {
        match self {
            RepositoryField::Url(url) => Some(url),
            RepositoryField::Object { url } => url.as_deref(),
        }
    }
}

/// Crawl `start` and return every package found, sorted by identity.
///
/// The root `package.json` must exist and parse. Child manifests that fail
/// to parse are skipped with a warning; unreadable directories are errors.
pub fn crawl(start: &Path) -> Result<Vec<Package>> {
    let root_path = start.join("package.json");
    let root = read_manifest(&root_path)
        .with_context(|| format!("reading root manifest {}", root_path.display()))?;

    let mut crawler = Crawler::default();
    let root_id = crawler.add(start, root, ROOT_PARENTS);
    crawler.walk_node_modules(start, &root_id)?;

    let mut packages = crawler.packages;
    packages.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(packages)
}

#[derive(Default)]
struct Crawler {
    packages: Vec<Package>,
    seen_ids: HashSet<String>,
    seen_dirs: HashSet<PathBuf>,
}

impl Crawler {
    /// Record a package; the first occurrence of an identity wins.
    /// Returns the identity either way.
    fn add(&mut self, dir: &Path, manifest: Manifest, parent: &str) -> String {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = manifest.name.clone().unwrap_or(dir_name);
        let version = manifest.version.clone().unwrap_or_else(|| "0.0.0".to_string());
        let package = Package::new(&name, &version, metadata_for(dir, &manifest, parent));

        let id = package.id.clone();
        if self.seen_ids.insert(id.clone()) {
            debug!(package = %id, parent, "found");
            self.packages.push(package);
        }
        id
    }

    fn walk_node_modules(&mut self, dir: &Path, parent: &str) -> Result<()> {
        let node_modules = dir.join("node_modules");
        if !node_modules.is_dir() {
            return Ok(());
        }

        for entry in subdirectories(&node_modules)? {
            let name = entry
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if name.starts_with('.') {
                continue;
            }
            if name.starts_with('@') {
                for scoped in subdirectories(&entry)? {
                    self.visit(&scoped, parent)?;
                }
            } else {
                self.visit(&entry, parent)?;
            }
        }
        Ok(())
    }

    fn visit(&mut self, dir: &Path, parent: &str) -> Result<()> {
        let manifest_path = dir.join("package.json");
        if !manifest_path.is_file() {
            return Ok(());
        }

        // Symlinked packages (workspaces, pnpm) can form cycles.
        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        if !self.seen_dirs.insert(canonical) {
            return Ok(());
        }

        let manifest = match read_manifest(&manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!("skipping {}: {:#}", manifest_path.display(), err);
                return Ok(());
            }
        };

        let id = self.add(dir, manifest, parent);
        self.walk_node_modules(dir, &id)
    }
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn metadata_for(dir: &Path, manifest: &Manifest, parent: &str) -> PackageMetadata {
    let legacy = manifest
        .licenses
        .as_ref()
        .map(LegacyLicenses::entries)
        .unwrap_or_default();

    let declared = manifest
        .license
        .as_ref()
        .and_then(LicenseField::kind)
        .map(str::to_string)
        .or_else(|| {
            let kinds: Vec<&str> = legacy.iter().filter_map(LicenseField::kind).collect();
            (!kinds.is_empty()).then(|| kinds.join(" OR "))
        });

    let licenses = match declared {
        Some(license) => license,
        None if manifest.private => UNLICENSED.to_string(),
        None => UNKNOWN.to_string(),
    };

    let repository_url = manifest
        .repository
        .as_ref()
        .and_then(RepositoryField::url)
        .map(normalize_repository);

    let license_url = legacy
        .iter()
        .find_map(LicenseField::url)
        .map(str::to_string)
        .or_else(|| {
            let repo = GithubRepo::parse(repository_url.as_deref()?)?;
            let file = license_file(dir)?;
            Some(format!(
                "https://github.com/{}/{}/raw/master/{}",
                repo.owner, repo.repo, file
            ))
        });

    PackageMetadata {
        license_ids: license_ids(&licenses),
        license_url,
        repository_url,
        parents: parent.to_string(),
        licenses,
    }
}

/// Rewrite the common git remote spellings to a browsable `https://` URL.
/// A `#ref` or `?query` suffix is dropped.
pub fn normalize_repository(url: &str) -> String {
    let url = url.trim();
    let url = url.split(['#', '?']).next().unwrap_or(url);

    if let Some(path) = url.strip_prefix("github:") {
        return format!("https://github.com/{}", path.trim_end_matches(".git"));
    }
    // `owner/repo` shorthand
    if !url.contains(':') && url.matches('/').count() == 1 && !url.contains(' ') {
        return format!("https://github.com/{}", url.trim_end_matches(".git"));
    }

    let url = url
        .replace("git+ssh://git@", "git://")
        .replace("git+https://github.com", "https://github.com")
        .replace("git://github.com", "https://github.com")
        .replace("git@github.com:", "https://github.com/");
    url.strip_suffix(".git").unwrap_or(&url).to_string()
}

/// Name of the first `LICENSE*`/`LICENCE*` file in `dir`, any case.
fn license_file(dir: &Path) -> Option<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.starts_with("license") || lower.starts_with("licence")
        })
        .collect();
    names.sort();
    names.into_iter().next()
}
