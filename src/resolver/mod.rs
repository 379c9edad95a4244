//! License text resolution.
//!
//! For one package, try each [`Strategy`] in order against the fetcher and
//! return the first text produced. A failed fetch, a wrong content type, or
//! a missing match is a miss that moves on to the next strategy, never an
//! error. When every strategy misses the package is [`Resolution::Unresolved`].

pub mod github;

use tracing::{debug, info, warn};

use crate::fetch::{Fetch, Fetched};
use crate::license::overrides::{Override, OverrideTable};
use crate::license::spdx;
use crate::models::{LicenseSource, PackageMetadata, Resolution};

use github::{readme_license, GithubRepo, LICENSE_FILES, README_FILES};

/// Text returned for packages overridden as public domain.
pub const PUBLIC_DOMAIN_TEXT: &str = "public domain";

/// Resolution inputs after any override has been applied.
#[derive(Debug, Clone, PartialEq)]
struct Candidates<'a> {
    license_ids: Vec<String>,
    license_url: Option<&'a str>,
    repository: Option<GithubRepo>,
}

/// One way of finding a license text, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Strategy {
    LicenseUrl,
    RepositoryFile,
    Readme,
    Spdx,
}

const STRATEGIES: [Strategy; 4] = [
    Strategy::LicenseUrl,
    Strategy::RepositoryFile,
    Strategy::Readme,
    Strategy::Spdx,
];

pub struct Resolver<'a> {
    fetcher: &'a dyn Fetch,
    overrides: &'a OverrideTable,
}

impl<'a> Resolver<'a> {
    pub fn new(fetcher: &'a dyn Fetch, overrides: &'a OverrideTable) -> Self {
        Self { fetcher, overrides }
    }

    /// Resolve the license text for `id`. Never fails; an exhausted chain
    /// is reported as [`Resolution::Unresolved`].
    pub async fn resolve(&self, id: &str, metadata: &PackageMetadata) -> Resolution {
        debug!(
            package = id,
            license_url = metadata.license_url.as_deref().unwrap_or("-"),
            "processing"
        );

        let candidates = match self.overrides.lookup(id) {
            Some(Override::PublicDomain) => {
                info!(package = id, "using public domain override");
                return Resolution::Resolved {
                    text: PUBLIC_DOMAIN_TEXT.to_string(),
                    source: LicenseSource::PublicDomain,
                };
            }
            Some(Override::License(label)) => {
                info!(package = id, license = %label, "using override");
                Candidates {
                    license_ids: vec![label.clone()],
                    license_url: None,
                    repository: None,
                }
            }
            None => Candidates {
                license_ids: metadata.license_ids.clone(),
                license_url: metadata.license_url.as_deref(),
                repository: metadata.repository_url.as_deref().and_then(GithubRepo::parse),
            },
        };

        for strategy in STRATEGIES {
            debug!(package = id, ?strategy, "trying");
            if let Some((text, source)) = self.attempt(strategy, &candidates).await {
                info!(package = id, "used {}", source);
                return Resolution::Resolved { text, source };
            }
        }

        warn!(package = id, "failed to find license");
        Resolution::Unresolved
    }

    async fn attempt(
        &self,
        strategy: Strategy,
        candidates: &Candidates<'_>,
    ) -> Option<(String, LicenseSource)> {
        match strategy {
            Strategy::LicenseUrl => {
                let url = candidates.license_url?;
                let fetched = self.get(url).await?;
                if !fetched.is_plain_text() {
                    debug!(
                        url,
                        content_type = fetched.content_type.as_deref().unwrap_or("-"),
                        "licenseUrl is not plain text"
                    );
                    return None;
                }
                Some((fetched.body, LicenseSource::LicenseUrl))
            }
            Strategy::RepositoryFile => {
                let repo = candidates.repository.as_ref()?;
                for file in LICENSE_FILES {
                    if let Some(fetched) = self.get(&repo.raw_url(file)).await {
                        return Some((fetched.body, LicenseSource::RepositoryFile(file)));
                    }
                }
                None
            }
            Strategy::Readme => {
                let repo = candidates.repository.as_ref()?;
                for file in README_FILES {
                    // Only the first README that exists is searched.
                    if let Some(fetched) = self.get(&repo.raw_url(file)).await {
                        let text = readme_license(&fetched.body);
                        if text.is_none() {
                            debug!(file, "no license heading in readme");
                        }
                        return text.map(|text| (text, LicenseSource::Readme(file)));
                    }
                }
                None
            }
            Strategy::Spdx => {
                for license_id in &candidates.license_ids {
                    if let Some(fetched) = self.get(&spdx::text_url(license_id)).await {
                        return Some((fetched.body, LicenseSource::Spdx(license_id.clone())));
                    }
                }
                None
            }
        }
    }

    async fn get(&self, url: &str) -> Option<Fetched> {
        match self.fetcher.fetch(url).await {
            Ok(fetched) => Some(fetched),
            Err(err) => {
                debug!("{}", err);
                None
            }
        }
    }
}
