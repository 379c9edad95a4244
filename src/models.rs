/// Marker the crawler records in `parents` for the top-level package.
pub const ROOT_PARENTS: &str = "UNDEFINED";

/// Marker the crawler records in `licenses` for private, unlicensed packages.
pub const UNLICENSED: &str = "UNLICENSED";

/// Marker for packages whose manifest carries no license information.
pub const UNKNOWN: &str = "UNKNOWN";

/// A discovered package, keyed by its `name@version` identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: String,
    pub metadata: PackageMetadata,
}

impl Package {
    pub fn new(name: &str, version: &str, metadata: PackageMetadata) -> Self {
        Self {
            id: format!("{}@{}", name, version),
            metadata,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageMetadata {
    /// Candidate SPDX identifiers, in preference order.
    pub license_ids: Vec<String>,
    pub license_url: Option<String>,
    pub repository_url: Option<String>,
    /// Identity of the package this one was found under, or [`ROOT_PARENTS`].
    pub parents: String,
    /// The license field exactly as declared (or [`UNLICENSED`] / [`UNKNOWN`]).
    pub licenses: String,
}

/// Where a resolved license text came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseSource {
    PublicDomain,
    LicenseUrl,
    RepositoryFile(&'static str),
    Readme(&'static str),
    Spdx(String),
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::PublicDomain => write!(f, "public domain override"),
            LicenseSource::LicenseUrl => write!(f, "licenseUrl"),
            LicenseSource::RepositoryFile(name) => write!(f, "repository file '{}'", name),
            LicenseSource::Readme(name) => write!(f, "license section of {}", name),
            LicenseSource::Spdx(id) => write!(f, "spdx reference for {}", id),
        }
    }
}

/// Outcome of resolving one package.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved { text: String, source: LicenseSource },
    Unresolved,
}

impl Resolution {
    /// The text written to the output document; empty when unresolved.
    pub fn text(&self) -> &str {
        match self {
            Resolution::Resolved { text, .. } => text,
            Resolution::Unresolved => "",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Run-wide failure accounting. Any nonzero count means a nonzero exit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Failures(usize);

impl Failures {
    pub fn record(&mut self) {
        self.0 += 1;
    }

    pub fn count(&self) -> usize {
        self.0
    }

    pub fn exit_code(&self) -> i32 {
        if self.0 == 0 {
            0
        } else {
            1
        }
    }
}
