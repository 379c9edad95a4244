use regex::Regex;

/// Files tried, in order, as a repository's license text.
pub const LICENSE_FILES: [&str; 2] = ["license", "LICENSE"];

/// Files tried, in order, for a license section.
pub const README_FILES: [&str; 3] = ["README.md", "readme.markdown", "README.markdown"];

/// A GitHub repository named by `https://github.com/{owner}/{repo}[.git]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GithubRepo {
    pub owner: String,
    pub repo: String,
}

impl GithubRepo {
    /// Parse a repository URL. Anything with a different host, scheme, or
    /// extra path segments is rejected rather than half-matched.
    pub fn parse(url: &str) -> Option<Self> {
        let re = Regex::new(r"^https://github\.com/([^/#?]+)/([^/#?]+?)(?:\.git)?$").ok()?;
        let caps = re.captures(url)?;
        Some(Self {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
        })
    }

    /// Base URL for unrendered files on the `master` branch.
    pub fn raw_base(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/master/",
            self.owner, self.repo
        )
    }

    pub fn raw_url(&self, file: &str) -> String {
        format!("{}{}", self.raw_base(), file)
    }
}

/// The remainder of the first `# License <text>` heading line, matched
/// case-insensitively at any heading depth.
pub fn readme_license(readme: &str) -> Option<String> {
    let re = Regex::new(r"(?im)#[ \t]*license[ \t]+(\S.*?)[ \t\r]*$").ok()?;
    re.captures(readme).map(|caps| caps[1].to_string())
}
