use tracing::warn;

use crate::models::{Package, ROOT_PARENTS, UNLICENSED};

/// Identity substring marking type-declaration-only packages.
const TYPES_NAMESPACE: &str = "@types";

/// Drop packages that have no license text of their own: `@types/*`
/// declaration packages, and the private, unlicensed top-level package.
/// Order of the remaining packages is preserved.
pub fn filter_packages(packages: &[Package]) -> Vec<Package> {
    packages
        .iter()
        .filter(|p| {
            let synthetic = p.id.contains(TYPES_NAMESPACE)
                || (p.metadata.parents == ROOT_PARENTS && p.metadata.licenses == UNLICENSED);
            if synthetic {
                warn!(package = %p.id, "filtering out");
            }
            !synthetic
        })
        .cloned()
        .collect()
}
