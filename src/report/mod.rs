//! Output of a license run.
//!
//! - [`text`] — the aggregated license document, one block per package.
//! - [`terminal`] — colored end-of-run summary on stderr.

pub mod terminal;
pub mod text;
