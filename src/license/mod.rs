//! License identifier handling.
//!
//! - [`spdx`] — normalizes common non-SPDX spellings and splits license
//!   expressions into candidate identifiers.
//! - [`overrides`] — the table of known-good labels for packages whose
//!   published metadata is wrong or missing.

pub mod overrides;
pub mod spdx;
