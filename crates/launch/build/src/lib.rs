//! Launch source builds
//!
//! [`ApiReleaseBuilder`] is the production [`ReleaseBuilder`]: it packs a
//! source directory with [`package_source`], uploads it to the rack and
//! polls the resulting build until it yields a release.
//!
//! [`ReleaseBuilder`]: launch_deployment::ReleaseBuilder

pub mod api;
pub mod ignore_rules;
pub mod package;

pub use api::ApiReleaseBuilder;
pub use ignore_rules::{IgnoreRules, IGNORE_FILE};
pub use package::{package_source, package_source_blocking};
