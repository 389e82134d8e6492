//! Launch core types
//!
//! Data model shared by the control-plane client, the deploy orchestrator
//! and the CLI:
//! - [`Application`] and its [`AppStatus`] as reported by the rack
//! - [`Build`] records produced while turning source into a release
//! - Strongly-typed identifiers ([`AppName`], [`ReleaseId`], [`BuildId`])
//! - [`Endpoint`] pairs discovered from application outputs

pub mod app;
pub mod build;
pub mod endpoint;
pub mod error;
pub mod ids;

pub use app::{parse_status, AppStatus, Application, BALANCER_HOST_OUTPUT, RELEASE_PARAMETER};
pub use build::{Build, BuildStatus};
pub use endpoint::Endpoint;
pub use error::{TypesError, TypesResult};
pub use ids::{AppName, BuildId, DeployRunId, ReleaseId};
