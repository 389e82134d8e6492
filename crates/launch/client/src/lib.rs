//! Launch control-plane client
//!
//! Two layers:
//! - [`ControlPlane`]: raw GET/POST transport returning payload bytes, with
//!   [`HttpControlPlane`] as the reqwest-backed implementation
//! - [`AppsApi`]: typed calls for the application, release and build
//!   endpoints, decoding payloads into `launch-types`

pub mod apps;
pub mod config;
pub mod error;
pub mod http;
pub mod plane;

pub use apps::AppsApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpControlPlane;
pub use plane::ControlPlane;
