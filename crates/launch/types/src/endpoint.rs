//! Externally reachable endpoints of a running application

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discovered (name, URL) pair
///
/// Endpoints are derived from application outputs at a single point in time
/// and are never persisted. The URL is kept as the rack rendered it; the port
/// slot holds whatever the balancer output reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Endpoint {
    /// Lower-cased process name, e.g. `web`
    pub name: String,

    /// URL to probe, e.g. `http://lb.example.com:80`
    pub url: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.url)
    }
}
