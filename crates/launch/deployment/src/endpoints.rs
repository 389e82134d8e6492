//! Endpoint discovery from application outputs

use launch_types::{Endpoint, BALANCER_HOST_OUTPUT};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `<Name>Port<N>Balancer`, capturing `<Name>`.
///
/// Anchored at both ends: keys that only start with the pattern, such as
/// `WebPort80BalancerName`, are other stack outputs and never endpoints.
static BALANCER_OUTPUT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\w+)Port\d+Balancer$").ok());

/// Derive externally reachable endpoints from application outputs.
///
/// Without a `BalancerHost` output the application has no public ports and
/// the result is empty. Every `<Name>Port<N>Balancer` output yields
/// `http://<BalancerHost>:<value>` named by the lower-cased `<Name>`.
/// Results are ordered by output key.
pub fn extract_endpoints(outputs: &BTreeMap<String, String>) -> Vec<Endpoint> {
    let Some(host) = outputs.get(BALANCER_HOST_OUTPUT) else {
        return Vec::new();
    };
    let Some(pattern) = BALANCER_OUTPUT_PATTERN.as_ref() else {
        return Vec::new();
    };

    outputs
        .iter()
        .filter_map(|(key, value)| {
            let captures = pattern.captures(key)?;
            let name = captures.get(1)?.as_str().to_lowercase();
            Some(Endpoint::new(name, format!("http://{}:{}", host, value)))
        })
        .collect()
}
