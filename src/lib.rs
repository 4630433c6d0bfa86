//! xDS Route Translation
//!
//! Translate declarative route policies — opaque per-filter configuration,
//! consistent-hash load balancing and retries — into the Envoy xDS route
//! configuration objects a control plane embeds into the route actions it
//! serves to proxies.

pub mod config;
pub mod envoy;

pub use envoy::mapping::{
    default_retry_policy, hash_policy, merged_retry_policy, per_filter_config, retry_policy,
    struct_value, typed_per_filter_config,
};

use envoy::value::{Struct, TypedStruct};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Failed to serialize per-filter configuration: {0}")]
    FilterConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Everything derived from a single route, ready to embed into a route action.
#[derive(Debug, Clone, Default)]
pub struct RouteTranslation {
    /// Per-filter configuration as struct payloads
    pub per_filter_config: Option<BTreeMap<String, Struct>>,
    /// Per-filter configuration as typed-any payloads
    pub typed_per_filter_config: Option<BTreeMap<String, TypedStruct>>,
    /// Consistent-hash specifiers, in input order
    pub hash_policy: Vec<envoy::route::HashPolicy>,
    /// Retry policy with the platform default overlay applied
    pub retry_policy: Option<envoy::route::RetryPolicy>,
}

/// Translate every policy attached to a route.
pub fn translate_route(route: &config::Route) -> Result<RouteTranslation> {
    Ok(RouteTranslation {
        per_filter_config: per_filter_config(route)?,
        typed_per_filter_config: typed_per_filter_config(route)?,
        hash_policy: hash_policy(&route.hash_policy),
        retry_policy: merged_retry_policy(route),
    })
}
