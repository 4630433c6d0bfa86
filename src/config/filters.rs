//! Per-filter configuration blocks
//!
//! Opaque filter settings attached to a route, keyed by the HTTP filter
//! identifier. The translator converts these blocks generically into
//! structured values; the typed declarations here exist so callers have a
//! schema to parse into, not because the translator inspects them.

use serde::{Deserialize, Serialize};

/// Per-filter configuration attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerFilterConfig {
    /// Source IP allow/deny filter settings
    #[serde(
        rename = "envoy.filters.http.ip_allow_deny",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_allow_deny: Option<IpAllowDenyCidrs>,

    /// Header size filter settings
    #[serde(
        rename = "envoy.filters.http.header_size",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub header_size: Option<HeaderSize>,
}

/// Allowed and denied source address ranges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpAllowDenyCidrs {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_cidrs: Vec<Cidr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_cidrs: Vec<Cidr>,
}

/// CIDR range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cidr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_len: Option<IntOrString>,
}

/// Integer-or-string scalar, as it appears in Kubernetes-style APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    String(String),
}

/// Header size filter settings, nested per the filter's own schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderSize {
    pub header_size: HeaderSizeLimits,
}

/// The single limit the header size filter understands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderSizeLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,
}
