//! Route action policy objects
//!
//! Hand-written serde model of the xDS route components this crate emits.
//! Field names and omission semantics follow the protocol's JSON form, so
//! serializing these objects yields valid route configuration fragments.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy attached to a route action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RetryPolicy {
    /// Comma-separated retry trigger conditions
    #[serde(skip_serializing_if = "String::is_empty")]
    pub retry_on: String,

    /// Maximum number of retries; the proxy defaults to 1 when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_retries: Option<u32>,

    /// Timeout applied to each retry attempt
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub per_try_timeout: Option<Duration>,

    /// Upper bound on reselecting a different upstream host while retrying
    #[serde(skip_serializing_if = "is_zero")]
    pub host_selection_retry_max_attempts: i64,
}

/// A single specifier in a route's consistent-hash policy list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashPolicy {
    /// Which request property feeds the hash
    #[serde(flatten)]
    pub policy_specifier: PolicySpecifier,

    /// Stop hash computation at this specifier once it yields a value
    #[serde(default, skip_serializing_if = "is_false")]
    pub terminal: bool,
}

/// The property a hash specifier draws its key from. Exactly one per entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySpecifier {
    Header(HeaderHashPolicy),
    Cookie(CookieHashPolicy),
    ConnectionProperties(ConnectionPropertiesHashPolicy),
}

/// Hash on a request header value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HeaderHashPolicy {
    pub header_name: String,
}

/// Hash on a cookie, which the proxy generates when missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CookieHashPolicy {
    pub name: String,

    /// Lifetime of a generated cookie; carried only when the source set one
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,

    /// Path of a generated cookie
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Hash on properties of the downstream connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConnectionPropertiesHashPolicy {
    pub source_ip: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => humantime::parse_duration(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
