//! Route-level policy declarations

use super::duration::Duration;
use super::filters::PerFilterConfig;
use serde::{Deserialize, Serialize};

/// The policy-bearing fields of a route, as the translator sees them.
///
/// Route matching, upstream selection and delegation live elsewhere; the
/// translator only consumes the attached policies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Opaque per-filter configuration, keyed by filter identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_filter_config: Option<PerFilterConfig>,

    /// Consistent-hash load balancing specifiers, in evaluation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hash_policy: Vec<HashPolicy>,

    /// Route-level retry behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<RetryPolicy>,

    /// Header manipulation applied during forwarding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_policy: Option<HeadersPolicy>,

    /// Tracing sampling overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing: Option<Tracing>,
}

/// A single load-balancer hash specifier.
///
/// Exactly one of `header`, `cookie` and `connection_properties` is expected
/// per entry; the translator honors the first populated one in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HashPolicyHeader>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<HashPolicyCookie>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_properties: Option<HashPolicyConnectionProperties>,

    /// Stop evaluating later specifiers once this one yields a hash
    #[serde(default)]
    pub terminal: bool,
}

impl HashPolicy {
    /// Count of populated payload variants. A well-formed entry has exactly one.
    pub fn populated_variants(&self) -> usize {
        usize::from(self.header.is_some())
            + usize::from(self.cookie.is_some())
            + usize::from(self.connection_properties.is_some())
    }
}

/// Hash on a request header value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashPolicyHeader {
    pub header_name: String,
}

/// Hash on a cookie, generating it on first use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashPolicyCookie {
    pub name: String,

    /// Lifetime attached to a generated cookie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,

    /// Path attached to a generated cookie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Hash on properties of the downstream connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashPolicyConnectionProperties {
    #[serde(default)]
    pub source_ip: bool,
}

/// Route-level retry behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Comma-separated retry trigger conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_on: Option<String>,

    /// Maximum number of retries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Timeout applied to each retry attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_try_timeout: Option<Duration>,
}

/// How headers are managed during forwarding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadersPolicy {
    /// Header values set on the request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<HeaderValue>,

    /// Header names removed from the request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

/// Header name/value pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderValue {
    pub name: String,
    pub value: String,
}

/// Tracing sampling overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracing {
    #[serde(default)]
    pub client_sampling: u8,

    #[serde(default)]
    pub random_sampling: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_field_names() {
        let route: Route = serde_json::from_value(serde_json::json!({
            "hashPolicy": [
                { "header": { "headerName": "x-session-id" }, "terminal": true }
            ],
            "retryPolicy": { "retryOn": "5xx", "count": 2, "perTryTimeout": "500ms" }
        }))
        .unwrap();

        assert_eq!(route.hash_policy.len(), 1);
        let entry = &route.hash_policy[0];
        assert_eq!(
            entry.header.as_ref().unwrap().header_name,
            "x-session-id".to_string()
        );
        assert!(entry.terminal);

        let retry = route.retry_policy.unwrap();
        assert_eq!(retry.retry_on.as_deref(), Some("5xx"));
        assert_eq!(retry.count, Some(2));
        assert_eq!(
            retry.per_try_timeout.unwrap().as_std(),
            std::time::Duration::from_millis(500)
        );
    }

    #[test]
    fn test_populated_variants() {
        let empty = HashPolicy::default();
        assert_eq!(empty.populated_variants(), 0);

        let double = HashPolicy {
            header: Some(HashPolicyHeader {
                header_name: "x-a".to_string(),
            }),
            cookie: Some(HashPolicyCookie {
                name: "session".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(double.populated_variants(), 2);
    }

    #[test]
    fn test_minimal_route_parses() {
        let route: Route = serde_json::from_str("{}").unwrap();
        assert_eq!(route, Route::default());
    }

    #[test]
    fn test_headers_policy_and_tracing() {
        let route: Route = serde_json::from_value(serde_json::json!({
            "headersPolicy": {
                "set": [ { "name": "x-forwarded-proto", "value": "https" } ],
                "remove": [ "x-internal-debug" ]
            },
            "tracing": { "clientSampling": 50, "randomSampling": 10 }
        }))
        .unwrap();

        let headers = route.headers_policy.unwrap();
        assert_eq!(headers.set[0].name, "x-forwarded-proto");
        assert_eq!(headers.set[0].value, "https");
        assert_eq!(headers.remove, vec!["x-internal-debug".to_string()]);

        let tracing = route.tracing.unwrap();
        assert_eq!(tracing.client_sampling, 50);
        assert_eq!(tracing.random_sampling, 10);
    }
}
