//! Input-model to protocol-object mapping
//!
//! Free functions that build the protocol objects for one route: the
//! structured-value conversion of opaque per-filter configuration, the
//! consistent-hash policy translation, and the retry policy merge with the
//! platform default overlay.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config;
use crate::envoy::route::{
    ConnectionPropertiesHashPolicy, CookieHashPolicy, HashPolicy, HeaderHashPolicy,
    PolicySpecifier, RetryPolicy,
};
use crate::envoy::value::{Struct, TypedStruct, Value};
use crate::Result;

/// Convert an arbitrary JSON value into the protocol's structured value tree.
///
/// Total by design: recognized scalars map 1:1, lists and mappings recurse
/// depth-first, and anything unrepresentable becomes the null node. Opaque
/// filter configuration must never block route construction, so this
/// function has no error path. All numeric input narrows to a double;
/// callers lose precision on integers beyond 2^53.
pub fn struct_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(struct_value).collect()),
        serde_json::Value::Object(fields) => Value::Struct(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), struct_value(v)))
                .collect(),
        ),
    }
}

/// Convert a route's per-filter configuration into struct payloads.
///
/// Absent configuration yields `None` so callers leave the field unset
/// rather than emit an empty mapping.
pub fn per_filter_config(route: &config::Route) -> Result<Option<BTreeMap<String, Struct>>> {
    filter_config_structs(route.per_filter_config.as_ref())
}

/// Same payloads as [`per_filter_config`], each boxed in a typed-any wrapper.
pub fn typed_per_filter_config(
    route: &config::Route,
) -> Result<Option<BTreeMap<String, TypedStruct>>> {
    let structs = filter_config_structs(route.per_filter_config.as_ref())?;
    Ok(structs.map(|m| {
        m.into_iter()
            .map(|(name, s)| (name, TypedStruct::of(s)))
            .collect()
    }))
}

/// Shared conversion path for both per-filter forms: re-serialize the typed
/// blocks into untyped JSON, then convert each block. One code path keeps
/// the plain and typed outputs content-identical.
fn filter_config_structs(
    conf: Option<&config::PerFilterConfig>,
) -> Result<Option<BTreeMap<String, Struct>>> {
    let Some(conf) = conf else {
        return Ok(None);
    };

    let blocks = match serde_json::to_value(conf)? {
        serde_json::Value::Object(blocks) => blocks,
        _ => serde_json::Map::new(),
    };

    let mut out = BTreeMap::new();
    for (name, block) in &blocks {
        let payload = match struct_value(block) {
            Value::Struct(s) => s,
            // a block that is not a keyed mapping carries nothing
            _ => Struct::default(),
        };
        out.insert(name.clone(), payload);
    }
    Ok(Some(out))
}

/// Translate a route's hash specifier list.
///
/// Entries translate in input order. An entry with several populated
/// variants contributes only the first in header, cookie,
/// connection-properties order; an entry with none contributes nothing, not
/// even a terminal-only stub.
pub fn hash_policy(policies: &[config::HashPolicy]) -> Vec<HashPolicy> {
    let mut out = Vec::with_capacity(policies.len());
    for (index, policy) in policies.iter().enumerate() {
        match hash_policy_specifier(policy) {
            Some(policy_specifier) => out.push(HashPolicy {
                policy_specifier,
                terminal: policy.terminal,
            }),
            None => debug!(index, "hash policy entry sets no variant, skipping"),
        }
    }
    out
}

/// Resolve the populated payload variant for one specifier.
fn hash_policy_specifier(policy: &config::HashPolicy) -> Option<PolicySpecifier> {
    if policy.populated_variants() > 1 {
        debug!("hash policy entry sets more than one variant, honoring the first");
    }

    if let Some(header) = &policy.header {
        return Some(PolicySpecifier::Header(HeaderHashPolicy {
            header_name: header.header_name.clone(),
        }));
    }
    if let Some(cookie) = &policy.cookie {
        return Some(PolicySpecifier::Cookie(CookieHashPolicy {
            name: cookie.name.clone(),
            ttl: cookie.ttl.map(|d| d.as_std()),
            path: cookie.path.clone(),
        }));
    }
    if let Some(props) = &policy.connection_properties {
        return Some(PolicySpecifier::ConnectionProperties(
            ConnectionPropertiesHashPolicy {
                source_ip: props.source_ip,
            },
        ));
    }
    None
}

/// Route-level retry policy, before the platform default overlay.
///
/// `None` when the route declares no retry behavior at all. A declared
/// policy with no trigger conditions falls back to retrying server errors;
/// the retry count and per-try timeout are carried only when set.
pub fn retry_policy(route: &config::Route) -> Option<RetryPolicy> {
    let rp = route.retry_policy.as_ref()?;

    let retry_on = rp
        .retry_on
        .as_deref()
        .filter(|conditions| !conditions.is_empty())
        .unwrap_or("5xx");

    Some(RetryPolicy {
        retry_on: retry_on.to_string(),
        num_retries: rp.count.filter(|n| *n > 0),
        per_try_timeout: rp.per_try_timeout.map(|d| d.as_std()),
        ..Default::default()
    })
}

/// The platform-wide baseline retry policy layered beneath route policy.
pub fn default_retry_policy() -> RetryPolicy {
    RetryPolicy {
        retry_on: "connect-failure".to_string(),
        num_retries: Some(3),
        host_selection_retry_max_attempts: 3,
        ..Default::default()
    }
}

/// Merge the route-level retry policy with the platform default.
///
/// Returns `None` when the route has no retry policy: the virtual-host-level
/// platform policy already applies, and no route-level override must be
/// fabricated. Otherwise:
/// - trigger conditions are the union of both policies, route conditions
///   first (both sets stay active);
/// - the retry count keeps a route-supplied value, since it is coupled to
///   the route's own per-try timeout, and falls back to the default's count
///   otherwise;
/// - the host selection retry cap is always the platform's, regardless of
///   what the route carried.
pub fn merged_retry_policy(route: &config::Route) -> Option<RetryPolicy> {
    let mut policy = retry_policy(route)?;
    let default = default_retry_policy();

    policy.retry_on = format!("{},{}", policy.retry_on, default.retry_on);
    if policy.num_retries.is_none() {
        policy.num_retries = default.num_retries;
    }
    policy.host_selection_retry_max_attempts = default.host_selection_retry_max_attempts;

    Some(policy)
}
