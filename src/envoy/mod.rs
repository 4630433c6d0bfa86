//! Protocol object model and route translation
//!
//! Hand-written serde model of the xDS objects this crate produces:
//! - Structured value trees and typed-any wrappers (opaque filter payloads)
//! - Route action retry and hash policies
//!
//! plus the mapping functions that build them from the input model.

pub mod mapping;
pub mod route;
pub mod value;

pub use mapping::{
    default_retry_policy, hash_policy, merged_retry_policy, per_filter_config, retry_policy,
    struct_value, typed_per_filter_config,
};
