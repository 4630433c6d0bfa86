//! Input object model for the translator
//!
//! Route-level policy declarations as they arrive from the platform's
//! configuration API, already parsed into plain structs. The translator
//! only borrows these; parsing and schema validation belong to the caller.

mod duration;
mod filters;
mod route;

pub use duration::Duration;
pub use filters::*;
pub use route::*;
