//! Network Layer
//!
//! Thin HTTP surface over the reconciliation service. Everything in
//! here is glue; the economy semantics live in `economy/` and
//! `service/`.

pub mod http;
pub mod protocol;

pub use http::{build_router, run, ServerConfig, ServerError};
