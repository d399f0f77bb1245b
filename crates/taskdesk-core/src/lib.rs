//! Shared HTTP plumbing for taskdesk services: health endpoints, the
//! request-id layer, tracing bootstrap, and serialization helpers.

pub mod http;
pub mod serde;
pub mod tracing;
