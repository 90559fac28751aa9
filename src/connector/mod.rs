//! # Connector Layer
//!
//! Outward-facing integrations implementing application ports: one HTTP
//! client per provider API flavor, the routing invoker, and the offline
//! canned client.

pub mod adapter;

pub use adapter::*;
