//! # Application Layer
//!
//! Ports, retry scheduling, and use cases coordinating domain and
//! connector layers.

pub mod interfaces;
pub mod retry_policy;
pub mod use_cases;

pub use interfaces::*;
pub use retry_policy::*;
pub use use_cases::*;
