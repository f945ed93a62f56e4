//! # Application Layer
//!
//! Ports implemented by the connector layer and the use cases that
//! orchestrate them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
