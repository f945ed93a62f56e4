//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Task API transport and the signed task client
//! - Chat-model adapters (signed task API, OpenRouter)
//! - CLI-facing container, router and controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
