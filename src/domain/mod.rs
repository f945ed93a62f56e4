//! # Domain Layer
//!
//! Task, signing and conversation models plus the pure services built on
//! them. This layer knows nothing about HTTP clients or agent frameworks.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
