//! Pure domain services.

mod signer;

pub use signer::*;
