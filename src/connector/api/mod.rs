pub mod config;
pub mod container;
pub mod controller;
pub mod router;

pub use config::{AppConfig, ConfigOverrides};
pub use container::Container;
pub use router::Router;
