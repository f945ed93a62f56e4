mod chat;
mod credentials;
mod generation_request;
mod provider;
mod task;

pub use chat::*;
pub use credentials::*;
pub use generation_request::*;
pub use provider::*;
pub use task::*;
