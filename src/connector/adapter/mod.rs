mod http_task_transport;
mod openrouter_client;
mod provider_factory;
mod result_extractors;
mod signed_task_client;
mod wiro_chat_model;

pub use http_task_transport::*;
pub use openrouter_client::*;
pub use provider_factory::*;
pub use result_extractors::*;
pub use signed_task_client::*;
pub use wiro_chat_model::*;
