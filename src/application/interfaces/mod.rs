mod chat_model;
mod result_extractor;
mod task_transport;

pub use chat_model::*;
pub use result_extractor::*;
pub use task_transport::*;
