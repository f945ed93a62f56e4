pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    ChatModel, GenerateCompletionUseCase, ResultExtractor, TaskTransport, TransportResponse,
};

pub use connector::{
    build_chat_model, AppConfig, ConfigOverrides, Container, HttpTaskTransport,
    JsonPointerExtractor, OpenRouterClient, RawResultExtractor, Router, SignedTaskClient,
    WiroChatModel,
};

pub use domain::{
    flatten_messages, sign, split_reasoning, AuthHeaders, ChatCompletion, ChatMessage,
    Credentials, DomainError, FailurePolicy, GenerationRequest, ProviderConfig, ProviderKind,
    RequestSigner, Role, SamplingOverrides, SamplingParameters, TaskPhase, TaskResult,
    TaskSnapshot, TaskStatus, TaskSubmission, UnknownStatusPolicy, WiroSettings,
};
