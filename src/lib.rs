pub mod application;
pub mod connector;
pub mod domain;

pub use application::{AnalyzeOpinionUseCase, CompletionClient, RetryPolicy};

pub use connector::{
    AnthropicClient, CannedClient, HttpInvoker, OpenAiChatClient, DEFAULT_TIMEOUT,
};

pub use domain::{
    Analysis, AnalysisRequest, AnalysisResult, ApiFlavor, CatalogError, Credential, Diagnosis,
    ErrorClassifier, ErrorKind, InvokeError, ModelSpec, Prompt, PromptBuilder, PromptError,
    ProviderCatalog, ProviderConfig, ProviderId,
};
