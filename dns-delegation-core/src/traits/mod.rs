//! Storage layer abstraction trait definition

mod config_store;
mod credential_resolver;
mod environment_store;
mod resume_token_store;

pub use config_store::ConfigStore;
pub use credential_resolver::CredentialResolver;
pub use environment_store::EnvironmentStore;
pub use resume_token_store::ResumeTokenStore;
