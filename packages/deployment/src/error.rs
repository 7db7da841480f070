use thiserror::Error;

/// Failures while building or reading a deployment module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeploymentError {
    /// The same key was declared twice within one module.
    #[error("module `{module}` declares contract `{key}` more than once")]
    DuplicateContract { module: &'static str, key: String },
    /// No contract was declared under the requested key.
    #[error("module `{module}` has no contract keyed `{key}`")]
    UnknownContract { module: &'static str, key: String },
}
