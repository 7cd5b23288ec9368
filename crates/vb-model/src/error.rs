use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("module id must not be empty")]
    EmptyModuleId,
    #[error("duplicate module id in registry: {0}")]
    DuplicateModule(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
