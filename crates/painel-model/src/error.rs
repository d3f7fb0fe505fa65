use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown patient category: {value}")]
    UnknownCategory { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
