use painel_transform::NormalizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no rosters have been uploaded")]
    NothingStaged,
    #[error("uploaded rosters have not been confirmed")]
    NotConfirmed,
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
