#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid date format pattern: {0:?}")]
    InvalidDateFormat(String),
}

pub type DeskResult<T> = std::result::Result<T, DeskError>;
