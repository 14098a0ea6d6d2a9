use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Extraction error: {0}")]
    Extraction(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
