use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")] Validation(String),
    #[error("generation failed: {0}")] Llm(String),
    #[error("failed to publish to GitHub: {status} {body}")] Publish { status: u16, body: String },
    #[error("unexpected error: {0}")] Unexpected(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}
