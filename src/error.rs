use thiserror::Error;

pub type Result<T> = std::result::Result<T, EqualizeError>;

#[derive(Error, Debug)]
pub enum EqualizeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // pass through for errors raised by ndarray
    #[error("shape error {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub fn invalid_argument(msg: impl ToString) -> EqualizeError {
    EqualizeError::InvalidArgument(msg.to_string())
}
