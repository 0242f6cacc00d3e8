#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid cluster layout options: {message}")]
    InvalidOptions { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
