/// The Result type for tile48.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("malformed store: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("unknown direction {0:?}")]
    UnknownDirection(String),

    #[error("unknown difficulty {0:?}, expected one of easy, medium, hard, very-hard")]
    UnknownDifficulty(String),

    #[error("terminal too small, required minimum size {0} x {1}")]
    TerminalTooSmall(u16, u16),
}
