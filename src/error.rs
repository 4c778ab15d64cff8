use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error processing io: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: invalid file extension (expected .h or .cpp)", .0.display())]
    Extension(PathBuf),
    #[error("Unterminated comment at end of input (opened on line {0})")]
    UnterminatedComment(usize),
    #[error("Unterminated string literal at end of input (opened on line {0})")]
    UnterminatedString(usize),
    #[error("Premature end of input while parsing #define")]
    PrematureEof,
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait GetExitCode {
    fn get_exit_code(&self) -> i32;
}

impl<T> GetExitCode for Result<T> {
    fn get_exit_code(&self) -> i32 {
        match self {
            Ok(_) => 0,
            Err(_) => 1,
        }
    }
}
