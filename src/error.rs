use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Table already exists: {0}")]
    DuplicateTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
