use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeatError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

pub type HeatResult<T> = Result<T, HeatError>;
