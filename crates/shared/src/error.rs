use thiserror::Error;

use crate::domain::{MAX_TIER, MIN_TIER};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfRange { row: i64, col: i64, size: usize },
    #[error("intensity {value} is outside [{min}, {max}]", min = MIN_TIER, max = MAX_TIER)]
    InvalidValue { value: i64 },
}

pub type GridResult<T> = Result<T, GridError>;
