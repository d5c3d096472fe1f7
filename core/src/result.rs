use crate::error::QuantityError;

pub type QResult<T> = Result<T, QuantityError>;
