use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SavingsError {
    #[error("annual interest rate must not be negative, got {0}")]
    NegativeRate(Decimal),
}

pub type Result<T> = std::result::Result<T, SavingsError>;
