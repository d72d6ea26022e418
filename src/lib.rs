pub mod deposit;
pub mod error;
pub mod report;
pub mod savings;
