pub mod calendar;
pub mod error;
pub mod export;
pub mod health;

pub use error::AppError;
