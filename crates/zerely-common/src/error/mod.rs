//! Application-wide error types

mod app_error;

pub use app_error::{AppError, ErrorResponse};
