//! HTTP route handlers. Each one extracts its input, runs a single service
//! call and always answers, either with the rows/outcome or a `ServiceError`.

pub mod common;
pub mod customers;
pub mod foods;
