//! One parameterized statement per operation.
//!
//! Statements are built with sea-query against the pool's backend so the
//! placeholder syntax always matches the driver; caller input only ever
//! reaches the database as a bound value.

pub mod customers;
pub mod foods;

use crate::errors::ServiceError;
use sea_orm::sea_query::error::Error as QueryBuildError;

fn build_error(err: QueryBuildError) -> ServiceError {
    ServiceError::InternalError(format!("failed to build statement: {}", err))
}
