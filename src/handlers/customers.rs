use crate::errors::ServiceError;
use crate::models::{Customer, SortDirection};
use crate::services::customers as customer_service;
use crate::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use sea_orm::JsonValue;
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerSortParams {
    /// Order by OUTSTANDING_AMT, `ASC` or `DESC`
    #[param(required = true, value_type = SortDirection, example = "DESC")]
    pub amnt_sort: Option<String>,
}

impl CustomerSortParams {
    /// Parses `amnt_sort` against the allowed directions.
    pub fn direction(&self) -> Result<SortDirection, ServiceError> {
        let raw = self.amnt_sort.as_deref().ok_or_else(|| {
            ServiceError::InvalidInput("amnt_sort query parameter is required".to_string())
        })?;
        SortDirection::from_str(raw).map_err(|_| {
            ServiceError::InvalidInput(format!(
                "amnt_sort must be one of {}",
                SortDirection::ALLOWED.join(", ")
            ))
        })
    }
}

/// List every customer
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "All rows of the customer table", body = [Customer]),
        (status = 500, description = "Query failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "customer"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonValue>>, ServiceError> {
    let rows = customer_service::list_customers(&state.db).await?;
    Ok(Json(rows))
}

/// Look up a customer by code
#[utoipa::path(
    get,
    path = "/customer/{id}",
    params(
        ("id" = String, Path, description = "CUST_CODE of the customer", example = "C00013")
    ),
    responses(
        (status = 200, description = "Matching rows, empty when the code is unknown", body = [Customer]),
        (status = 400, description = "Code is not valid UTF-8 once decoded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Query failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "customer"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<JsonValue>>, ServiceError> {
    let Path(code) = code?;
    let rows = customer_service::get_customer(&state.db, &code).await?;
    Ok(Json(rows))
}

/// List customers sorted by outstanding amount
#[utoipa::path(
    get,
    path = "/customer",
    params(CustomerSortParams),
    responses(
        (status = 200, description = "Customers ordered by OUTSTANDING_AMT", body = [Customer]),
        (status = 400, description = "amnt_sort missing or not ASC/DESC", body = crate::errors::ErrorResponse),
        (status = 500, description = "Query failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "customer"
)]
pub async fn sorted_customers(
    State(state): State<AppState>,
    params: Result<Query<CustomerSortParams>, QueryRejection>,
) -> Result<Json<Vec<JsonValue>>, ServiceError> {
    let Query(params) = params?;
    let direction = params.direction()?;
    let rows = customer_service::list_customers_by_outstanding(&state.db, direction).await?;
    Ok(Json(rows))
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customer", get(sorted_customers))
        .route("/customer/:id", get(get_customer))
}
