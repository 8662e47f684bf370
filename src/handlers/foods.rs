use super::common::JsonOrForm;
use crate::db::WriteOutcome;
use crate::errors::ServiceError;
use crate::models::{Food, FoodNameUpdate, FoodUnitUpdate, NewFood};
use crate::services::foods as food_service;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{delete, get, patch},
    Json, Router,
};
use sea_orm::JsonValue;

/// List every food item
#[utoipa::path(
    get,
    path = "/food",
    responses(
        (status = 200, description = "All rows of the foods table", body = [Food]),
        (status = 500, description = "Query failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "food"
)]
pub async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonValue>>, ServiceError> {
    let rows = food_service::list_foods(&state.db).await?;
    Ok(Json(rows))
}

/// Add a food item
#[utoipa::path(
    post,
    path = "/food",
    request_body(
        content(
            (NewFood = "application/json"),
            (NewFood = "application/x-www-form-urlencoded")
        ),
        description = "Food item to insert"
    ),
    responses(
        (status = 200, description = "Item inserted", body = WriteOutcome),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorResponse),
        (status = 409, description = "ITEM_ID already exists", body = crate::errors::ErrorResponse),
        (status = 415, description = "Body is neither JSON nor a form", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 500, description = "Insert failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "food"
)]
pub async fn create_food(
    State(state): State<AppState>,
    JsonOrForm(food): JsonOrForm<NewFood>,
) -> Result<Json<WriteOutcome>, ServiceError> {
    let outcome = food_service::insert_food(&state.db, food).await?;
    Ok(Json(outcome))
}

/// Rename a food item
#[utoipa::path(
    put,
    path = "/food",
    request_body(
        content(
            (FoodNameUpdate = "application/json"),
            (FoodNameUpdate = "application/x-www-form-urlencoded")
        ),
        description = "New ITEM_NAME for the item with ITEM_ID"
    ),
    responses(
        (status = 200, description = "Update applied; affectedRows is 0 for an unknown id", body = WriteOutcome),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorResponse),
        (status = 415, description = "Body is neither JSON nor a form", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 500, description = "Update failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "food"
)]
pub async fn rename_food(
    State(state): State<AppState>,
    JsonOrForm(update): JsonOrForm<FoodNameUpdate>,
) -> Result<Json<WriteOutcome>, ServiceError> {
    let outcome = food_service::rename_food(&state.db, update).await?;
    Ok(Json(outcome))
}

/// Change the unit of a food item
#[utoipa::path(
    patch,
    path = "/foods",
    request_body(
        content(
            (FoodUnitUpdate = "application/json"),
            (FoodUnitUpdate = "application/x-www-form-urlencoded")
        ),
        description = "New ITEM_UNIT for the item with ITEM_ID"
    ),
    responses(
        (status = 200, description = "Update applied; affectedRows is 0 for an unknown id", body = WriteOutcome),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorResponse),
        (status = 415, description = "Body is neither JSON nor a form", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::errors::ErrorResponse),
        (status = 500, description = "Update failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "food"
)]
pub async fn change_food_unit(
    State(state): State<AppState>,
    JsonOrForm(update): JsonOrForm<FoodUnitUpdate>,
) -> Result<Json<WriteOutcome>, ServiceError> {
    let outcome = food_service::change_food_unit(&state.db, update).await?;
    Ok(Json(outcome))
}

/// Delete a food item
#[utoipa::path(
    delete,
    path = "/foods/{id}",
    params(
        ("id" = String, Path, description = "ITEM_ID of the item to delete", example = "9")
    ),
    responses(
        (status = 200, description = "Delete applied; affectedRows is 0 for an unknown id", body = WriteOutcome),
        (status = 400, description = "Id is not valid UTF-8 once decoded", body = crate::errors::ErrorResponse),
        (status = 500, description = "Delete failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Database unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "food"
)]
pub async fn delete_food(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<WriteOutcome>, ServiceError> {
    let Path(id) = id?;
    let outcome = food_service::delete_food(&state.db, &id).await?;
    Ok(Json(outcome))
}

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/food", get(list_foods).post(create_food).put(rename_food))
        .route("/foods", patch(change_food_unit))
        .route("/foods/:id", delete(delete_food))
}
