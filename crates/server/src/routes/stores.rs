//! Store registry.
//!
//! Reads are open to any authenticated role; writes are admin only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use fieldops_core::StoreId;

use crate::db::{StoreRepository, stores::StoreFields};
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::Store;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route("/chain/{chain}", get(list_chain))
        .route(
            "/{id}",
            get(get_store).put(update_store).delete(delete_store),
        )
}

/// `GET /api/stores` - list all stores.
async fn list_stores(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Store>>>, AppError> {
    let stores = StoreRepository::new(state.pool()).list_all().await?;
    Ok(Json(ApiResponse::list(stores)))
}

/// `GET /api/stores/chain/{chain}` - list the stores of one retail chain.
async fn list_chain(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(chain): Path<String>,
) -> Result<Json<ApiResponse<Vec<Store>>>, AppError> {
    let stores = StoreRepository::new(state.pool())
        .list_by_chain(&chain)
        .await?;

    Ok(Json(ApiResponse::list(stores)))
}

/// `GET /api/stores/{id}` - fetch one store.
async fn get_store(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<StoreId>,
) -> Result<Json<ApiResponse<Store>>, AppError> {
    let store = StoreRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("store not found".to_owned()))?;

    Ok(Json(ApiResponse::data(store)))
}

/// `POST /api/stores` - create a store.
async fn create_store(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(fields): Json<StoreFields>,
) -> Result<(StatusCode, Json<ApiResponse<Store>>), AppError> {
    validate_fields(&fields)?;

    let store = StoreRepository::new(state.pool()).create(&fields).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(store))))
}

/// `PUT /api/stores/{id}` - replace a store's fields.
async fn update_store(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<StoreId>,
    Json(fields): Json<StoreFields>,
) -> Result<Json<ApiResponse<Store>>, AppError> {
    validate_fields(&fields)?;

    let store = StoreRepository::new(state.pool()).update(id, &fields).await?;

    Ok(Json(ApiResponse::data(store)))
}

/// `DELETE /api/stores/{id}` - delete a store.
///
/// Any assignments referencing the store are removed by the cascading
/// foreign key on `campaign_store`.
async fn delete_store(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<StoreId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    StoreRepository::new(state.pool()).delete(id).await?;
    Ok(Json(ApiResponse::message("store deleted")))
}

fn validate_fields(fields: &StoreFields) -> Result<(), AppError> {
    if fields.board_name.trim().is_empty() || fields.store_code.trim().is_empty() {
        return Err(AppError::BadRequest(
            "board_name and store_code are required".to_owned(),
        ));
    }
    Ok(())
}
