//! 产品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use super::model::{NewProduct, PriceQuery, Product};
use crate::app::AppState;
use crate::core::{error::CoreError, response::ApiResponse};

pub async fn list_products(State(state): State<AppState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::success(state.catalog.list()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    match state.catalog.find_by_id(&id)? {
        Some(product) => Ok(Json(ApiResponse::success(product))),
        None => Err(CoreError::NotFound(format!("产品 {} 不存在", id))),
    }
}

pub async fn search_products(
    State(state): State<AppState>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let Query(query) = query?;
    let products = state.catalog.search_by_price(query.price.as_deref())?;
    Ok(Json(ApiResponse::success(products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), CoreError> {
    let Json(candidate) = payload?;
    let product = state.catalog.create(candidate)?;
    Ok(ApiResponse::created(product))
}
