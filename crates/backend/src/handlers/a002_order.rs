use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{a001_menu_item, a002_order};
use contracts::domain::a002_order::aggregate::OrderStatus;

#[derive(Deserialize)]
pub struct OrdersQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct MenuPriceQuery {
    pub id: Option<String>,
}

/// GET /api/orders
pub async fn list_all(
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<contracts::domain::a002_order::aggregate::Order>>, axum::http::StatusCode> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => match OrderStatus::parse(s) {
            Some(status) => Some(status),
            None => return Err(axum::http::StatusCode::BAD_REQUEST),
        },
        None => None,
    };
    match a002_order::service::list(query.search.as_deref(), status).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list orders: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/orders/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a002_order::aggregate::Order>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_order::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/orders
pub async fn upsert(
    Json(dto): Json<contracts::domain::a002_order::aggregate::OrderDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a002_order::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a002_order::service::create(dto).await.map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            tracing::error!("Failed to save order: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/orders/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_order::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/order/menu-price?id=<uuid>
///
/// Form đơn hàng gọi endpoint này mỗi khi đổi món hoặc số lượng.
/// Giá trả về dạng chuỗi; thiếu id hoặc món không tồn tại thì trả "0.00"
/// chứ không báo lỗi, form sẽ tự coi là 0.
pub async fn menu_price(
    Query(query): Query<MenuPriceQuery>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = query
        .id
        .as_deref()
        .and_then(|s| uuid::Uuid::parse_str(s).ok());
    match a001_menu_item::service::get_price(id).await {
        Ok(price) => Ok(Json(json!({"price": format!("{:.2}", price)}))),
        Err(e) => {
            tracing::error!("Failed to get menu price: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/orders/testdata
pub async fn insert_test_data() -> axum::http::StatusCode {
    match a002_order::service::insert_test_data().await {
        Ok(_) => axum::http::StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to insert test orders: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
