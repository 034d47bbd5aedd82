//! API đơn hàng: danh sách, chi tiết, lưu, xóa và gieo dữ liệu mẫu

use crate::shared::api_utils::api_base;
use contracts::domain::a002_order::aggregate::{Order, OrderDto};
use gloo_net::http::Request;
use serde_json::Value;

/// Danh sách đơn, lọc theo chuỗi tìm kiếm và trạng thái xử lý
pub async fn fetch_orders(search: &str, status: &str) -> Result<Vec<Order>, String> {
    let mut url = format!("{}/api/orders", api_base());
    let mut params: Vec<String> = Vec::new();
    if !search.trim().is_empty() {
        params.push(format!("search={}", urlencoding::encode(search.trim())));
    }
    if !status.is_empty() {
        params.push(format!("status={}", status));
    }
    if !params.is_empty() {
        url = format!("{}?{}", url, params.join("&"));
    }

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Fetch orders failed: {}", response.status()));
    }

    response
        .json::<Vec<Order>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Một đơn theo id
pub async fn fetch_order(id: &str) -> Result<Order, String> {
    let response = Request::get(&format!("{}/api/orders/{}", api_base(), id))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Fetch order failed: {}", response.status()));
    }

    response
        .json::<Order>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Lưu đơn (tạo mới hoặc cập nhật); trả về id bản ghi
pub async fn save_order(dto: &OrderDto) -> Result<String, String> {
    let response = Request::post(&format!("{}/api/orders", api_base()))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Save order failed: {}", response.status()));
    }

    let body = response
        .json::<Value>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(body
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string())
}

/// Xóa mềm một đơn
pub async fn delete_order(id: &str) -> Result<(), String> {
    let response = Request::delete(&format!("{}/api/orders/{}", api_base(), id))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Delete order failed: {}", response.status()));
    }

    Ok(())
}

/// Gieo dữ liệu mẫu: vài món trong thực đơn và hai đơn demo
pub async fn seed_test_data() -> Result<(), String> {
    let response = Request::post(&format!("{}/api/orders/testdata", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Seed test data failed: {}", response.status()));
    }

    Ok(())
}
