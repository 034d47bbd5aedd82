//! API thực đơn: danh sách món và tra giá theo id

use crate::shared::api_utils::api_base;
use contracts::domain::a001_menu_item::aggregate::MenuItem;
use gloo_net::http::Request;
use serde_json::Value;

/// Danh sách món cho hộp chọn trên form đơn
pub async fn fetch_menu_items() -> Result<Vec<MenuItem>, String> {
    let response = Request::get(&format!("{}/api/menu-items", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Fetch menu items failed: {}", response.status()));
    }

    response
        .json::<Vec<MenuItem>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Giá hiện hành của một món.
///
/// Server trả `{"price": "45000.00"}`; giá dạng chuỗi là chính tắc,
/// dạng số cũng được chấp nhận. Thân JSON thiếu trường coi là giá 0.
pub async fn fetch_menu_price(menu_item_id: &str) -> Result<f64, String> {
    let response = Request::get(&format!(
        "{}/api/order/menu-price?id={}",
        api_base(),
        menu_item_id
    ))
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Price lookup failed: {}", response.status()));
    }

    let body = response
        .json::<Value>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    let price = match body.get("price") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(price)
}
