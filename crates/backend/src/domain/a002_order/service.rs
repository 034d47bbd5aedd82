use super::repository;
use crate::domain::a001_menu_item;
use crate::shared::format::format_money;
use contracts::domain::a002_order::aggregate::{
    Order, OrderDto, OrderItemLineDto, OrderStatus, OrderType, PaymentLineDto,
};
use contracts::domain::common::AggregateRoot;
use std::collections::HashMap;
use uuid::Uuid;

/// Tên và giá hiện hành của các món được tham chiếu trong đơn
async fn menu_snapshot(order: &Order) -> anyhow::Result<HashMap<String, (String, f64)>> {
    let mut resolved: HashMap<String, (String, f64)> = HashMap::new();
    for line in &order.items {
        let Some(menu_id) = line.menu_item_id.as_deref() else {
            continue;
        };
        if resolved.contains_key(menu_id) {
            continue;
        }
        if let Ok(uuid) = Uuid::parse_str(menu_id) {
            if let Some(menu_item) = a001_menu_item::repository::get_by_id(uuid).await? {
                resolved.insert(
                    menu_id.to_string(),
                    (menu_item.base.description.clone(), menu_item.price),
                );
            }
        }
    }
    Ok(resolved)
}

/// Chốt số liệu trước khi lưu: phân giải snapshot dòng món theo thực
/// đơn hiện hành rồi điền phần còn thiếu vào dòng thanh toán trống
/// đầu tiên. Đây chính là phép tính mà form chạy trên trình duyệt,
/// lưu qua API thẳng cũng cho cùng kết quả.
async fn settle(aggregate: &mut Order) -> anyhow::Result<()> {
    let menu = menu_snapshot(aggregate).await?;
    aggregate.normalize_lines(|id| menu.get(id).cloned());

    if let Some(ix) = aggregate.fill_first_empty_payment() {
        tracing::info!(
            "Đơn {}: tự điền {} vào dòng thanh toán {}",
            aggregate.base.code,
            format_money(aggregate.payments[ix].amount),
            ix + 1
        );
    }
    Ok(())
}

pub async fn create(dto: OrderDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Order::new_for_insert(
        dto.code.clone().unwrap_or_default(),
        dto.customer_name.clone(),
        dto.customer_phone.clone(),
        dto.order_type,
        dto.table_label.clone(),
        dto.comment.clone(),
    );
    aggregate.update(&dto);
    aggregate.ensure_code();

    settle(&mut aggregate).await?;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: OrderDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);
    aggregate.ensure_code();

    settle(&mut aggregate).await?;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.metadata_mut().increment_version();
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Order>> {
    repository::get_by_id(id).await
}

pub async fn list(search: Option<&str>, status: Option<OrderStatus>) -> anyhow::Result<Vec<Order>> {
    repository::find(search, status).await
}

pub async fn insert_test_data() -> anyhow::Result<()> {
    // Đơn mẫu cần thực đơn mẫu trước
    a001_menu_item::service::insert_test_data().await?;

    if !repository::find(None, None).await?.is_empty() {
        return Ok(());
    }

    let menu = a001_menu_item::repository::list_all().await?;
    let find_id = |code: &str| {
        menu.iter()
            .find(|m| m.base.code == code)
            .map(|m| m.to_string_id())
    };
    let (Some(pho), Some(tra), Some(banh_mi)) = (
        find_id("MON-PHO-BO"),
        find_id("MON-TRA-DA"),
        find_id("MON-BANH-MI"),
    ) else {
        return Ok(());
    };

    // Đơn ăn tại chỗ, một dòng thanh toán trống để hệ thống tự điền
    let dine_in = OrderDto {
        id: None,
        code: None,
        customer_name: "Anh Tuấn".into(),
        customer_phone: "0903123456".into(),
        order_type: OrderType::DineIn,
        table_label: Some("Bàn 3".into()),
        order_status: OrderStatus::Completed,
        payment_status: contracts::domain::a002_order::PaymentStatus::Paid,
        comment: Some("Ít hành".into()),
        items: vec![
            OrderItemLineDto {
                menu_item_id: Some(pho),
                quantity: 2,
            },
            OrderItemLineDto {
                menu_item_id: Some(tra),
                quantity: 2,
            },
        ],
        payments: vec![PaymentLineDto {
            method: contracts::domain::a002_order::PaymentMethod::Cash,
            amount: 0.0,
            note: String::new(),
        }],
    };
    create(dine_in).await?;

    let takeaway = OrderDto {
        id: None,
        code: None,
        customer_name: "Chị Hoa".into(),
        customer_phone: String::new(),
        order_type: OrderType::Takeaway,
        table_label: None,
        order_status: OrderStatus::Pending,
        payment_status: contracts::domain::a002_order::PaymentStatus::Unpaid,
        comment: None,
        items: vec![OrderItemLineDto {
            menu_item_id: Some(banh_mi),
            quantity: 3,
        }],
        payments: vec![],
    };
    create(takeaway).await?;

    tracing::info!("Inserted test orders for {}", Order::list_name());
    Ok(())
}
