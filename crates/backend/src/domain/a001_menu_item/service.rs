use super::repository;
use contracts::domain::a001_menu_item::aggregate::{MenuItem, MenuItemDto};
use uuid::Uuid;

pub async fn create(dto: MenuItemDto) -> anyhow::Result<Uuid> {
    let mut aggregate = MenuItem::new_for_insert(
        dto.code.clone().unwrap_or_default(),
        dto.description.clone(),
        dto.category.clone().unwrap_or_default(),
        dto.price,
        dto.comment.clone(),
    );
    aggregate.available = dto.available;
    if aggregate.base.code.trim().is_empty() {
        // Mã tự sinh từ 8 ký tự đầu của id
        aggregate.base.code = format!("MON-{}", &aggregate.to_string_id()[..8]);
    }

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: MenuItemDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<MenuItem>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<MenuItem>> {
    repository::list_all().await
}

/// Giá hiện hành của món cho lookup từ form đơn hàng.
/// Món không tồn tại trả về 0, khớp hành vi endpoint cũ.
pub async fn get_price(id: Option<Uuid>) -> anyhow::Result<f64> {
    match id {
        Some(id) => Ok(repository::get_price(id).await?.unwrap_or(0.0)),
        None => Ok(0.0),
    }
}

pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        MenuItemDto {
            id: None,
            code: Some("MON-PHO-BO".into()),
            description: "Phở bò".into(),
            comment: None,
            category: Some("Món chính".into()),
            price: 45000.0,
            available: true,
        },
        MenuItemDto {
            id: None,
            code: Some("MON-COM-GA".into()),
            description: "Cơm gà".into(),
            comment: None,
            category: Some("Món chính".into()),
            price: 40000.0,
            available: true,
        },
        MenuItemDto {
            id: None,
            code: Some("MON-BANH-MI".into()),
            description: "Bánh mì thịt".into(),
            comment: Some("Bán mang đi là chính".into()),
            category: Some("Ăn nhẹ".into()),
            price: 25000.0,
            available: true,
        },
        MenuItemDto {
            id: None,
            code: Some("MON-GOI-CUON".into()),
            description: "Gỏi cuốn".into(),
            comment: None,
            category: Some("Ăn nhẹ".into()),
            price: 30000.0,
            available: true,
        },
        MenuItemDto {
            id: None,
            code: Some("MON-CAFE-SUA".into()),
            description: "Cà phê sữa đá".into(),
            comment: None,
            category: Some("Đồ uống".into()),
            price: 18000.0,
            available: true,
        },
        MenuItemDto {
            id: None,
            code: Some("MON-TRA-DA".into()),
            description: "Trà đá".into(),
            comment: None,
            category: Some("Đồ uống".into()),
            price: 5000.0,
            available: true,
        },
    ];

    let existing = repository::list_all().await?;
    for dto in data {
        let duplicated = existing
            .iter()
            .any(|m| Some(m.base.code.as_str()) == dto.code.as_deref());
        if !duplicated {
            create(dto).await?;
        }
    }
    Ok(())
}
