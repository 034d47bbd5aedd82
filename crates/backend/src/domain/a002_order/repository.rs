use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_order::aggregate::{
    Order, OrderId, OrderItemLine, OrderStatus, OrderType, PaymentLine, PaymentStatus,
};
use contracts::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: String,
    pub table_label: Option<String>,
    pub order_status: String,
    pub payment_status: String,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub items_json: String,
    pub payments_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let items: Vec<OrderItemLine> = serde_json::from_str(&m.items_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize items_json for order: {}", m.code));
        let payments: Vec<PaymentLine> = serde_json::from_str(&m.payments_json)
            .unwrap_or_else(|_| {
                panic!("Failed to deserialize payments_json for order: {}", m.code)
            });

        Order {
            base: BaseAggregate::with_metadata(
                OrderId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            customer_name: m.customer_name,
            customer_phone: m.customer_phone,
            order_type: OrderType::parse(&m.order_type).unwrap_or_default(),
            table_label: m.table_label,
            order_status: OrderStatus::parse(&m.order_status).unwrap_or_default(),
            payment_status: PaymentStatus::parse(&m.payment_status).unwrap_or_default(),
            completed_at: m.completed_at,
            items,
            payments,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Danh sách đơn, mới nhất trước. `search` lọc theo mã đơn, tên khách
/// hoặc SĐT; `status` lọc theo trạng thái đơn.
pub async fn find(search: Option<&str>, status: Option<OrderStatus>) -> Result<Vec<Order>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt);

    if let Some(status) = status {
        query = query.filter(Column::OrderStatus.eq(status.as_str()));
    }

    let mut orders: Vec<Order> = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    // Lọc chuỗi ở phía ứng dụng để so khớp không phân biệt hoa thường
    if let Some(needle) = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) {
        orders.retain(|o| {
            o.base.code.to_lowercase().contains(&needle)
                || o.customer_name.to_lowercase().contains(&needle)
                || o.customer_phone.to_lowercase().contains(&needle)
        });
    }

    Ok(orders)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Order>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Order) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let items_json = serde_json::to_string(&aggregate.items)?;
    let payments_json = serde_json::to_string(&aggregate.payments)?;
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        customer_name: Set(aggregate.customer_name.clone()),
        customer_phone: Set(aggregate.customer_phone.clone()),
        order_type: Set(aggregate.order_type.as_str().to_string()),
        table_label: Set(aggregate.table_label.clone()),
        order_status: Set(aggregate.order_status.as_str().to_string()),
        payment_status: Set(aggregate.payment_status.as_str().to_string()),
        completed_at: Set(aggregate.completed_at),
        items_json: Set(items_json),
        payments_json: Set(payments_json),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Order) -> Result<()> {
    let id = aggregate.base.id.as_string();
    let items_json = serde_json::to_string(&aggregate.items)?;
    let payments_json = serde_json::to_string(&aggregate.payments)?;
    let active = ActiveModel {
        id: Set(id),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        customer_name: Set(aggregate.customer_name.clone()),
        customer_phone: Set(aggregate.customer_phone.clone()),
        order_type: Set(aggregate.order_type.as_str().to_string()),
        table_label: Set(aggregate.table_label.clone()),
        order_status: Set(aggregate.order_status.as_str().to_string()),
        payment_status: Set(aggregate.payment_status.as_str().to_string()),
        completed_at: Set(aggregate.completed_at),
        items_json: Set(items_json),
        payments_json: Set(payments_json),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
