use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub Uuid);

impl MenuItemId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for MenuItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(MenuItemId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Món trong thực đơn. `base.description` là tên món,
/// `price` là giá bán hiện hành dùng cho lookup khi lập đơn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(flatten)]
    pub base: BaseAggregate<MenuItemId>,

    #[serde(rename = "category", default)]
    pub category: String,

    #[serde(rename = "price", default)]
    pub price: f64,

    #[serde(rename = "available", default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    pub fn new_for_insert(
        code: String,
        description: String,
        category: String,
        price: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(MenuItemId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            category,
            price,
            available: true,
        }
    }

    pub fn new_with_id(
        id: MenuItemId,
        code: String,
        description: String,
        category: String,
        price: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(id, code, description);
        base.comment = comment;

        Self {
            base,
            category,
            price,
            available: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &MenuItemDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.clone().unwrap_or_default();
        self.price = dto.price;
        self.available = dto.available;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Tên món không được để trống".into());
        }
        if self.price < 0.0 {
            return Err("Giá món không được âm".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for MenuItem {
    type Id = MenuItemId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "menu_item"
    }

    fn element_name() -> &'static str {
        "Món"
    }

    fn list_name() -> &'static str {
        "Thực đơn"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}
