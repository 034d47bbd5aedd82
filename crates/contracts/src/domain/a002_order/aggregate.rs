use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use super::reconcile;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
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

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Hình thức phục vụ của đơn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "dine_in")]
    DineIn,
    #[serde(rename = "takeaway")]
    Takeaway,
    #[serde(rename = "delivery")]
    Delivery,
}

impl OrderType {
    pub const ALL: [OrderType; 3] = [OrderType::DineIn, OrderType::Takeaway, OrderType::Delivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine_in",
            OrderType::Takeaway => "takeaway",
            OrderType::Delivery => "delivery",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderType::DineIn => "Ăn tại chỗ",
            OrderType::Takeaway => "Mang đi",
            OrderType::Delivery => "Giao hàng",
        }
    }

    pub fn parse(s: &str) -> Option<OrderType> {
        OrderType::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::DineIn
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trạng thái xử lý của đơn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "preparing")]
    Preparing,
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Chờ xác nhận",
            OrderStatus::Preparing => "Đang làm",
            OrderStatus::Ready => "Sẵn sàng",
            OrderStatus::Completed => "Hoàn tất",
            OrderStatus::Cancelled => "Hủy",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        OrderStatus::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trạng thái thanh toán của đơn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "unpaid")]
    Unpaid,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "paid")]
    Paid,
    #[serde(rename = "refunded")]
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Unpaid,
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Chưa thanh toán",
            PaymentStatus::Pending => "Chờ thanh toán",
            PaymentStatus::Paid => "Đã thanh toán",
            PaymentStatus::Refunded => "Hoàn tiền",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentStatus> {
        PaymentStatus::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phương thức thanh toán
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "card")]
    Card,
    #[serde(rename = "transfer")]
    Transfer,
    #[serde(rename = "ewallet")]
    EWallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::EWallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::EWallet => "ewallet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tiền mặt",
            PaymentMethod::Card => "Thẻ",
            PaymentMethod::Transfer => "Chuyển khoản",
            PaymentMethod::EWallet => "Ví điện tử",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentMethod> {
        PaymentMethod::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Table parts
// ============================================================================

/// Một dòng món trong đơn.
///
/// `name` và `unit_price` là snapshot tại thời điểm lưu đơn,
/// `total` luôn được tính lại từ đơn giá và số lượng.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemLine {
    #[serde(rename = "menuItemId")]
    pub menu_item_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "unitPrice", default)]
    pub unit_price: f64,

    #[serde(default = "default_quantity")]
    pub quantity: i32,

    #[serde(default)]
    pub total: f64,
}

fn default_quantity() -> i32 {
    1
}

/// Một dòng thanh toán của đơn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLine {
    #[serde(default)]
    pub method: PaymentMethod,

    #[serde(default)]
    pub amount: f64,

    #[serde(rename = "paidAt")]
    pub paid_at: chrono::DateTime<chrono::Utc>,

    #[serde(default)]
    pub note: String,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Đơn hàng. `base.code` là mã đơn, `base.comment` là ghi chú.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub base: BaseAggregate<OrderId>,

    #[serde(rename = "customerName", default)]
    pub customer_name: String,

    #[serde(rename = "customerPhone", default)]
    pub customer_phone: String,

    #[serde(rename = "orderType", default)]
    pub order_type: OrderType,

    #[serde(rename = "tableLabel")]
    pub table_label: Option<String>,

    #[serde(rename = "orderStatus", default)]
    pub order_status: OrderStatus,

    #[serde(rename = "paymentStatus", default)]
    pub payment_status: PaymentStatus,

    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(default)]
    pub items: Vec<OrderItemLine>,

    #[serde(default)]
    pub payments: Vec<PaymentLine>,
}

fn display_description(code: &str, customer_name: &str) -> String {
    if customer_name.trim().is_empty() {
        code.to_string()
    } else {
        format!("{} - {}", code, customer_name.trim())
    }
}

impl Order {
    pub fn new_for_insert(
        code: String,
        customer_name: String,
        customer_phone: String,
        order_type: OrderType,
        table_label: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let description = display_description(&code, &customer_name);
        let mut base = BaseAggregate::new(OrderId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            customer_name,
            customer_phone,
            order_type,
            table_label,
            order_status: OrderStatus::default(),
            payment_status: PaymentStatus::default(),
            completed_at: None,
            items: Vec::new(),
            payments: Vec::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Sinh mã đơn từ 8 ký tự đầu của id nếu form để trống
    pub fn ensure_code(&mut self) {
        if self.base.code.trim().is_empty() {
            self.base.code = format!("ORD-{}", &self.base.id.as_string()[..8]);
            self.base.description = display_description(&self.base.code, &self.customer_name);
        }
    }

    /// Áp DTO từ form vào aggregate.
    ///
    /// Các dòng món được thay cả loạt theo DTO; snapshot tên/đơn giá
    /// của dòng cũ có cùng món được giữ lại, phần còn lại do
    /// `normalize_lines` phân giải theo thực đơn hiện hành.
    pub fn update(&mut self, dto: &OrderDto) {
        if let Some(code) = &dto.code {
            if !code.trim().is_empty() {
                self.base.code = code.trim().to_string();
            }
        }
        self.customer_name = dto.customer_name.trim().to_string();
        self.customer_phone = dto.customer_phone.trim().to_string();
        self.order_type = dto.order_type;
        self.table_label = dto
            .table_label
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.order_status = dto.order_status;
        self.payment_status = dto.payment_status;
        self.base.comment = dto.comment.clone().filter(|c| !c.trim().is_empty());
        self.base.description = display_description(&self.base.code, &self.customer_name);

        // Hoàn tất lần đầu thì chốt thời điểm
        if self.order_status == OrderStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(chrono::Utc::now());
        }

        let old_items = std::mem::take(&mut self.items);
        self.items = dto
            .items
            .iter()
            .map(|line| {
                let snapshot = line.menu_item_id.as_ref().and_then(|id| {
                    old_items
                        .iter()
                        .find(|old| old.menu_item_id.as_deref() == Some(id.as_str()))
                });
                OrderItemLine {
                    menu_item_id: line.menu_item_id.clone(),
                    name: snapshot.map(|s| s.name.clone()).unwrap_or_default(),
                    unit_price: snapshot.map(|s| s.unit_price).unwrap_or(0.0),
                    quantity: line.quantity,
                    total: 0.0,
                }
            })
            .collect();

        let now = chrono::Utc::now();
        let old_payments = std::mem::take(&mut self.payments);
        self.payments = dto
            .payments
            .iter()
            .enumerate()
            .map(|(ix, line)| PaymentLine {
                method: line.method,
                amount: line.amount,
                paid_at: old_payments.get(ix).map(|p| p.paid_at).unwrap_or(now),
                note: line.note.trim().to_string(),
            })
            .collect();
    }

    /// Phân giải snapshot các dòng món theo thực đơn hiện hành.
    ///
    /// `resolve` nhận id món và trả về `(tên, giá hiện hành)`.
    /// Món còn trong thực đơn: lấy giá hiện hành (tên chỉ điền khi
    /// snapshot trống). Món đã xóa: giữ snapshot cũ. `total` của mọi
    /// dòng luôn tính lại từ đơn giá × số lượng.
    pub fn normalize_lines<F>(&mut self, resolve: F)
    where
        F: Fn(&str) -> Option<(String, f64)>,
    {
        for line in &mut self.items {
            if let Some(menu_id) = line.menu_item_id.as_deref() {
                if let Some((name, price)) = resolve(menu_id) {
                    if line.name.trim().is_empty() {
                        line.name = name;
                    }
                    line.unit_price = price;
                }
            }
            line.total = reconcile::line_total(line.unit_price, line.quantity);
        }
    }

    /// Tổng tiền các dòng món
    pub fn subtotal(&self) -> f64 {
        reconcile::round_money(self.items.iter().map(|l| l.total).sum())
    }

    /// Tổng đã thanh toán
    pub fn payments_total(&self) -> f64 {
        reconcile::round_money(self.payments.iter().map(|p| p.amount).sum())
    }

    /// Điền phần còn thiếu vào dòng thanh toán trống/bằng 0 đầu tiên.
    ///
    /// Trả về chỉ số dòng đã điền, `None` nếu không có dòng trống.
    /// Dòng có số tiền khác 0 không bao giờ bị ghi đè.
    pub fn fill_first_empty_payment(&mut self) -> Option<usize> {
        let mut amounts: Vec<f64> = self.payments.iter().map(|p| p.amount).collect();
        let filled = reconcile::fill_remaining(self.subtotal(), &mut amounts)?;
        self.payments[filled].amount = amounts[filled];
        Some(filled)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Mã đơn hàng không được để trống".into());
        }
        for line in &self.items {
            if line.quantity < 0 {
                return Err("Số lượng không được âm".into());
            }
        }
        for payment in &self.payments {
            if payment.amount < 0.0 {
                return Err("Số tiền thanh toán không được âm".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn element_name() -> &'static str {
        "Đơn hàng"
    }

    fn list_name() -> &'static str {
        "Đơn hàng"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Option<String>,

    /// Mã đơn; để trống thì backend tự sinh
    pub code: Option<String>,

    #[serde(rename = "customerName", default)]
    pub customer_name: String,

    #[serde(rename = "customerPhone", default)]
    pub customer_phone: String,

    #[serde(rename = "orderType", default)]
    pub order_type: OrderType,

    #[serde(rename = "tableLabel")]
    pub table_label: Option<String>,

    #[serde(rename = "orderStatus", default)]
    pub order_status: OrderStatus,

    #[serde(rename = "paymentStatus", default)]
    pub payment_status: PaymentStatus,

    pub comment: Option<String>,

    #[serde(default)]
    pub items: Vec<OrderItemLineDto>,

    #[serde(default)]
    pub payments: Vec<PaymentLineDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemLineDto {
    #[serde(rename = "menuItemId")]
    pub menu_item_id: Option<String>,

    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLineDto {
    #[serde(default)]
    pub method: PaymentMethod,

    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto_with_lines(items: Vec<OrderItemLineDto>, payments: Vec<PaymentLineDto>) -> OrderDto {
        OrderDto {
            id: None,
            code: Some("ORD-0001".into()),
            customer_name: "Anh Tuấn".into(),
            customer_phone: String::new(),
            order_type: OrderType::DineIn,
            table_label: None,
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            comment: None,
            items,
            payments,
        }
    }

    fn menu(resolve_id: &str) -> Option<(String, f64)> {
        match resolve_id {
            "m-pho" => Some(("Phở bò".to_string(), 45000.0)),
            "m-tra" => Some(("Trà đá".to_string(), 5000.0)),
            _ => None,
        }
    }

    #[test]
    fn test_normalize_lines_resolves_current_price() {
        let mut order = Order::new_for_insert(
            "ORD-0001".into(),
            String::new(),
            String::new(),
            OrderType::DineIn,
            None,
            None,
        );
        order.items.push(OrderItemLine {
            menu_item_id: Some("m-pho".into()),
            name: String::new(),
            unit_price: 0.0,
            quantity: 2,
            total: 0.0,
        });
        order.normalize_lines(menu);

        assert_eq!(order.items[0].name, "Phở bò");
        assert_eq!(order.items[0].unit_price, 45000.0);
        assert_eq!(order.items[0].total, 90000.0);
        assert_eq!(order.subtotal(), 90000.0);
    }

    #[test]
    fn test_normalize_lines_keeps_snapshot_for_removed_item() {
        let mut order = Order::new_for_insert(
            "ORD-0001".into(),
            String::new(),
            String::new(),
            OrderType::DineIn,
            None,
            None,
        );
        order.items.push(OrderItemLine {
            menu_item_id: Some("m-goi-cu".into()),
            name: "Gỏi cuốn".into(),
            unit_price: 30000.0,
            quantity: 3,
            total: 0.0,
        });
        order.normalize_lines(menu);

        // món không còn trong thực đơn: giữ snapshot, vẫn tính lại total
        assert_eq!(order.items[0].name, "Gỏi cuốn");
        assert_eq!(order.items[0].unit_price, 30000.0);
        assert_eq!(order.items[0].total, 90000.0);
    }

    #[test]
    fn test_update_carries_snapshot_by_menu_item() {
        let mut order = Order::new_for_insert(
            "ORD-0001".into(),
            String::new(),
            String::new(),
            OrderType::DineIn,
            None,
            None,
        );
        order.items.push(OrderItemLine {
            menu_item_id: Some("m-goi-cu".into()),
            name: "Gỏi cuốn".into(),
            unit_price: 30000.0,
            quantity: 1,
            total: 30000.0,
        });

        let dto = dto_with_lines(
            vec![
                OrderItemLineDto {
                    menu_item_id: Some("m-goi-cu".into()),
                    quantity: 4,
                },
                OrderItemLineDto {
                    menu_item_id: Some("m-pho".into()),
                    quantity: 1,
                },
            ],
            vec![],
        );
        order.update(&dto);
        order.normalize_lines(menu);

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].name, "Gỏi cuốn");
        assert_eq!(order.items[0].total, 120000.0);
        assert_eq!(order.items[1].name, "Phở bò");
    }

    #[test]
    fn test_fill_first_empty_payment() {
        let mut order = Order::new_for_insert(
            "ORD-0001".into(),
            String::new(),
            String::new(),
            OrderType::DineIn,
            None,
            None,
        );
        order.items.push(OrderItemLine {
            menu_item_id: Some("m-pho".into()),
            name: "Phở bò".into(),
            unit_price: 30.0,
            quantity: 1,
            total: 30.0,
        });
        order.items.push(OrderItemLine {
            menu_item_id: Some("m-tra".into()),
            name: "Trà đá".into(),
            unit_price: 20.0,
            quantity: 1,
            total: 20.0,
        });
        let now = chrono::Utc::now();
        order.payments.push(PaymentLine {
            method: PaymentMethod::Cash,
            amount: 10.0,
            paid_at: now,
            note: String::new(),
        });
        order.payments.push(PaymentLine {
            method: PaymentMethod::Card,
            amount: 0.0,
            paid_at: now,
            note: String::new(),
        });

        assert_eq!(order.fill_first_empty_payment(), Some(1));
        assert_eq!(order.payments[1].amount, 40.0);
        assert_eq!(order.payments_total(), order.subtotal());

        // lần hai không còn dòng trống, không ghi đè gì
        assert_eq!(order.fill_first_empty_payment(), None);
        assert_eq!(order.payments[1].amount, 40.0);
    }

    #[test]
    fn test_completed_at_set_once() {
        let mut order = Order::new_for_insert(
            "ORD-0001".into(),
            String::new(),
            String::new(),
            OrderType::DineIn,
            None,
            None,
        );
        let mut dto = dto_with_lines(vec![], vec![]);
        dto.order_status = OrderStatus::Completed;
        order.update(&dto);
        let first = order.completed_at;
        assert!(first.is_some());

        order.update(&dto);
        assert_eq!(order.completed_at, first);
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let mut order = Order::new_for_insert(
            "ORD-0001".into(),
            String::new(),
            String::new(),
            OrderType::DineIn,
            None,
            None,
        );
        order.payments.push(PaymentLine {
            method: PaymentMethod::Cash,
            amount: -5.0,
            paid_at: chrono::Utc::now(),
            note: String::new(),
        });
        assert!(order.validate().is_err());
    }
}
