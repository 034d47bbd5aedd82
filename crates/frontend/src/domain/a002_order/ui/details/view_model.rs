//! ViewModel của form đơn hàng.
//!
//! Mọi trường form là RwSignal riêng. Các dòng món và dòng thanh toán
//! nằm trong sổ dòng do chính ViewModel quản lý: thêm/xóa dòng chỉ đi
//! qua các lệnh ở đây, không quét lại DOM. Tính tiền chạy theo đường
//! ống tường minh: tra giá xong thì ghi thành tiền rồi đối soát
//! thanh toán, không hẹn giờ đoán chừng.

use crate::domain::a001_menu_item::model::{fetch_menu_items, fetch_menu_price};
use crate::domain::a002_order::model;
use crate::shared::money;
use contracts::domain::a002_order::aggregate::{
    Order, OrderDto, OrderItemLine, OrderItemLineDto, OrderStatus, OrderType, PaymentLine,
    PaymentLineDto, PaymentMethod, PaymentStatus,
};
use contracts::domain::a002_order::reconcile;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use uuid::Uuid;

/// Gõ số lượng được gom lại chừng này mili giây rồi mới tra giá
const QUANTITY_DEBOUNCE_MS: u32 = 200;

/// Helper to convert empty strings to None
fn opt(v: String) -> Option<String> {
    if v.trim().is_empty() {
        None
    } else {
        Some(v)
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Một dòng món trên form.
///
/// `lookup_token` tăng mỗi lần dòng phát sinh tra giá mới; kết quả về
/// muộn mang token cũ sẽ bị bỏ, không ghi đè thành tiền mới hơn.
#[derive(Clone, Copy)]
pub struct ItemRowVm {
    pub row_id: Uuid,
    pub menu_item_id: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub total: RwSignal<f64>,
    lookup_token: RwSignal<u64>,
}

impl ItemRowVm {
    fn new() -> Self {
        Self {
            row_id: Uuid::new_v4(),
            menu_item_id: RwSignal::new(String::new()),
            quantity: RwSignal::new("1".to_string()),
            total: RwSignal::new(0.0),
            lookup_token: RwSignal::new(0),
        }
    }

    fn from_line(line: &OrderItemLine) -> Self {
        Self {
            row_id: Uuid::new_v4(),
            menu_item_id: RwSignal::new(line.menu_item_id.clone().unwrap_or_default()),
            quantity: RwSignal::new(line.quantity.to_string()),
            total: RwSignal::new(line.total),
            lookup_token: RwSignal::new(0),
        }
    }
}

/// Một dòng thanh toán trên form
#[derive(Clone, Copy)]
pub struct PaymentRowVm {
    pub row_id: Uuid,
    pub method: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub note: RwSignal<String>,
    /// Thời điểm ghi nhận, chỉ để hiển thị (dòng mới chưa có)
    pub paid_at: RwSignal<String>,
}

impl PaymentRowVm {
    fn new() -> Self {
        Self {
            row_id: Uuid::new_v4(),
            method: RwSignal::new(PaymentMethod::default().as_str().to_string()),
            amount: RwSignal::new(String::new()),
            note: RwSignal::new(String::new()),
            paid_at: RwSignal::new(String::new()),
        }
    }

    fn from_line(line: &PaymentLine) -> Self {
        Self {
            row_id: Uuid::new_v4(),
            method: RwSignal::new(line.method.as_str().to_string()),
            amount: RwSignal::new(money::to_fixed(line.amount)),
            note: RwSignal::new(line.note.clone()),
            paid_at: RwSignal::new(format_timestamp(line.paid_at)),
        }
    }
}

/// ViewModel form đơn hàng
#[derive(Clone)]
pub struct OrderDetailsVm {
    // === Trường form (RwSignal riêng cho từng ô nhập) ===
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub customer_name: RwSignal<String>,
    pub customer_phone: RwSignal<String>,
    pub order_type: RwSignal<String>,
    pub table_label: RwSignal<String>,
    pub order_status: RwSignal<String>,
    pub payment_status: RwSignal<String>,
    pub comment: RwSignal<String>,

    // === Sổ dòng ===
    pub item_rows: RwSignal<Vec<ItemRowVm>>,
    pub payment_rows: RwSignal<Vec<PaymentRowVm>>,

    // === Dữ liệu tham chiếu ===
    pub menu_options: RwSignal<Vec<(String, String)>>,

    // === Trạng thái UI ===
    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl OrderDetailsVm {
    /// Form trống cho đơn mới: một dòng món chờ chọn, chưa có dòng
    /// thanh toán nào
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            customer_name: RwSignal::new(String::new()),
            customer_phone: RwSignal::new(String::new()),
            order_type: RwSignal::new(OrderType::default().as_str().to_string()),
            table_label: RwSignal::new(String::new()),
            order_status: RwSignal::new(OrderStatus::default().as_str().to_string()),
            payment_status: RwSignal::new(PaymentStatus::default().as_str().to_string()),
            comment: RwSignal::new(String::new()),

            item_rows: RwSignal::new(vec![ItemRowVm::new()]),
            payment_rows: RwSignal::new(Vec::new()),

            menu_options: RwSignal::new(Vec::new()),

            active_tab: RwSignal::new("general"),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    // === Tín hiệu dẫn xuất ===

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        Signal::derive(move || saving.get() || loading.get())
    }

    /// Tổng thành tiền các dòng món (đọc có theo dõi, dùng trong
    /// `Signal::derive` ở view)
    pub fn items_total(&self) -> f64 {
        let sum: f64 = self
            .item_rows
            .get()
            .iter()
            .map(|r| r.total.get())
            .sum();
        reconcile::round_money(sum)
    }

    /// Tổng các dòng thanh toán theo chuỗi đang nhập
    pub fn payments_total(&self) -> f64 {
        let sum: f64 = self
            .payment_rows
            .get()
            .iter()
            .map(|r| money::parse_money(&r.amount.get()))
            .sum();
        reconcile::round_money(sum)
    }

    /// Phần còn thiếu, không âm
    pub fn remaining(&self) -> f64 {
        reconcile::remaining_to_pay(self.items_total(), self.payments_total())
    }

    // === Nạp dữ liệu ===

    /// Danh sách món cho hộp chọn; lựa chọn rỗng đứng đầu như form trống
    pub fn load_menu_options(&self) {
        let menu_options = self.menu_options;
        leptos::task::spawn_local(async move {
            match fetch_menu_items().await {
                Ok(items) => {
                    let mut opts = vec![(String::new(), "---------".to_string())];
                    opts.extend(
                        items
                            .into_iter()
                            .map(|m| (m.to_string_id(), m.base.description)),
                    );
                    menu_options.set(opts);
                }
                Err(e) => log::warn!("Không tải được thực đơn: {}", e),
            }
        });
    }

    /// Nạp đơn theo id rồi chạy lượt tính đầu
    pub fn load(&self, id: String) {
        let this = self.clone();
        this.loading.set(true);
        this.error.set(None);
        this.id.set(Some(id.clone()));

        leptos::task::spawn_local(async move {
            match model::fetch_order(&id).await {
                Ok(order) => {
                    this.from_aggregate(&order);
                    this.loading.set(false);
                    this.settle();
                }
                Err(e) => {
                    this.error.set(Some(e));
                    this.loading.set(false);
                }
            }
        });
    }

    /// Lượt tính ngay khi dữ liệu sẵn sàng: định giá lại từng dòng món,
    /// mỗi lượt xong tự đối soát thanh toán. Đơn không có dòng món thì
    /// đối soát luôn.
    pub fn settle(&self) {
        let rows = self.item_rows.get_untracked();
        if rows.is_empty() {
            self.reconcile_payments();
            return;
        }
        for row in rows {
            self.reprice_row(row);
        }
    }

    // === Đường ống tính tiền ===

    /// Định giá lại một dòng ngay lập tức (đổi món, thêm dòng, nạp đơn)
    pub fn reprice_row(&self, row: ItemRowVm) {
        let token = row.lookup_token.get_untracked() + 1;
        row.lookup_token.set(token);
        self.reprice_with_token(row, token);
    }

    /// Định giá lại sau khoảng lặng gõ phím. Token đổi tiếp trong lúc
    /// chờ nghĩa là đã có lượt mới hơn, lượt này bỏ.
    pub fn reprice_row_debounced(&self, row: ItemRowVm) {
        let token = row.lookup_token.get_untracked() + 1;
        row.lookup_token.set(token);
        let this = self.clone();
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(QUANTITY_DEBOUNCE_MS).await;
            if row.lookup_token.get_untracked() != token {
                return;
            }
            this.reprice_with_token(row, token);
        });
    }

    fn reprice_with_token(&self, row: ItemRowVm, token: u64) {
        let menu_id = row.menu_item_id.get_untracked();
        let quantity = money::parse_quantity(&row.quantity.get_untracked());

        // chưa chọn món hoặc số lượng 0: thành tiền 0, không gọi mạng
        if menu_id.is_empty() || quantity <= 0 {
            row.total.set(0.0);
            self.reconcile_payments();
            return;
        }

        let this = self.clone();
        leptos::task::spawn_local(async move {
            let price = match fetch_menu_price(&menu_id).await {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Không tra được giá món {}: {}", menu_id, e);
                    0.0
                }
            };
            if row.lookup_token.get_untracked() != token {
                return;
            }
            row.total.set(reconcile::line_total(price, quantity));
            this.reconcile_payments();
        });
    }

    /// Đối soát thanh toán: phần còn thiếu (không âm) được ghi vào dòng
    /// thanh toán trống hoặc bằng 0 đầu tiên dưới dạng "40.00". Dòng đã
    /// có số khác 0 không bao giờ bị ghi đè; không có dòng trống thì
    /// không làm gì.
    pub fn reconcile_payments(&self) {
        let sum: f64 = self
            .item_rows
            .with_untracked(|rows| rows.iter().map(|r| r.total.get_untracked()).sum());
        let items_total = reconcile::round_money(sum);

        let rows = self.payment_rows.get_untracked();
        let mut amounts: Vec<f64> = rows
            .iter()
            .map(|r| money::parse_money(&r.amount.get_untracked()))
            .collect();

        if let Some(ix) = reconcile::fill_remaining(items_total, &mut amounts) {
            rows[ix].amount.set(money::to_fixed(amounts[ix]));
        }
    }

    // === Sổ dòng ===

    /// Thêm dòng món trống; dòng mới được tính ngay (chưa chọn món nên
    /// thành tiền 0, không gọi mạng)
    pub fn add_item_row(&self) {
        let row = ItemRowVm::new();
        self.item_rows.update(|rows| rows.push(row));
        self.reprice_row(row);
    }

    pub fn remove_item_row(&self, row_id: Uuid) {
        self.item_rows
            .update(|rows| rows.retain(|r| r.row_id != row_id));
        self.reconcile_payments();
    }

    /// Thêm dòng thanh toán; nếu đơn còn thiếu thì dòng mới được điền luôn
    pub fn add_payment_row(&self) {
        self.payment_rows
            .update(|rows| rows.push(PaymentRowVm::new()));
        self.reconcile_payments();
    }

    pub fn remove_payment_row(&self, row_id: Uuid) {
        self.payment_rows
            .update(|rows| rows.retain(|r| r.row_id != row_id));
        self.reconcile_payments();
    }

    // === Sự kiện từ view ===

    /// Đổi món của một dòng: tra giá ngay, không chờ gõ phím
    pub fn on_menu_item_changed(&self, row: ItemRowVm, value: String) {
        row.menu_item_id.set(value);
        self.reprice_row(row);
    }

    /// Gõ số lượng: gom phím một nhịp rồi mới tra giá
    pub fn on_quantity_input(&self, row: ItemRowVm, value: String) {
        row.quantity.set(value);
        self.reprice_row_debounced(row);
    }

    /// Đổi tab; mở tab thanh toán thì đối soát lại một lượt
    pub fn set_tab(&self, tab: &'static str) {
        self.active_tab.set(tab);
        if tab == "payments" {
            self.reconcile_payments();
        }
    }

    // === Lệnh ===

    /// Lưu form
    pub fn save(&self, on_saved: Callback<()>) {
        let this = self.clone();
        this.saving.set(true);
        this.error.set(None);

        let dto = this.to_dto();

        leptos::task::spawn_local(async move {
            match model::save_order(&dto).await {
                Ok(new_id) => {
                    if this.id.get_untracked().is_none() {
                        this.id.set(Some(new_id));
                    }
                    this.saving.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    this.saving.set(false);
                    this.error.set(Some(e));
                }
            }
        });
    }

    // === Helper riêng ===

    /// Gom form thành DTO gửi lên server. Dòng món chưa chọn món bị bỏ
    /// qua; dòng thanh toán gửi nguyên trạng, server sẽ tự điền dòng
    /// trống còn lại giống hệt phía form.
    fn to_dto(&self) -> OrderDto {
        let items = self.item_rows.with_untracked(|rows| {
            rows.iter()
                .filter_map(|r| {
                    let menu_item_id = r.menu_item_id.get_untracked();
                    if menu_item_id.is_empty() {
                        return None;
                    }
                    Some(OrderItemLineDto {
                        menu_item_id: Some(menu_item_id),
                        quantity: money::parse_quantity(&r.quantity.get_untracked()),
                    })
                })
                .collect()
        });

        let payments = self.payment_rows.with_untracked(|rows| {
            rows.iter()
                .map(|r| PaymentLineDto {
                    method: PaymentMethod::parse(&r.method.get_untracked()).unwrap_or_default(),
                    amount: money::parse_money(&r.amount.get_untracked()),
                    note: r.note.get_untracked(),
                })
                .collect()
        });

        OrderDto {
            id: self.id.get_untracked(),
            code: opt(self.code.get_untracked()),
            customer_name: self.customer_name.get_untracked(),
            customer_phone: self.customer_phone.get_untracked(),
            order_type: OrderType::parse(&self.order_type.get_untracked()).unwrap_or_default(),
            table_label: opt(self.table_label.get_untracked()),
            order_status: OrderStatus::parse(&self.order_status.get_untracked())
                .unwrap_or_default(),
            payment_status: PaymentStatus::parse(&self.payment_status.get_untracked())
                .unwrap_or_default(),
            comment: opt(self.comment.get_untracked()),
            items,
            payments,
        }
    }

    /// Đổ dữ liệu aggregate đã nạp vào các signal của form
    fn from_aggregate(&self, order: &Order) {
        self.code.set(order.base.code.clone());
        self.customer_name.set(order.customer_name.clone());
        self.customer_phone.set(order.customer_phone.clone());
        self.order_type.set(order.order_type.as_str().to_string());
        self.table_label
            .set(order.table_label.clone().unwrap_or_default());
        self.order_status
            .set(order.order_status.as_str().to_string());
        self.payment_status
            .set(order.payment_status.as_str().to_string());
        self.comment
            .set(order.base.comment.clone().unwrap_or_default());

        self.item_rows
            .set(order.items.iter().map(ItemRowVm::from_line).collect());
        self.payment_rows
            .set(order.payments.iter().map(PaymentRowVm::from_line).collect());
    }
}
