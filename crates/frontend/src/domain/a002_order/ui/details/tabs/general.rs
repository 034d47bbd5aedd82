//! Tab Thông tin chung: các trường cơ bản của đơn hàng
//!
//! Gồm: mã đơn, khách hàng, điện thoại, hình thức, bàn, trạng thái,
//! trạng thái thanh toán, ghi chú

use super::super::view_model::OrderDetailsVm;
use crate::shared::components::ui::Select;
use contracts::domain::a002_order::aggregate::{OrderStatus, OrderType, PaymentStatus};
use leptos::prelude::*;
use thaw::*;

/// Tab thông tin chung
#[component]
pub fn GeneralTab(vm: OrderDetailsVm) -> impl IntoView {
    let order_type = vm.order_type;
    let order_status = vm.order_status;
    let payment_status = vm.payment_status;

    let order_type_options = Signal::derive(move || {
        OrderType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>()
    });
    let order_status_options = Signal::derive(move || {
        OrderStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });
    let payment_status_options = Signal::derive(move || {
        PaymentStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Thông tin chung"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Mã đơn"</label>
                    <Input value=vm.code placeholder="Tự sinh khi lưu" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Khách hàng"</label>
                    <Input value=vm.customer_name placeholder="Khách lẻ" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Điện thoại"</label>
                    <Input value=vm.customer_phone placeholder="Tùy chọn" />
                </div>

                <Select
                    label="Hình thức"
                    value=order_type
                    options=order_type_options
                    on_change=Callback::new(move |v: String| order_type.set(v))
                />

                <div class="form__group">
                    <label class="form__label">"Bàn"</label>
                    <Input value=vm.table_label placeholder="Ví dụ: B12" />
                </div>

                <Select
                    label="Trạng thái"
                    value=order_status
                    options=order_status_options
                    on_change=Callback::new(move |v: String| order_status.set(v))
                />

                <Select
                    label="Thanh toán"
                    value=payment_status
                    options=payment_status_options
                    on_change=Callback::new(move |v: String| payment_status.set(v))
                />

                <div class="form__group" style="grid-column: 1 / -1;">
                    <label class="form__label">"Ghi chú"</label>
                    <Textarea value=vm.comment placeholder="Tùy chọn" attr:rows=3 />
                </div>
            </div>
        </div>
    }
}
