//! Tab Thanh toán: sổ dòng thanh toán và phần còn thiếu.
//!
//! Phần còn thiếu do ViewModel đối soát và ghi vào dòng trống đầu tiên;
//! tab chỉ hiển thị và nhận nhập tay.

use super::super::view_model::{OrderDetailsVm, PaymentRowVm};
use crate::shared::components::ui::{Input, Select};
use crate::shared::icons::icon;
use crate::shared::money::format_money;
use contracts::domain::a002_order::aggregate::PaymentMethod;
use leptos::prelude::*;
use thaw::*;

/// Tab các khoản thanh toán
#[component]
pub fn PaymentsTab(vm: OrderDetailsVm) -> impl IntoView {
    let payment_rows = vm.payment_rows;

    let method_options = Signal::derive(move || {
        PaymentMethod::ALL
            .iter()
            .map(|m| (m.as_str().to_string(), m.label().to_string()))
            .collect::<Vec<_>>()
    });

    let vm_add = vm.clone();
    let vm_items = vm.clone();
    let vm_paid = vm.clone();
    let vm_remaining = vm.clone();
    let items_total = Signal::derive(move || vm_items.items_total());
    let payments_total = Signal::derive(move || vm_paid.payments_total());
    let remaining = Signal::derive(move || vm_remaining.remaining());

    view! {
        <div class="details-section">
            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: var(--spacing-sm);">
                <h4 class="details-section__title" style="margin: 0;">"Các khoản thanh toán"</h4>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| vm_add.add_payment_row()
                >
                    {icon("plus")}
                    " Thêm khoản"
                </Button>
            </div>

            <table class="table">
                <thead class="table__head">
                    <tr>
                        <th class="table__header" style="width: 170px;">"Phương thức"</th>
                        <th class="table__header" style="width: 140px;">"Số tiền"</th>
                        <th class="table__header">"Ghi chú"</th>
                        <th class="table__header" style="width: 150px;">"Ghi nhận lúc"</th>
                        <th class="table__header" style="width: 60px;"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || payment_rows.get()
                        key=|row| row.row_id
                        children={
                            let vm = vm.clone();
                            move |row: PaymentRowVm| {
                                view! { <PaymentRow vm=vm.clone() row=row options=method_options /> }
                            }
                        }
                    />
                </tbody>
            </table>

            <div style="display: flex; gap: var(--spacing-lg); justify-content: flex-end; margin-top: var(--spacing-md); font-weight: 600;">
                <span>"Tổng món: " {move || format_money(items_total.get())}</span>
                <span>"Đã ghi nhận: " {move || format_money(payments_total.get())}</span>
                <span style="color: var(--color-primary);">
                    "Còn thiếu: " {move || format_money(remaining.get())}
                </span>
            </div>
        </div>
    }
}

/// Một dòng thanh toán. Số tiền gõ tay được giữ nguyên; phần điền tự
/// động do ViewModel ghi qua signal `amount` của dòng.
#[component]
fn PaymentRow(
    vm: OrderDetailsVm,
    row: PaymentRowVm,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    let method = row.method;
    let amount = row.amount;
    let note = row.note;
    let paid_at = row.paid_at;

    view! {
        <tr class="table__row">
            <td class="table__cell">
                <Select
                    value=method
                    options=options
                    on_change=Callback::new(move |v: String| method.set(v))
                />
            </td>
            <td class="table__cell">
                <Input
                    value=amount
                    placeholder="0.00"
                    on_input=Callback::new(move |v: String| amount.set(v))
                />
            </td>
            <td class="table__cell">
                <Input
                    value=note
                    on_input=Callback::new(move |v: String| note.set(v))
                />
            </td>
            <td class="table__cell">
                {move || {
                    let p = paid_at.get();
                    if p.is_empty() { "-".to_string() } else { p }
                }}
            </td>
            <td class="table__cell" style="text-align: center;">
                <Button
                    appearance=ButtonAppearance::Transparent
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_payment_row(row.row_id)
                >
                    {icon("delete")}
                </Button>
            </td>
        </tr>
    }
}
