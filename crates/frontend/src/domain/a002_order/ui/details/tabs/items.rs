//! Tab Món: sổ dòng món của đơn.
//!
//! Chọn món là tra giá ngay; gõ số lượng thì chờ hết nhịp gõ. Ô thành
//! tiền chỉ đọc, ViewModel ghi kết quả vào đó sau mỗi lượt tra giá.

use super::super::view_model::{ItemRowVm, OrderDetailsVm};
use crate::shared::components::ui::{Input, Select};
use crate::shared::icons::icon;
use crate::shared::money::format_money;
use leptos::prelude::*;
use thaw::*;

/// Tab các món trong đơn
#[component]
pub fn ItemsTab(vm: OrderDetailsVm) -> impl IntoView {
    let item_rows = vm.item_rows;
    let menu_options = vm.menu_options;

    let vm_add = vm.clone();
    let vm_total = vm.clone();
    let items_total = Signal::derive(move || vm_total.items_total());

    view! {
        <div class="details-section">
            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: var(--spacing-sm);">
                <h4 class="details-section__title" style="margin: 0;">"Các món trong đơn"</h4>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| vm_add.add_item_row()
                >
                    {icon("plus")}
                    " Thêm món"
                </Button>
            </div>

            <table class="table">
                <thead class="table__head">
                    <tr>
                        <th class="table__header">"Món"</th>
                        <th class="table__header" style="width: 110px;">"Số lượng"</th>
                        <th class="table__header" style="width: 140px; text-align: right;">"Thành tiền"</th>
                        <th class="table__header" style="width: 60px;"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || item_rows.get()
                        key=|row| row.row_id
                        children={
                            let vm = vm.clone();
                            move |row: ItemRowVm| {
                                view! { <ItemRow vm=vm.clone() row=row options=menu_options /> }
                            }
                        }
                    />
                </tbody>
                <tfoot>
                    <tr>
                        <td class="table__cell" style="font-weight: 600;" colspan="2">"Tổng cộng"</td>
                        <td class="table__cell" style="text-align: right; font-weight: 600;">
                            {move || format_money(items_total.get())}
                        </td>
                        <td class="table__cell"></td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

/// Một dòng món: hộp chọn món, ô số lượng, thành tiền chỉ đọc
#[component]
fn ItemRow(
    vm: OrderDetailsVm,
    row: ItemRowVm,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    let vm_select = vm.clone();
    let vm_qty = vm.clone();
    let total = row.total;

    view! {
        <tr class="table__row">
            <td class="table__cell">
                <Select
                    value=row.menu_item_id
                    options=options
                    on_change=Callback::new(move |v: String| vm_select.on_menu_item_changed(row, v))
                />
            </td>
            <td class="table__cell">
                <Input
                    value=row.quantity
                    input_type="number"
                    on_input=Callback::new(move |v: String| vm_qty.on_quantity_input(row, v))
                />
            </td>
            <td class="table__cell" style="text-align: right;">
                {move || format_money(total.get())}
            </td>
            <td class="table__cell" style="text-align: center;">
                <Button
                    appearance=ButtonAppearance::Transparent
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_item_row(row.row_id)
                >
                    {icon("delete")}
                </Button>
            </td>
        </tr>
    }
}
