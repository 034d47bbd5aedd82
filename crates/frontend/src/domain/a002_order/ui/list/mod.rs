use crate::domain::a002_order::model::{delete_order, fetch_orders, seed_test_data};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::components::ui::Select;
use crate::shared::icons::icon;
use crate::shared::money::format_money;
use contracts::domain::a002_order::aggregate::{Order, OrderStatus, PaymentStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// Một hàng trên bảng danh sách đơn
#[derive(Clone, Debug)]
pub struct OrderRow {
    pub id: String,
    pub code: String,
    pub customer: String,
    pub order_type: &'static str,
    pub table_label: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: String,
    pub paid: String,
    pub created_at: String,
}

impl From<Order> for OrderRow {
    fn from(o: Order) -> Self {
        use contracts::domain::common::AggregateId;

        let total = format_money(o.subtotal());
        let paid = format_money(o.payments_total());
        let customer = if o.customer_name.trim().is_empty() {
            "-".to_string()
        } else {
            o.customer_name.clone()
        };

        Self {
            id: o.base.id.as_string(),
            code: o.base.code,
            customer,
            order_type: o.order_type.label(),
            table_label: o.table_label.unwrap_or_else(|| "-".to_string()),
            order_status: o.order_status,
            payment_status: o.payment_status,
            total,
            paid,
            created_at: format_timestamp(o.base.metadata.created_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

fn status_badge_color(status: OrderStatus) -> BadgeColor {
    match status {
        OrderStatus::Pending => BadgeColor::Warning,
        OrderStatus::Preparing => BadgeColor::Brand,
        OrderStatus::Ready => BadgeColor::Important,
        OrderStatus::Completed => BadgeColor::Success,
        OrderStatus::Cancelled => BadgeColor::Danger,
    }
}

fn payment_badge_color(status: PaymentStatus) -> BadgeColor {
    match status {
        PaymentStatus::Unpaid => BadgeColor::Danger,
        PaymentStatus::Pending => BadgeColor::Warning,
        PaymentStatus::Paid => BadgeColor::Success,
        PaymentStatus::Refunded => BadgeColor::Important,
    }
}

#[component]
#[allow(non_snake_case)]
pub fn OrdersList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let (items, set_items) = signal::<Vec<OrderRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<HashSet<String>>(HashSet::new());
    let (search, set_search) = signal(String::new());
    let (status_filter, set_status_filter) = signal(String::new());

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            let q = search.get_untracked();
            let st = status_filter.get_untracked();
            match fetch_orders(&q, &st).await {
                Ok(v) => {
                    let rows: Vec<OrderRow> = v.into_iter().map(Into::into).collect();
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let handle_create_new = move || ctx.open_order_details(None);

    let handle_edit = move |id: String| ctx.open_order_details(Some(id));

    let toggle_select = move |id: String, checked: bool| {
        set_selected.update(|s| {
            if checked {
                s.insert(id.clone());
            } else {
                s.remove(&id);
            }
        });
    };

    let clear_selection = move || set_selected.set(HashSet::new());

    let delete_selected = move || {
        let ids: Vec<String> = selected.get().into_iter().collect();
        if ids.is_empty() {
            return;
        }

        let confirmed = {
            if let Some(win) = web_sys::window() {
                win.confirm_with_message(&format!("Xóa các đơn đã chọn? Số lượng: {}", ids.len()))
                    .unwrap_or(false)
            } else {
                false
            }
        };
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            for id in ids {
                if let Err(e) = delete_order(&id).await {
                    log::warn!("Không xóa được đơn {}: {}", id, e);
                }
            }
            clear_selection();
            fetch();
        });
    };

    let seed_demo = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match seed_test_data().await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let status_options = Signal::derive(move || {
        let mut opts = vec![(String::new(), "Tất cả trạng thái".to_string())];
        opts.extend(
            OrderStatus::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), s.label().to_string())),
        );
        opts
    });

    fetch();

    view! {
        <div class="page">
            // Page header with title and action buttons
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{Order::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| handle_create_new()>
                        {icon("plus")}
                        "Đơn mới"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Làm mới"
                    </button>
                    <button class="button button--secondary" on:click=move |_| seed_demo()>
                        "Dữ liệu mẫu"
                    </button>
                    <button class="button button--secondary" on:click=move |_| delete_selected() disabled={move || selected.get().is_empty()}>
                        {icon("delete")}
                        {move || format!("Xóa ({})", selected.get().len())}
                    </button>
                </div>
            </div>

            <div class="filter-bar">
                <input
                    class="form__input filter-bar__search"
                    type="text"
                    placeholder="Tìm theo mã đơn, tên hoặc số điện thoại"
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            fetch();
                        }
                    }
                />
                <Select
                    value=status_filter
                    options=status_options
                    on_change=Callback::new(move |v: String| {
                        set_status_filter.set(v);
                        fetch();
                    })
                />
                <button class="button button--secondary" on:click=move |_| fetch()>
                    "Tìm"
                </button>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100);">
                    <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                    <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--checkbox">
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        let current_items = items.get();
                                        if checked {
                                            set_selected.update(|s| {
                                                for item in current_items.iter() {
                                                    s.insert(item.id.clone());
                                                }
                                            });
                                        } else {
                                            set_selected.set(HashSet::new());
                                        }
                                    }
                                />
                            </th>
                            <th class="table__header-cell">"Mã đơn"</th>
                            <th class="table__header-cell">"Khách hàng"</th>
                            <th class="table__header-cell">"Hình thức"</th>
                            <th class="table__header-cell">"Bàn"</th>
                            <th class="table__header-cell">"Trạng thái"</th>
                            <th class="table__header-cell">"Thanh toán"</th>
                            <th class="table__header-cell table__header-cell--number">"Tổng tiền"</th>
                            <th class="table__header-cell table__header-cell--number">"Đã trả"</th>
                            <th class="table__header-cell">"Tạo lúc"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_click = id.clone();
                            let id_for_checkbox = id.clone();
                            let id_for_toggle = id.clone();
                            let is_selected = selected.get().contains(&id);
                            view! {
                                <tr
                                    class="table__row"
                                    class:table__row--selected=is_selected
                                    on:click=move |_| handle_edit(id_for_click.clone())
                                >
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.get().contains(&id_for_checkbox))
                                        on_change=Callback::new(move |checked| toggle_select(id_for_toggle.clone(), checked))
                                    />
                                    <td class="table__cell">{row.code}</td>
                                    <td class="table__cell">{row.customer}</td>
                                    <td class="table__cell">{row.order_type}</td>
                                    <td class="table__cell">{row.table_label}</td>
                                    <td class="table__cell">
                                        <Badge appearance=BadgeAppearance::Tint color=status_badge_color(row.order_status)>
                                            {row.order_status.label()}
                                        </Badge>
                                    </td>
                                    <td class="table__cell">
                                        <Badge appearance=BadgeAppearance::Tint color=payment_badge_color(row.payment_status)>
                                            {row.payment_status.label()}
                                        </Badge>
                                    </td>
                                    <td class="table__cell table__cell--number">{row.total}</td>
                                    <td class="table__cell table__cell--number">{row.paid}</td>
                                    <td class="table__cell">{row.created_at}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
