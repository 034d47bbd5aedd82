use crate::domain::a002_order::ui::details::OrderDetails;
use crate::domain::a002_order::ui::list::OrdersList;
use crate::layout::global_context::{AppGlobalContext, AppView};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Khung chung: thanh tiêu đề + vùng nội dung chuyển theo `AppGlobalContext`
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-shell">
            <header class="top-header">
                <div class="top-header__brand">
                    {icon("orders")}
                    <span class="top-header__title">"Quản lý đơn hàng"</span>
                </div>
                <nav class="top-header__nav">
                    <button
                        class="top-header__link"
                        on:click=move |_| ctx.open_orders_list()
                    >
                        "Đơn hàng"
                    </button>
                </nav>
            </header>
            <main class="app-shell__content">
                {move || match ctx.view.get() {
                    AppView::OrdersList => view! { <OrdersList /> }.into_any(),
                    AppView::OrderDetails(id) => view! {
                        <OrderDetails
                            id=id
                            on_saved=Callback::new(move |_| ctx.open_orders_list())
                            on_cancel=Callback::new(move |_| ctx.open_orders_list())
                        />
                    }.into_any(),
                }}
            </main>
        </div>
    }
}
