use leptos::prelude::*;

/// Màn hình đang mở của ứng dụng
#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    OrdersList,
    /// `None` nghĩa là tạo đơn mới
    OrderDetails(Option<String>),
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub view: RwSignal<AppView>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(AppView::OrdersList),
        }
    }

    pub fn open_orders_list(&self) {
        self.view.set(AppView::OrdersList);
    }

    /// Mở form đơn hàng; `id = None` là đơn mới
    pub fn open_order_details(&self, id: Option<String>) {
        self.view.set(AppView::OrderDetails(id));
    }
}
