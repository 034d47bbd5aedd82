//! Trang chi tiết đơn hàng.
//!
//! Lớp vỏ mỏng quanh ViewModel:
//! - tạo ViewModel, nạp thực đơn và dữ liệu đơn (nếu sửa)
//! - vẽ header với nút thao tác
//! - vẽ thanh tab và điều hướng tới component từng tab

use super::tabs::{GeneralTab, ItemsTab, PaymentsTab};
use super::view_model::OrderDetailsVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Form chi tiết đơn hàng
#[component]
pub fn OrderDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = OrderDetailsVm::new();

    // Hộp chọn món dùng ở tab Món, nạp luôn từ đầu
    vm.load_menu_options();

    match id {
        Some(existing_id) => vm.load(existing_id),
        // đơn mới cũng chạy lượt tính đầu cho dòng món trống
        None => vm.settle(),
    }

    let vm_header = vm.clone();
    let vm_tabs = vm.clone();
    let vm_content = vm.clone();

    view! {
        <div class="details-container order-details">
            <Header vm=vm_header.clone() on_saved=on_saved on_cancel=on_cancel />

            <div class="modal-body">
                <ErrorDisplay vm=vm.clone() />

                <TabBar vm=vm_tabs.clone() />

                <div style="height: 60vh; overflow-y: auto; overflow-x: hidden;">
                    <TabContent vm=vm_content.clone() />
                </div>
            </div>
        </div>
    }
}

/// Header với tiêu đề và nút thao tác
#[component]
fn Header(vm: OrderDetailsVm, on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let is_edit_mode = vm.is_edit_mode();
    let is_save_disabled = vm.is_save_disabled();
    let code = vm.code;

    let handle_save = {
        let vm = vm.clone();
        move |_| {
            vm.save(on_saved);
        }
    };

    view! {
        <div class="modal-header">
            <h3 class="modal-title">
                {move || if is_edit_mode.get() {
                    let c = code.get();
                    if c.is_empty() {
                        "Sửa đơn hàng".to_string()
                    } else {
                        format!("Đơn hàng {}", c)
                    }
                } else {
                    "Đơn hàng mới".to_string()
                }}
            </h3>
            <div class="modal-header-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_save
                    disabled=is_save_disabled
                >
                    {icon("save")}
                    " Lưu"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                >
                    {icon("x")}
                    " Đóng"
                </Button>
            </div>
        </div>
    }
}

/// Hiển thị lỗi nạp / lưu
#[component]
fn ErrorDisplay(vm: OrderDetailsVm) -> impl IntoView {
    let error = vm.error;

    view! {
        {move || error.get().map(|e| view! {
            <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100); margin-bottom: var(--spacing-md);">
                <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
            </div>
        })}
    }
}

/// Thanh tab bằng nút THAW
#[component]
fn TabBar(vm: OrderDetailsVm) -> impl IntoView {
    let active_tab = vm.active_tab;
    let item_rows = vm.item_rows;
    let payment_rows = vm.payment_rows;

    let tab_icon = |name: &str| {
        view! { <span class="tab-icon">{icon(name)}</span> }
    };

    view! {
        <Flex
            gap=FlexGap::Small
            align=FlexAlign::Center
            style="margin-bottom: var(--spacing-md); padding: var(--spacing-sm); background: var(--color-bg-secondary); border-radius: var(--radius-lg); border: 1px solid var(--color-border);"
        >
            <Button
                appearance=Signal::derive({
                    let active_tab = active_tab;
                    move || if active_tab.get() == "general" {
                        ButtonAppearance::Primary
                    } else {
                        ButtonAppearance::Subtle
                    }
                })
                size=ButtonSize::Small
                on_click={
                    let vm = vm.clone();
                    move |_| vm.set_tab("general")
                }
            >
                {tab_icon("file-text")}
                "Thông tin chung"
            </Button>

            <Button
                appearance=Signal::derive({
                    let active_tab = active_tab;
                    move || if active_tab.get() == "items" {
                        ButtonAppearance::Primary
                    } else {
                        ButtonAppearance::Subtle
                    }
                })
                size=ButtonSize::Small
                on_click={
                    let vm = vm.clone();
                    move |_| vm.set_tab("items")
                }
            >
                {tab_icon("food")}
                "Món"
                <Badge
                    appearance=BadgeAppearance::Tint
                    color=Signal::derive({
                        let active_tab = active_tab;
                        move || if active_tab.get() == "items" {
                            BadgeColor::Brand
                        } else {
                            BadgeColor::Informative
                        }
                    })
                    attr:style="margin-left: 6px;"
                >
                    {move || item_rows.get().len().to_string()}
                </Badge>
            </Button>

            <Button
                appearance=Signal::derive({
                    let active_tab = active_tab;
                    move || if active_tab.get() == "payments" {
                        ButtonAppearance::Primary
                    } else {
                        ButtonAppearance::Subtle
                    }
                })
                size=ButtonSize::Small
                on_click={
                    let vm = vm.clone();
                    move |_| vm.set_tab("payments")
                }
            >
                {tab_icon("payments")}
                "Thanh toán"
                <Badge
                    appearance=BadgeAppearance::Tint
                    color=Signal::derive({
                        let active_tab = active_tab;
                        move || if active_tab.get() == "payments" {
                            BadgeColor::Brand
                        } else {
                            BadgeColor::Informative
                        }
                    })
                    attr:style="margin-left: 6px;"
                >
                    {move || payment_rows.get().len().to_string()}
                </Badge>
            </Button>
        </Flex>
    }
}

/// Điều hướng nội dung theo tab đang mở
#[component]
fn TabContent(vm: OrderDetailsVm) -> impl IntoView {
    let active_tab = vm.active_tab;
    let vm_general = vm.clone();
    let vm_items = vm.clone();
    let vm_payments = vm.clone();

    view! {
        {move || match active_tab.get() {
            "items" => view! {
                <div style="height: 100%; overflow-y: auto;">
                    <ItemsTab vm=vm_items.clone() />
                </div>
            }.into_any(),
            "payments" => view! {
                <div style="height: 100%; overflow-y: auto;">
                    <PaymentsTab vm=vm_payments.clone() />
                </div>
            }.into_any(),
            _ => view! {
                <div style="height: 100%; overflow-y: auto;">
                    <GeneralTab vm=vm_general.clone() />
                </div>
            }.into_any(),
        }}
    }
}
