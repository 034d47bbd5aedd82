use leptos::prelude::*;

/// Ô checkbox cho bảng danh sách.
///
/// Render một `<td>` chứa checkbox; click vào checkbox không lan
/// sang click của cả hàng (stop_propagation).
#[component]
pub fn TableCheckbox(
    /// Trạng thái chọn
    checked: Signal<bool>,
    /// Gọi khi trạng thái đổi
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </td>
    }
}
