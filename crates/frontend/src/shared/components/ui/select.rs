use leptos::prelude::*;

/// Hộp chọn có nhãn tùy chọn; `options` là cặp (giá trị, nhãn hiển thị)
#[component]
pub fn Select(
    /// Nhãn phía trên hộp chọn (tùy chọn)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Giá trị đang chọn
    #[prop(into)]
    value: Signal<String>,
    /// Gọi với giá trị mới khi đổi lựa chọn
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Danh sách lựa chọn (giá trị, nhãn)
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// Khóa hộp chọn
    #[prop(optional)]
    disabled: bool,
    /// Id của phần tử select
    #[prop(optional, into)]
    id: MaybeProp<String>,
    /// Class CSS bổ sung
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                </label>
            })}
            <select
                id=select_id
                class=move || format!("form__select {}", additional_class())
                disabled=disabled
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
