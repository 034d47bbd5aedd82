use leptos::prelude::*;

/// Ô nhập liệu có nhãn tùy chọn, báo thay đổi qua `on_input`
#[component]
pub fn Input(
    /// Nhãn phía trên ô nhập (tùy chọn)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Giá trị hiện tại
    #[prop(into)]
    value: Signal<String>,
    /// Gọi với giá trị mới mỗi lần gõ
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Placeholder
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Loại input: "text" (mặc định), "number", "tel", ...
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    /// Khóa ô nhập
    #[prop(optional)]
    disabled: bool,
    /// Id của phần tử input
    #[prop(optional, into)]
    id: MaybeProp<String>,
    /// Class CSS bổ sung
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_placeholder = move || placeholder.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>
                    {l}
                </label>
            })}
            <input
                id=input_id
                class=move || format!("form__input {}", additional_class())
                type=input_t
                prop:value=move || value.get()
                placeholder=input_placeholder
                disabled=disabled
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}
