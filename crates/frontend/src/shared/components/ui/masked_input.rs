use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// Text input that runs every keystroke through a mask from
/// `contracts::shared::mask` before handing it on.
///
/// The masked value is written back to the element immediately, so the
/// caret never shows unmasked text even when `value` does not change
/// (e.g. a letter typed into a CEP field).
#[component]
pub fn MaskedInput(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] value: Signal<String>,
    /// Pure mask such as `format_cep` or `format_phone`.
    mask: fn(&str) -> String,
    on_input: Callback<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] id: MaybeProp<String>,
    /// Field-level validation message; adds the error modifier when set.
    #[prop(optional, into)]
    error: Signal<Option<String>>,
    /// Mobile keyboards: "numeric" for digit-only masks.
    #[prop(optional, into)]
    inputmode: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_placeholder = move || placeholder.get().unwrap_or_default();
    let input_mode = move || inputmode.get().unwrap_or_else(|| "numeric".to_string());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>
                    {l}
                </label>
            })}
            <input
                id=input_id
                class="form__input"
                class=("form__input--error", move || error.with(|e| e.is_some()))
                type="text"
                inputmode=input_mode
                prop:value=move || mask(&value.get())
                placeholder=input_placeholder
                on:input=move |ev| {
                    let masked = mask(&event_target_value(&ev));
                    if let Some(target) = ev
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    {
                        target.set_value(&masked);
                    }
                    on_input.run(masked);
                }
            />
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}
