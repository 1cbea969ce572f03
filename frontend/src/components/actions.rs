use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ActionsProps {
    pub bill_url: Option<String>,
    pub on_view_receipt: Callback<String>,
}

/// Row actions. The eye icon carries the receipt URL in `data-bill-url`.
#[function_component(Actions)]
pub fn actions(props: &ActionsProps) -> Html {
    let on_eye_click = {
        let on_view_receipt = props.on_view_receipt.clone();
        Callback::from(move |e: MouseEvent| {
            let url = e
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.get_attribute("data-bill-url"));
            match url {
                Some(url) => on_view_receipt.emit(url),
                None => log::warn!("Eye icon clicked without a bill URL"),
            }
        })
    };

    html! {
        <div class="icon-actions">
            <div
                id="eye"
                data-testid="icon-eye"
                data-bill-url={props.bill_url.clone().unwrap_or_default()}
                onclick={on_eye_click}
            >
                {"👁"}
            </div>
        </div>
    }
}
