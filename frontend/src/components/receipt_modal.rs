use yew::prelude::*;
use web_sys::MouseEvent;

use crate::containers::ReceiptModal;

#[derive(Properties, PartialEq)]
pub struct ReceiptModalViewProps {
    pub modal: Option<ReceiptModal>,
    pub on_close: Callback<()>,
}

/// Receipt image of a bill, shown over the bills table
#[function_component(ReceiptModalView)]
pub fn receipt_modal_view(props: &ReceiptModalViewProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let Some(modal) = &props.modal else {
        return html! {};
    };

    html! {
        <div class="modal-backdrop" id="modaleFile" onclick={on_backdrop_click}>
            <div class="modal-dialog modal-lg" role="document" onclick={on_modal_click}>
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">{"Justificatif"}</h5>
                        <button type="button" class="close" aria-label="Close" onclick={on_close_click}>
                            <span aria-hidden="true">{"×"}</span>
                        </button>
                    </div>
                    <div class="modal-body">
                        <div class="bill-proof-container">
                            <img src={modal.image_url.clone()} alt="Bill" />
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
