use shared::{NewBillForm, ReceiptUpload, Route, User, EXPENSE_TYPES};
use web_sys::{FormData, HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use super::vertical_layout::VerticalLayout;
use crate::hooks::use_new_bill;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct NewBillPageProps {
    pub api_client: ApiClient,
    pub session: User,
    pub on_navigate: Callback<Route>,
}

fn read_form(form: &HtmlFormElement) -> Option<NewBillForm> {
    let data = match FormData::new_with_form(form) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Cannot read the new bill form: {:?}", e);
            return None;
        }
    };
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();

    Some(NewBillForm {
        expense_type: field("expense-type"),
        name: field("expense-name"),
        amount: field("amount"),
        date: field("datepicker"),
        vat: field("vat"),
        pct: field("pct"),
        commentary: field("commentary"),
    })
}

fn upload_status(upload: &ReceiptUpload) -> Html {
    match upload {
        ReceiptUpload::NoFile => html! {},
        ReceiptUpload::Uploading { file_name, .. } => html! {
            <div class="form-message info">{format!("Téléchargement de {}...", file_name)}</div>
        },
        ReceiptUpload::Uploaded(receipt) => html! {
            <div class="form-message success">{format!("{} téléchargé", receipt.file_name)}</div>
        },
        ReceiptUpload::UploadFailed { file_name, message } => html! {
            <div class="form-message error">
                {format!("Échec du téléchargement de {} : {}", file_name, message)}
            </div>
        },
    }
}

#[function_component(NewBillPage)]
pub fn new_bill_page(props: &NewBillPageProps) -> Html {
    let new_bill = use_new_bill(&props.api_client, &props.session, &props.on_navigate);
    let state = &new_bill.state;

    let on_file_change = {
        let change_file = new_bill.actions.change_file.clone();
        Callback::from(move |e: Event| {
            e.prevent_default();
            let input: HtmlInputElement = e.target_unchecked_into();
            change_file.emit(input);
        })
    };

    let on_submit = {
        let submit = new_bill.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            if let Some(values) = read_form(&form) {
                submit.emit(values);
            }
        })
    };

    html! {
        <div class="layout">
            <VerticalLayout height={150} active={Route::NewBill} on_navigate={props.on_navigate.clone()} />
            <div class="content">
                <div class="content-header">
                    <div class="content-title">{"Envoyer une note de frais"}</div>
                </div>
                <div class="form-newbill-container content-inner">
                    <form data-testid="form-new-bill" onsubmit={on_submit}>
                        <div class="row">
                            <div class="col-md-6">
                                <div class="col-half">
                                    <label for="expense-type" class="bold-label">{"Type de dépense"}</label>
                                    <select required={true} class="form-control blue-border" name="expense-type" data-testid="expense-type">
                                        {for EXPENSE_TYPES.iter().map(|expense_type| html! {
                                            <option value={*expense_type}>{*expense_type}</option>
                                        })}
                                    </select>
                                </div>
                                <div class="col-half">
                                    <label for="expense-name" class="bold-label">{"Nom de la dépense"}</label>
                                    <input type="text" class="form-control blue-border" name="expense-name" data-testid="expense-name" placeholder="Vol Paris Londres" />
                                </div>
                                <div class="col-half">
                                    <label for="datepicker" class="bold-label">{"Date"}</label>
                                    <input required={true} type="date" class="form-control blue-border" name="datepicker" data-testid="datepicker" />
                                </div>
                                <div class="col-half">
                                    <label for="amount" class="col-form-label bold-label">{"Montant TTC "}</label>
                                    <input required={true} type="number" class="form-control blue-border input-icon input-icon-right" name="amount" data-testid="amount" placeholder="348" />
                                </div>
                                <div class="col-half-row">
                                    <div class="flex-col">
                                        <label for="vat" class="bold-label">{"TVA"}</label>
                                        <input type="number" class="form-control blue-border" name="vat" data-testid="vat" placeholder="70" />
                                    </div>
                                    <div class="flex-col">
                                        <input required={true} type="number" class="form-control blue-border" name="pct" data-testid="pct" placeholder="20" />
                                    </div>
                                </div>
                            </div>
                            <div class="col-md-6">
                                <div class="col-half">
                                    <label for="commentary" class="bold-label">{"Commentaire"}</label>
                                    <textarea class="form-control blue-border" name="commentary" data-testid="commentary" rows="3" />
                                </div>
                                <div class="col-half">
                                    <label for="file" class="bold-label">{"Justificatif"}</label>
                                    <input
                                        required={true}
                                        type="file"
                                        accept=".jpg,.jpeg,.png"
                                        class="form-control blue-border"
                                        data-testid="file"
                                        aria-busy={state.uploading.to_string()}
                                        onchange={on_file_change}
                                    />
                                    {upload_status(&state.upload)}
                                </div>
                            </div>
                        </div>
                        {if let Some(error) = &state.submit_error {
                            html! { <div class="form-message error">{error}</div> }
                        } else { html! {} }}
                        <div class="row">
                            <div class="col-md-6">
                                <div class="col-half">
                                    <button type="submit" id="btn-send-bill" class="btn btn-primary" disabled={!state.can_submit}>
                                        {if state.submitting { "Envoi..." } else { "Envoyer" }}
                                    </button>
                                </div>
                            </div>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
