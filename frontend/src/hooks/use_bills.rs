use shared::{Bill, Route, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::containers::{BillsContainer, ReceiptModal};
use crate::services::api::ApiClient;

#[derive(Clone, PartialEq)]
pub struct BillsState {
    pub bills: Vec<Bill>,
    pub loading: bool,
    pub error: Option<String>,
    pub modal: Option<ReceiptModal>,
}

pub struct UseBillsResult {
    pub state: BillsState,
    pub actions: UseBillsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBillsActions {
    pub refresh_bills: Callback<()>,
    pub new_bill: Callback<()>,
    pub open_receipt: Callback<String>,
    pub close_receipt: Callback<()>,
}

#[hook]
pub fn use_bills(api_client: &ApiClient, session: &User, on_navigate: &Callback<Route>) -> UseBillsResult {
    let container = {
        let api_client = api_client.clone();
        let on_navigate = on_navigate.clone();
        use_memo(session.clone(), move |session| {
            BillsContainer::new(Some(api_client), session.clone(), on_navigate)
        })
    };

    let bills = use_state(Vec::<Bill>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let modal = use_state(|| Option::<ReceiptModal>::None);

    let refresh_bills = {
        let container = container.clone();
        let bills = bills.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let container = container.clone();
            let bills = bills.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);

                match container.get_bills().await {
                    Ok(fetched) => {
                        bills.set(fetched);
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }

                loading.set(false);
            });
        })
    };

    let new_bill = {
        let container = container.clone();
        use_callback((), move |_, _| container.handle_click_new_bill())
    };

    let open_receipt = {
        let container = container.clone();
        let modal = modal.clone();
        use_callback((), move |url: String, _| {
            modal.set(Some(container.handle_click_icon_eye(&url)));
        })
    };

    let close_receipt = {
        let modal = modal.clone();
        use_callback((), move |_, _| modal.set(None))
    };

    // Load bills on mount
    use_effect_with((), {
        let refresh_bills = refresh_bills.clone();
        move |_| {
            refresh_bills.emit(());
            || ()
        }
    });

    let state = BillsState {
        bills: (*bills).clone(),
        loading: *loading,
        error: (*error).clone(),
        modal: (*modal).clone(),
    };

    let actions = UseBillsActions {
        refresh_bills,
        new_bill,
        open_receipt,
        close_receipt,
    };

    UseBillsResult { state, actions }
}
