use shared::{NewBillForm, ReceiptError, ReceiptUpload, Route, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::containers::NewBillContainer;
use crate::services::api::ApiClient;

#[derive(Clone, PartialEq)]
pub struct NewBillState {
    pub upload: ReceiptUpload,
    /// A receipt upload is in flight
    pub uploading: bool,
    /// Receipt uploaded and no submission in flight
    pub can_submit: bool,
    pub submitting: bool,
    pub submit_error: Option<String>,
}

pub struct UseNewBillResult {
    pub state: NewBillState,
    pub actions: UseNewBillActions,
}

#[derive(Clone, PartialEq)]
pub struct UseNewBillActions {
    /// Called with the file input after its selection changed
    pub change_file: Callback<HtmlInputElement>,
    pub submit: Callback<NewBillForm>,
}

/// Clear a file input whose selection was rejected.
/// Returns the message to alert.
pub(crate) fn reject_file(input: &HtmlInputElement, error: &ReceiptError) -> String {
    input.set_value("");
    error.to_string()
}

#[hook]
pub fn use_new_bill(api_client: &ApiClient, session: &User, on_navigate: &Callback<Route>) -> UseNewBillResult {
    let upload = use_state(ReceiptUpload::default);
    let submitting = use_state(|| false);
    let submit_error = use_state(|| Option::<String>::None);

    let container = {
        let api_client = api_client.clone();
        let on_navigate = on_navigate.clone();
        let upload = upload.clone();
        use_memo(session.clone(), move |session| {
            let on_upload_change = Callback::from(move |state: ReceiptUpload| upload.set(state));
            NewBillContainer::new(Some(api_client), session.clone(), on_navigate, on_upload_change)
        })
    };

    let change_file = {
        let container = container.clone();
        let submit_error = submit_error.clone();

        use_callback((), move |input: HtmlInputElement, _| {
            let container = container.clone();
            submit_error.set(None);

            let value = input.value();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                log::debug!("File input changed without a file");
                return;
            };

            spawn_local(async move {
                if let Err(e) = container.handle_change_file(&value, file).await {
                    gloo::dialogs::alert(&reject_file(&input, &e));
                }
            });
        })
    };

    let submit = {
        let container = container.clone();
        let submitting = submitting.clone();
        let submit_error = submit_error.clone();

        use_callback((), move |form: NewBillForm, _| {
            let container = container.clone();
            let submitting = submitting.clone();
            let submit_error = submit_error.clone();

            spawn_local(async move {
                submitting.set(true);
                submit_error.set(None);

                if let Err(e) = container.handle_submit(form).await {
                    log::warn!("Bill not submitted: {}", e);
                    submit_error.set(Some(e.to_string()));
                }

                submitting.set(false);
            });
        })
    };

    let state = NewBillState {
        uploading: upload.is_uploading(),
        upload: (*upload).clone(),
        can_submit: container.can_submit() && !*submitting,
        submitting: *submitting,
        submit_error: (*submit_error).clone(),
    };

    let actions = UseNewBillActions { change_file, submit };

    UseNewBillResult { state, actions }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests {
    use super::*;
    use crate::services::api::ApiClient;
    use gloo::utils::document;
    use shared::UserType;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{DataTransfer, File};

    wasm_bindgen_test_configure!(run_in_browser);

    fn file_input_with(name: &str) -> (HtmlInputElement, File) {
        let input: HtmlInputElement = document().create_element("input").unwrap().dyn_into().unwrap();
        input.set_type("file");
        document().body().unwrap().append_child(&input).unwrap();

        let file = File::new_with_str_sequence(&js_sys::Array::of1(&"%PDF".into()), name).unwrap();
        let transfer = DataTransfer::new().unwrap();
        transfer.items().add_with_file(&file).unwrap();
        input.set_files(transfer.files().as_ref());
        (input, file)
    }

    #[wasm_bindgen_test]
    async fn test_rejected_file_clears_the_input() {
        let (input, file) = file_input_with("scan.pdf");
        assert_eq!(input.files().unwrap().length(), 1);

        let changes = Rc::new(RefCell::new(Vec::new()));
        let on_upload_change = {
            let changes = changes.clone();
            Callback::from(move |state: ReceiptUpload| changes.borrow_mut().push(state))
        };
        let session = User {
            user_type: UserType::Employee,
            email: "employee@test.com".to_string(),
        };
        let container =
            NewBillContainer::<ApiClient>::new(None, session, Callback::noop(), on_upload_change);

        let error = container
            .handle_change_file("C:\\fakepath\\scan.pdf", file)
            .await
            .unwrap_err();
        let message = reject_file(&input, &error);

        assert_eq!(message, error.to_string());
        assert_eq!(input.value(), "");
        assert_eq!(input.files().unwrap().length(), 0);
        assert_eq!(*changes.borrow(), vec![ReceiptUpload::NoFile]);
        assert!(!container.can_submit());
    }
}
