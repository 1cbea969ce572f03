use shared::{validate_receipt, Bill, FormError, NewBillForm, ReceiptError, ReceiptUpload, Route, User};
use std::cell::{Cell, RefCell};
use thiserror::Error;
use yew::Callback;

use crate::services::store::{BillStore, ReceiptUploadRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Veuillez attendre la fin du téléchargement du justificatif")]
    ReceiptNotReady,
    #[error("La note de frais est déjà en cours d'envoi")]
    AlreadySubmitting,
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Behaviour behind the NewBill page: receipt upload then bill submission
pub struct NewBillContainer<S: BillStore> {
    store: Option<S>,
    session: User,
    on_navigate: Callback<Route>,
    on_upload_change: Callback<ReceiptUpload>,
    upload: RefCell<ReceiptUpload>,
    attempts: Cell<u32>,
    submitting: Cell<bool>,
}

impl<S: BillStore> NewBillContainer<S> {
    pub fn new(
        store: Option<S>,
        session: User,
        on_navigate: Callback<Route>,
        on_upload_change: Callback<ReceiptUpload>,
    ) -> Self {
        Self {
            store,
            session,
            on_navigate,
            on_upload_change,
            upload: RefCell::new(ReceiptUpload::NoFile),
            attempts: Cell::new(0),
            submitting: Cell::new(false),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.upload.borrow().is_ready() && !self.submitting.get()
    }

    fn transition(&self, step: impl FnOnce(ReceiptUpload) -> ReceiptUpload) {
        let next = step(self.upload.take());
        *self.upload.borrow_mut() = next.clone();
        self.on_upload_change.emit(next);
    }

    /// Validate the picked file and upload it.
    ///
    /// `input_value` is the file input's value, e.g. `C:\fakepath\test.jpg`.
    /// A rejected file resets the upload and returns the error for the page
    /// to alert and clear the input. Upload failures end in `UploadFailed`.
    pub async fn handle_change_file(
        &self,
        input_value: &str,
        file: S::File,
    ) -> Result<(), ReceiptError> {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);

        let file_name = match validate_receipt(input_value) {
            Ok(file_name) => file_name,
            Err(e) => {
                log::warn!("Rejected receipt {:?}: {}", input_value, e);
                self.transition(|_| ReceiptUpload::NoFile);
                return Err(e);
            }
        };

        self.transition(|_| ReceiptUpload::begin(file_name.clone(), attempt));

        let Some(store) = &self.store else {
            self.transition(|state| state.fail(attempt, "Aucun stockage configuré"));
            return Ok(());
        };

        let request = ReceiptUploadRequest {
            file,
            file_name: file_name.clone(),
            email: self.session.email.clone(),
        };
        match store.create(request).await {
            Ok(response) => {
                log::info!("Uploaded {} as bill {}", file_name, response.key);
                self.transition(|state| state.complete(attempt, &response));
            }
            Err(e) => {
                log::error!("Upload of {} failed: {}", file_name, e);
                self.transition(|state| state.fail(attempt, e.to_string()));
            }
        }
        Ok(())
    }

    /// Assemble the bill from the form, persist it, then go back to Bills
    pub async fn handle_submit(&self, form: NewBillForm) -> Result<(), SubmitError> {
        if self.submitting.get() {
            return Err(SubmitError::AlreadySubmitting);
        }
        let receipt = self
            .upload
            .borrow()
            .uploaded()
            .cloned()
            .ok_or(SubmitError::ReceiptNotReady)?;
        let bill = form.into_bill(&self.session.email, &receipt)?;

        self.submitting.set(true);
        self.update_bill(&bill).await;
        self.submitting.set(false);

        self.on_navigate.emit(Route::Bills);
        Ok(())
    }

    /// Persist `bill` under its key. Failures are logged only.
    pub async fn update_bill(&self, bill: &Bill) {
        let Some(store) = &self.store else {
            return;
        };
        let Some(selector) = bill.id.as_deref() else {
            log::error!("Bill {:?} has no key, not persisted", bill.name);
            return;
        };

        match store.update(selector, bill).await {
            Ok(_) => log::info!("Submitted bill {}", selector),
            Err(e) => log::error!("Failed to submit bill {}: {}", selector, e),
        }
    }
}
