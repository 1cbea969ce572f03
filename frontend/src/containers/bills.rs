use shared::{sort_bills_by_date_desc, Bill, Route, User, UserType};
use yew::Callback;

use crate::services::store::{BillStore, StoreError};

/// Receipt shown in the modal opened from a bill row
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptModal {
    pub image_url: String,
}

/// Behaviour behind the Bills page
pub struct BillsContainer<S: BillStore> {
    store: Option<S>,
    session: User,
    on_navigate: Callback<Route>,
}

impl<S: BillStore> BillsContainer<S> {
    pub fn new(store: Option<S>, session: User, on_navigate: Callback<Route>) -> Self {
        Self {
            store,
            session,
            on_navigate,
        }
    }

    pub fn handle_click_new_bill(&self) {
        self.on_navigate.emit(Route::NewBill);
    }

    /// Open the receipt modal on the URL carried by the row's `data-bill-url`
    pub fn handle_click_icon_eye(&self, bill_url: &str) -> ReceiptModal {
        ReceiptModal {
            image_url: bill_url.to_string(),
        }
    }

    /// Bills of the session user, most recent first. Admins see every bill.
    pub async fn get_bills(&self) -> Result<Vec<Bill>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };

        let email = match self.session.user_type {
            UserType::Employee => Some(self.session.email.as_str()),
            UserType::Admin => None,
        };

        match store.list(email).await {
            Ok(mut bills) => {
                sort_bills_by_date_desc(&mut bills);
                log::info!("Loaded {} bills", bills.len());
                Ok(bills)
            }
            Err(e) => {
                log::error!("Failed to load bills: {}", e);
                Err(e)
            }
        }
    }
}
