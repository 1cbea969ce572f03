//! In-memory store and spies shared by the container tests.

use async_trait::async_trait;
use shared::{Bill, BillStatus, CreateBillResponse, User, UserType};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::Notify;
use yew::Callback;

use crate::services::store::{BillStore, ReceiptUploadRequest, StoreError};

/// Receipts whose name starts with this prefix wait on [`MockStore::release`]
pub const SLOW_PREFIX: &str = "slow";

#[derive(Clone, Default)]
pub struct MockStore {
    bills: Rc<RefCell<Vec<Bill>>>,
    list_error: Rc<RefCell<Option<StoreError>>>,
    create_error: Rc<RefCell<Option<StoreError>>>,
    update_error: Rc<RefCell<Option<StoreError>>>,
    gate: Rc<Notify>,
    pub list_calls: Rc<RefCell<Vec<Option<String>>>>,
    pub create_calls: Rc<RefCell<Vec<ReceiptUploadRequest<String>>>>,
    pub update_calls: Rc<RefCell<Vec<(String, Bill)>>>,
    /// Store calls and navigations in the order they happened
    pub events: Rc<RefCell<Vec<String>>>,
}

impl MockStore {
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        let store = Self::default();
        *store.bills.borrow_mut() = bills;
        store
    }

    pub fn fail_list_with(&self, error: StoreError) {
        *self.list_error.borrow_mut() = Some(error);
    }

    pub fn fail_create_with(&self, error: StoreError) {
        *self.create_error.borrow_mut() = Some(error);
    }

    pub fn fail_update_with(&self, error: StoreError) {
        *self.update_error.borrow_mut() = Some(error);
    }

    /// Let one waiting slow upload finish
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Navigation callback recording into the same event log as the store
    pub fn navigation_recorder(&self) -> Callback<shared::Route> {
        let events = self.events.clone();
        Callback::from(move |route| events.borrow_mut().push(format!("navigate {:?}", route)))
    }
}

#[async_trait(?Send)]
impl BillStore for MockStore {
    type File = String;

    async fn list(&self, email: Option<&str>) -> Result<Vec<Bill>, StoreError> {
        self.list_calls.borrow_mut().push(email.map(str::to_string));
        self.events.borrow_mut().push("list".to_string());

        if let Some(error) = self.list_error.borrow().clone() {
            return Err(error);
        }
        Ok(self.bills.borrow().clone())
    }

    async fn create(
        &self,
        upload: ReceiptUploadRequest<String>,
    ) -> Result<CreateBillResponse, StoreError> {
        let call = self.create_calls.borrow().len() + 1;
        let file_name = upload.file_name.clone();
        self.create_calls.borrow_mut().push(upload);
        self.events.borrow_mut().push(format!("create {}", file_name));

        if file_name.starts_with(SLOW_PREFIX) {
            self.gate.notified().await;
        }

        if let Some(error) = self.create_error.borrow().clone() {
            return Err(error);
        }
        Ok(CreateBillResponse {
            key: format!("key-{}", call),
            file_path: format!("public/{}", file_name),
        })
    }

    async fn update(&self, selector: &str, bill: &Bill) -> Result<Bill, StoreError> {
        self.update_calls
            .borrow_mut()
            .push((selector.to_string(), bill.clone()));
        self.events.borrow_mut().push(format!("update {}", selector));

        if let Some(error) = self.update_error.borrow().clone() {
            return Err(error);
        }
        Ok(bill.clone())
    }
}

/// Callback recording every value it is called with
pub fn spy<T: 'static>() -> (Callback<T>, Rc<RefCell<Vec<T>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let recorded = calls.clone();
    (Callback::from(move |value| recorded.borrow_mut().push(value)), calls)
}

pub fn navigation_spy() -> (Callback<shared::Route>, Rc<RefCell<Vec<shared::Route>>>) {
    spy()
}

pub fn employee() -> User {
    User {
        user_type: UserType::Employee,
        email: "employee@test.com".to_string(),
    }
}

pub fn bill(name: &str, date: &str) -> Bill {
    Bill {
        id: Some(name.to_string()),
        email: "employee@test.com".to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: name.to_string(),
        amount: 400,
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        file_url: Some(format!("http://localhost:3000/public/{}.jpg", name)),
        file_name: Some(format!("{}.jpg", name)),
        status: BillStatus::Pending,
    }
}
