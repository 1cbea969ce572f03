pub mod actions;
pub mod bills_page;
#[cfg(all(test, target_arch = "wasm32"))]
mod dom_test_support;
pub mod login_page;
pub mod new_bill_page;
pub mod receipt_modal;
pub mod status_pages;
pub mod vertical_layout;

pub use bills_page::BillsPage;
pub use login_page::{home_route, LoginPage};
pub use new_bill_page::NewBillPage;
