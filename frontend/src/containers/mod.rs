pub mod bills;
pub mod new_bill;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod test_support;

pub use bills::{BillsContainer, ReceiptModal};
pub use new_bill::{NewBillContainer, SubmitError};
