pub mod use_bills;
pub mod use_new_bill;

pub use use_bills::use_bills;
pub use use_new_bill::use_new_bill;
