use serde::{Deserialize, Serialize};
use std::fmt;

pub mod form;
pub mod receipt;
pub mod sorting;

pub use form::{parse_int_prefix, FormError, NewBillForm, DEFAULT_PCT};
pub use receipt::{
    file_name_from_input, receipt_extension, receipt_file_url, validate_receipt, ReceiptError,
    ReceiptUpload, UploadedReceipt, ALLOWED_RECEIPT_EXTENSIONS, RECEIPT_BASE_URL,
};
pub use sorting::{parse_bill_date, sort_bills_by_date_desc};

/// An expense report submitted by an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Key assigned by the backend when the receipt was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    /// Expense category, one of [`EXPENSE_TYPES`] when created from the form
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    /// Date as entered in the date picker (YYYY-MM-DD)
    pub date: String,
    pub vat: String,
    pub pct: i64,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
}

/// Review state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// Label shown in the bills table
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }

    pub fn parse(value: &str) -> Result<Self, BillStatusError> {
        match value {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            other => Err(BillStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillStatusError(pub String);

impl fmt::Display for BillStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown bill status: {}", self.0)
    }
}

impl std::error::Error for BillStatusError {}

impl Bill {
    /// Generate a bill key for a freshly uploaded receipt
    pub fn generate_key() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Categories offered by the new bill form
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Response returned by the backend after a receipt upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillResponse {
    /// Key identifying the draft bill, used as selector for the later update
    pub key: String,
    /// Path of the stored receipt, relative to the backend root
    pub file_path: String,
}

/// Role of the signed in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// Authenticated identity, stored as JSON under the `user` key of local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
}

/// Named application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    /// Location hash for this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    /// Resolve a location hash, unknown hashes land on the login view
    pub fn from_path(path: &str) -> Route {
        match path {
            "#employee/bills" => Route::Bills,
            "#employee/bill/new" => Route::NewBill,
            "#admin/dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }
}

/// Log record relayed from the frontend to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}
