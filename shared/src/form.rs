use crate::{Bill, BillStatus, UploadedReceipt};
use thiserror::Error;

/// Percentage applied when the form field is empty, unparsable or zero
pub const DEFAULT_PCT: i64 = 20;

/// Raw values of the new bill form, as read from the inputs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Montant invalide : {0:?}")]
    InvalidAmount(String),
}

/// Integer prefix of `input`: leading whitespace, optional sign, then digits.
/// Parsing stops at the first other character; `None` when no digit was read.
/// Values beyond the `i64` range saturate to `i64::MAX` / `i64::MIN`.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().map(|d| i64::from(d - b'0')).fold(0i64, |acc, d| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(d)
        } else {
            acc.saturating_add(d)
        }
    });
    Some(value)
}

impl NewBillForm {
    /// Assemble a pending bill for `email` with the uploaded receipt attached
    pub fn into_bill(self, email: &str, receipt: &UploadedReceipt) -> Result<Bill, FormError> {
        let amount =
            parse_int_prefix(&self.amount).ok_or_else(|| FormError::InvalidAmount(self.amount.clone()))?;

        // zero falls back too
        let pct = parse_int_prefix(&self.pct)
            .filter(|pct| *pct != 0)
            .unwrap_or(DEFAULT_PCT);

        Ok(Bill {
            id: Some(receipt.bill_id.clone()),
            email: email.to_string(),
            expense_type: self.expense_type,
            name: self.name,
            amount,
            date: self.date,
            vat: self.vat,
            pct,
            commentary: self.commentary,
            file_url: Some(receipt.file_url.clone()),
            file_name: Some(receipt.file_name.clone()),
            status: BillStatus::Pending,
        })
    }
}
