use crate::db::{DbConnection, DraftBill};
use crate::receipts::ReceiptStore;
use shared::{
    receipt_extension, sort_bills_by_date_desc, validate_receipt, Bill, BillStatus,
    CreateBillResponse,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BillServiceError {
    #[error("Bill not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Bill already submitted: {0}")]
    AlreadySubmitted(String),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// A receipt posted by the new bill form
#[derive(Debug, Clone)]
pub struct ReceiptUploadCommand {
    pub email: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct BillService {
    db: DbConnection,
    receipts: ReceiptStore,
}

impl BillService {
    pub fn new(db: DbConnection, receipts: ReceiptStore) -> Self {
        Self { db, receipts }
    }

    /// Store an uploaded receipt and open a draft bill for it
    pub async fn create_bill(
        &self,
        command: ReceiptUploadCommand,
    ) -> Result<CreateBillResponse, BillServiceError> {
        info!("Creating bill for {} with receipt {}", command.email, command.file_name);

        if command.email.trim().is_empty() {
            return Err(BillServiceError::Validation("Missing email".to_string()));
        }
        let file_name = validate_receipt(&command.file_name)
            .map_err(|e| BillServiceError::Validation(e.to_string()))?;

        let key = Bill::generate_key();
        let stored_name = format!("{}.{}", key, receipt_extension(&file_name));
        let file_path = self.receipts.save(&stored_name, &command.bytes).await?;

        let draft = DraftBill {
            id: key.clone(),
            email: command.email,
            file_name,
            file_path: file_path.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.db.insert_draft(&draft).await?;

        info!("Created draft bill {} at {}", key, file_path);
        Ok(CreateBillResponse { key, file_path })
    }

    /// Submit the form values of a draft bill.
    /// A bill is submitted once, always as pending, with the receipt name
    /// recorded at upload.
    pub async fn update_bill(&self, key: &str, bill: Bill) -> Result<Bill, BillServiceError> {
        info!("Updating bill {}", key);

        let stored = self
            .db
            .get_bill(key)
            .await?
            .ok_or_else(|| BillServiceError::NotFound(key.to_string()))?;

        if stored.submitted {
            warn!("Bill {} was already submitted", key);
            return Err(BillServiceError::AlreadySubmitted(key.to_string()));
        }
        if stored.bill.email != bill.email {
            return Err(BillServiceError::Validation(format!(
                "Bill {} does not belong to {}",
                key, bill.email
            )));
        }
        if bill.file_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
            return Err(BillServiceError::Validation(format!(
                "Bill {} has no receipt URL",
                key
            )));
        }

        let bill = Bill {
            id: Some(key.to_string()),
            file_name: stored.bill.file_name,
            status: BillStatus::Pending,
            ..bill
        };
        let submitted_at = chrono::Utc::now().to_rfc3339();
        if !self.db.submit_bill(key, &bill, &submitted_at).await? {
            // Another request submitted it since the read above
            return Err(BillServiceError::AlreadySubmitted(key.to_string()));
        }

        Ok(bill)
    }

    /// Submitted bills, most recent first
    pub async fn list_bills(&self, email: Option<&str>) -> Result<Vec<Bill>, BillServiceError> {
        let mut bills = self.db.list_bills(email).await?;
        sort_bills_by_date_desc(&mut bills);

        info!("Returning {} bills", bills.len());
        Ok(bills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test() -> (BillService, TempDir) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = BillService::new(db, ReceiptStore::new(temp_dir.path()));
        (service, temp_dir)
    }

    fn upload(email: &str, file_name: &str) -> ReceiptUploadCommand {
        ReceiptUploadCommand {
            email: email.to_string(),
            file_name: file_name.to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    fn form_bill(email: &str, date: &str) -> Bill {
        Bill {
            id: None,
            email: email.to_string(),
            expense_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            amount: 348,
            date: date.to_string(),
            vat: "70".to_string(),
            pct: 20,
            commentary: String::new(),
            file_url: Some("http://localhost:3000/public/x.jpg".to_string()),
            file_name: Some("test.jpg".to_string()),
            status: BillStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_create_bill_stores_receipt() {
        let (service, temp_dir) = setup_test().await;

        let response = service.create_bill(upload("a@a", "Test.JPG")).await.unwrap();

        assert!(!response.key.is_empty());
        assert_eq!(response.file_path, format!("public/{}.jpg", response.key));
        assert!(temp_dir.path().join(format!("{}.jpg", response.key)).exists());
    }

    #[tokio::test]
    async fn test_create_bill_rejects_bad_extension() {
        let (service, _temp_dir) = setup_test().await;

        let result = service.create_bill(upload("a@a", "document.pdf")).await;
        assert!(matches!(result, Err(BillServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_bill_requires_email() {
        let (service, _temp_dir) = setup_test().await;

        let result = service.create_bill(upload(" ", "test.png")).await;
        assert!(matches!(result, Err(BillServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_bill_submits_draft() {
        let (service, _temp_dir) = setup_test().await;
        let created = service.create_bill(upload("a@a", "test.jpg")).await.unwrap();

        assert!(service.list_bills(None).await.unwrap().is_empty());

        let updated = service
            .update_bill(&created.key, form_bill("a@a", "2023-01-01"))
            .await
            .unwrap();
        assert_eq!(updated.id.as_deref(), Some(created.key.as_str()));

        let listed = service.list_bills(Some("a@a")).await.unwrap();
        assert_eq!(listed, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_unknown_bill() {
        let (service, _temp_dir) = setup_test().await;

        let result = service.update_bill("missing", form_bill("a@a", "2023-01-01")).await;
        assert!(matches!(result, Err(BillServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_bill_of_another_employee() {
        let (service, _temp_dir) = setup_test().await;
        let created = service.create_bill(upload("a@a", "test.jpg")).await.unwrap();

        let result = service.update_bill(&created.key, form_bill("b@b", "2023-01-01")).await;
        assert!(matches!(result, Err(BillServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_bill_forces_pending_status() {
        let (service, _temp_dir) = setup_test().await;
        let created = service.create_bill(upload("a@a", "test.jpg")).await.unwrap();

        let mut bill = form_bill("a@a", "2023-01-01");
        bill.status = BillStatus::Accepted;
        let updated = service.update_bill(&created.key, bill).await.unwrap();

        assert_eq!(updated.status, BillStatus::Pending);
        let listed = service.list_bills(None).await.unwrap();
        assert_eq!(listed[0].status, BillStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_bill_twice_is_rejected() {
        let (service, _temp_dir) = setup_test().await;
        let created = service.create_bill(upload("a@a", "test.jpg")).await.unwrap();
        service
            .update_bill(&created.key, form_bill("a@a", "2023-01-01"))
            .await
            .unwrap();

        let mut edited = form_bill("a@a", "2023-01-01");
        edited.amount = 1;
        let result = service.update_bill(&created.key, edited).await;
        assert!(matches!(result, Err(BillServiceError::AlreadySubmitted(_))));

        let listed = service.list_bills(None).await.unwrap();
        assert_eq!(listed[0].amount, 348);
    }

    #[tokio::test]
    async fn test_update_bill_requires_file_url() {
        let (service, _temp_dir) = setup_test().await;
        let created = service.create_bill(upload("a@a", "test.jpg")).await.unwrap();

        let mut bill = form_bill("a@a", "2023-01-01");
        bill.file_url = None;
        let result = service.update_bill(&created.key, bill).await;
        assert!(matches!(result, Err(BillServiceError::Validation(_))));

        let mut bill = form_bill("a@a", "2023-01-01");
        bill.file_url = Some(String::new());
        let result = service.update_bill(&created.key, bill).await;
        assert!(matches!(result, Err(BillServiceError::Validation(_))));

        assert!(service.list_bills(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_bill_keeps_uploaded_file_name() {
        let (service, _temp_dir) = setup_test().await;
        let created = service.create_bill(upload("a@a", "Facture.PNG")).await.unwrap();

        let mut bill = form_bill("a@a", "2023-01-01");
        bill.file_name = Some("other.jpg".to_string());
        let updated = service.update_bill(&created.key, bill).await.unwrap();

        assert_eq!(updated.file_name.as_deref(), Some("Facture.PNG"));
        let listed = service.list_bills(None).await.unwrap();
        assert_eq!(listed[0].file_name.as_deref(), Some("Facture.PNG"));
    }

    #[tokio::test]
    async fn test_list_bills_sorted_by_date() {
        let (service, _temp_dir) = setup_test().await;
        for date in ["2001-01-01", "2004-04-04", "2002-02-02"] {
            let created = service.create_bill(upload("a@a", "test.jpg")).await.unwrap();
            service.update_bill(&created.key, form_bill("a@a", date)).await.unwrap();
        }

        let dates: Vec<String> = service
            .list_bills(None)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.date)
            .collect();
        assert_eq!(dates, vec!["2004-04-04", "2002-02-02", "2001-01-01"]);
    }
}
