use async_trait::async_trait;
use shared::{Bill, CreateBillResponse};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Non-success HTTP status, rendered as `Erreur 404`, `Erreur 500`...
    #[error("Erreur {status}")]
    Http { status: u16 },
    #[error("Erreur réseau : {0}")]
    Network(String),
    #[error("Réponse invalide : {0}")]
    Decode(String),
}

/// Receipt file posted to `create`, sent as multipart `file` and `email`
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptUploadRequest<F> {
    pub file: F,
    pub file_name: String,
    pub email: String,
}

/// Remote storage of bills
#[async_trait(?Send)]
pub trait BillStore {
    /// Browser file handle, or a stand-in in tests
    type File;

    /// Submitted bills, only those of `email` when given
    async fn list(&self, email: Option<&str>) -> Result<Vec<Bill>, StoreError>;

    /// Upload a receipt and open a draft bill for it
    async fn create(
        &self,
        upload: ReceiptUploadRequest<Self::File>,
    ) -> Result<CreateBillResponse, StoreError>;

    /// Persist the bill whose key is `selector`
    async fn update(&self, selector: &str, bill: &Bill) -> Result<Bill, StoreError>;
}
