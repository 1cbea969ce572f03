use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{Bill, CreateBillResponse};
use web_sys::{File, FormData};

use super::store::{BillStore, ReceiptUploadRequest, StoreError};

/// Backend root used by the web client
pub const API_BASE_URL: &str = "http://localhost:3000";

/// Log relay endpoint under `base_url`
pub fn logs_url(base_url: &str) -> String {
    format!("{}/api/logs", base_url.trim_end_matches('/'))
}

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
        }
    }

    fn bills_url(&self) -> String {
        format!("{}/api/bills", self.base_url.trim_end_matches('/'))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        if !response.ok() {
            return Err(StoreError::Http {
                status: response.status(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl BillStore for ApiClient {
    type File = File;

    async fn list(&self, email: Option<&str>) -> Result<Vec<Bill>, StoreError> {
        let mut request = Request::get(&self.bills_url());
        if let Some(email) = email {
            request = request.query([("email", email)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    async fn create(
        &self,
        upload: ReceiptUploadRequest<File>,
    ) -> Result<CreateBillResponse, StoreError> {
        let form_data =
            FormData::new().map_err(|e| StoreError::Network(format!("{:?}", e)))?;
        form_data
            .append_with_blob_and_filename("file", &upload.file, &upload.file_name)
            .map_err(|e| StoreError::Network(format!("{:?}", e)))?;
        form_data
            .append_with_str("email", &upload.email)
            .map_err(|e| StoreError::Network(format!("{:?}", e)))?;

        // The browser sets the multipart boundary itself
        let response = Request::post(&self.bills_url())
            .body(form_data)
            .map_err(|e| StoreError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::parse(response).await
    }

    async fn update(&self, selector: &str, bill: &Bill) -> Result<Bill, StoreError> {
        let url = format!("{}/{}", self.bills_url(), selector);

        let response = Request::patch(&url)
            .json(bill)
            .map_err(|e| StoreError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::parse(response).await
    }
}
