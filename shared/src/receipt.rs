//! Receipt file validation and the upload state of a new bill.
//!
//! A receipt goes through `NoFile -> Uploading -> Uploaded | UploadFailed`.
//! Only an `Uploaded` receipt carries the file URL and bill key needed to
//! submit the bill, so submission is gated on that state.

use crate::CreateBillResponse;
use thiserror::Error;

/// Extensions accepted for receipt images (compared lower-cased)
pub const ALLOWED_RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Prefix joined with the backend `filePath` to build a receipt URL
pub const RECEIPT_BASE_URL: &str = "http://localhost:3000/";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReceiptError {
    #[error("Aucun fichier sélectionné")]
    MissingFile,
    #[error("Seuls les fichiers jpg, jpeg et png sont acceptés")]
    DisallowedExtension(String),
}

/// Extract the file name from a file input value such as `C:\fakepath\test.jpg`
pub fn file_name_from_input(input_value: &str) -> &str {
    input_value
        .rsplit(|c| c == '\\' || c == '/')
        .next()
        .unwrap_or(input_value)
}

/// Lower-cased text after the last dot. A name without a dot is its own extension.
pub fn receipt_extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}

/// Validate a file input value and return the receipt file name
pub fn validate_receipt(input_value: &str) -> Result<String, ReceiptError> {
    let file_name = file_name_from_input(input_value);
    if file_name.is_empty() {
        return Err(ReceiptError::MissingFile);
    }

    let extension = receipt_extension(file_name);
    if !ALLOWED_RECEIPT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ReceiptError::DisallowedExtension(extension));
    }

    Ok(file_name.to_string())
}

/// Absolute URL of an uploaded receipt
pub fn receipt_file_url(file_path: &str) -> String {
    format!("{}{}", RECEIPT_BASE_URL, file_path)
}

/// Receipt reference captured after a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedReceipt {
    pub file_url: String,
    pub file_name: String,
    /// Backend key of the draft bill, used as update selector
    pub bill_id: String,
}

/// Upload state of the receipt attached to a new bill
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReceiptUpload {
    #[default]
    NoFile,
    Uploading {
        file_name: String,
        attempt: u32,
    },
    Uploaded(UploadedReceipt),
    UploadFailed {
        file_name: String,
        message: String,
    },
}

impl ReceiptUpload {
    /// Start uploading `file_name`. Any earlier attempt is superseded.
    pub fn begin(file_name: impl Into<String>, attempt: u32) -> Self {
        ReceiptUpload::Uploading {
            file_name: file_name.into(),
            attempt,
        }
    }

    /// Apply a successful create response. Completions of superseded attempts are ignored.
    pub fn complete(self, attempt: u32, response: &CreateBillResponse) -> Self {
        match self {
            ReceiptUpload::Uploading {
                file_name,
                attempt: current,
            } if current == attempt => ReceiptUpload::Uploaded(UploadedReceipt {
                file_url: receipt_file_url(&response.file_path),
                file_name,
                bill_id: response.key.clone(),
            }),
            other => other,
        }
    }

    /// Record a failed upload. Failures of superseded attempts are ignored.
    pub fn fail(self, attempt: u32, message: impl Into<String>) -> Self {
        match self {
            ReceiptUpload::Uploading {
                file_name,
                attempt: current,
            } if current == attempt => ReceiptUpload::UploadFailed {
                file_name,
                message: message.into(),
            },
            other => other,
        }
    }

    pub fn uploaded(&self) -> Option<&UploadedReceipt> {
        match self {
            ReceiptUpload::Uploaded(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Whether the bill can be submitted
    pub fn is_ready(&self) -> bool {
        matches!(self, ReceiptUpload::Uploaded(_))
    }

    /// Whether an upload is in flight, shown as busy on the file input
    pub fn is_uploading(&self) -> bool {
        matches!(self, ReceiptUpload::Uploading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> CreateBillResponse {
        CreateBillResponse {
            key: "1234".to_string(),
            file_path: "public/abc.jpg".to_string(),
        }
    }

    #[test]
    fn test_file_name_from_input() {
        assert_eq!(file_name_from_input("C:\\fakepath\\test.jpg"), "test.jpg");
        assert_eq!(file_name_from_input("/home/me/receipt.png"), "receipt.png");
        assert_eq!(file_name_from_input("plain.jpeg"), "plain.jpeg");
        assert_eq!(file_name_from_input(""), "");
    }

    #[test]
    fn test_validate_receipt_accepts_images_case_insensitively() {
        for value in [
            "C:\\fakepath\\test.jpg",
            "C:\\fakepath\\TEST.JPG",
            "C:\\fakepath\\scan.Jpeg",
            "C:\\fakepath\\photo.PNG",
            "C:\\fakepath\\archive.tar.png",
        ] {
            assert!(validate_receipt(value).is_ok(), "{} should be accepted", value);
        }
        assert_eq!(validate_receipt("C:\\fakepath\\test.jpg").unwrap(), "test.jpg");
    }

    #[test]
    fn test_validate_receipt_rejects_other_extensions() {
        assert_eq!(
            validate_receipt("C:\\fakepath\\document.pdf"),
            Err(ReceiptError::DisallowedExtension("pdf".to_string()))
        );
        assert!(validate_receipt("C:\\fakepath\\image.gif").is_err());
        assert!(validate_receipt("C:\\fakepath\\photo.png.exe").is_err());
        assert_eq!(validate_receipt(""), Err(ReceiptError::MissingFile));
    }

    #[test]
    fn test_rejection_message() {
        let err = validate_receipt("document.pdf").unwrap_err();
        assert_eq!(err.to_string(), "Seuls les fichiers jpg, jpeg et png sont acceptés");
    }

    #[test]
    fn test_receipt_file_url() {
        assert_eq!(
            receipt_file_url("public/abc.jpg"),
            "http://localhost:3000/public/abc.jpg"
        );
    }

    #[test]
    fn test_upload_completes_into_uploaded() {
        let state = ReceiptUpload::begin("test.jpg", 1).complete(1, &response());

        assert!(state.is_ready());
        let receipt = state.uploaded().unwrap();
        assert_eq!(receipt.file_url, "http://localhost:3000/public/abc.jpg");
        assert_eq!(receipt.file_name, "test.jpg");
        assert_eq!(receipt.bill_id, "1234");
    }

    #[test]
    fn test_upload_failure() {
        let state = ReceiptUpload::begin("test.jpg", 1).fail(1, "Erreur 500");

        assert!(!state.is_ready());
        assert_eq!(
            state,
            ReceiptUpload::UploadFailed {
                file_name: "test.jpg".to_string(),
                message: "Erreur 500".to_string(),
            }
        );
    }

    #[test]
    fn test_superseded_attempt_is_ignored() {
        let state = ReceiptUpload::begin("second.png", 2);

        let after_stale_success = state.clone().complete(1, &response());
        assert_eq!(after_stale_success, state);

        let after_stale_failure = state.clone().fail(1, "boom");
        assert_eq!(after_stale_failure, state);
    }

    #[test]
    fn test_completion_without_upload_is_ignored() {
        assert_eq!(
            ReceiptUpload::NoFile.complete(1, &response()),
            ReceiptUpload::NoFile
        );
        assert!(!ReceiptUpload::NoFile.is_ready());
        assert!(ReceiptUpload::begin("a.jpg", 1).is_uploading());
    }

    #[test]
    fn test_uploading_ends_with_the_current_attempt() {
        let state = ReceiptUpload::begin("a.jpg", 3);
        assert!(state.is_uploading());

        assert!(state.clone().complete(2, &response()).is_uploading());
        assert!(!state.clone().complete(3, &response()).is_uploading());
        assert!(!state.fail(3, "boom").is_uploading());
        assert!(!ReceiptUpload::NoFile.is_uploading());
    }
}
