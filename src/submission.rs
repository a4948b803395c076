use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The payload handed to the document store after a document was stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSubmission {
    pub title: String,
    pub path_on_client: String,
    /// Base64 of the stamped pdf.
    pub version_data: String,
    /// Sha256 of the stamped pdf, lowercase hex.
    pub checksum: String,
}

impl DocumentSubmission {
    pub fn new(file_name: &str, pdf_bytes: &[u8]) -> Self {
        let title = file_name
            .strip_suffix(".pdf")
            .unwrap_or(file_name)
            .to_owned();
        DocumentSubmission {
            title,
            path_on_client: file_name.to_owned(),
            version_data: base64::encode(pdf_bytes),
            checksum: sha256_hex(pdf_bytes),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
