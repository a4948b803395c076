use serde::{Deserialize, Serialize};

const PDF_DATA_URI_PREFIX: &str = "data:application/pdf;base64,";

/// How the stamped document is handed back as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputEncoding {
    /// `data:application/pdf;base64,<bytes>`
    DataUri,
    /// Bare base64 text.
    Base64,
}

impl Default for OutputEncoding {
    fn default() -> Self {
        OutputEncoding::DataUri
    }
}

impl OutputEncoding {
    pub fn encode(&self, bytes: &[u8]) -> EncodedDocument {
        let base64 = base64::encode(bytes);
        match self {
            OutputEncoding::DataUri => {
                EncodedDocument::DataUri(format!("{}{}", PDF_DATA_URI_PREFIX, base64))
            }
            OutputEncoding::Base64 => EncodedDocument::Base64(base64),
        }
    }
}

/// A stamped document as text. The variant records which contract produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedDocument {
    DataUri(String),
    Base64(String),
}

impl EncodedDocument {
    pub fn encoding(&self) -> OutputEncoding {
        match self {
            EncodedDocument::DataUri(_) => OutputEncoding::DataUri,
            EncodedDocument::Base64(_) => OutputEncoding::Base64,
        }
    }

    /// The full text as produced.
    pub fn as_str(&self) -> &str {
        match self {
            EncodedDocument::DataUri(text) | EncodedDocument::Base64(text) => text,
        }
    }

    /// The part a consumer stores: everything after the first comma of a data URI,
    /// or the whole text for bare base64.
    pub fn payload(&self) -> &str {
        match self {
            EncodedDocument::DataUri(text) => text
                .split_once(',')
                .map(|(_, data)| data)
                .unwrap_or_default(),
            EncodedDocument::Base64(text) => text,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            EncodedDocument::DataUri(text) | EncodedDocument::Base64(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_uri_payload_drops_prefix() {
        let encoded = OutputEncoding::DataUri.encode(b"%PDF-1.5");
        assert_eq!(encoded.as_str(), "data:application/pdf;base64,JVBERi0xLjU=");
        assert_eq!(encoded.payload(), "JVBERi0xLjU=");
        assert_eq!(encoded.encoding(), OutputEncoding::DataUri);
    }

    #[test]
    fn test_base64_payload_is_whole_text() {
        let encoded = OutputEncoding::Base64.encode(b"%PDF-1.5");
        assert_eq!(encoded.as_str(), "JVBERi0xLjU=");
        assert_eq!(encoded.payload(), encoded.as_str());
        assert_eq!(encoded.into_string(), "JVBERi0xLjU=");
    }
}
