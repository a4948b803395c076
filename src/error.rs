use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The source document could not be parsed as a pdf.
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    /// The signature could not be decoded as a png image.
    #[error("Failed to decode signature image: {0}")]
    ImageDecode(String),

    /// A collaborator the component depends on was never provided.
    #[error("Resource not loaded: {0}")]
    ResourceLoad(String),

    /// The external document store rejected or failed the submission.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Host input that is neither base64 text nor a base64 `data:` URI.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("PDF operation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
