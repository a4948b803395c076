//! Stamp a captured signature image onto an existing pdf document.
//!
//! The core is [`PdfStamper`]: pdf bytes and png bytes in, new pdf bytes out.
//! [`SignPdfComponent`] wires it to a signature pad, a workflow state sink and an
//! optional document store.

mod component;
mod config;
mod error;
mod image_insert;
mod image_insert_to_page;
mod image_xobject;
mod lopdf_utils;
mod output;
mod placement;
mod rectangle;
mod signature_image;
mod stamper;
mod submission;
mod utils;

pub use component::{
    ConfigurableInput, DocumentStore, PersistenceHandle, SaveOutcome, SignPdfComponent,
    SignaturePad, StampRequestHandler, WorkflowState,
};
pub use config::{StamperConfig, DEFAULT_SCALE};
pub use error::Error;
pub use image_insert::InsertImage;
pub use image_insert_to_page::InsertImageToPage;
pub use image_xobject::ImageXObject;
pub use lopdf;
pub use output::{EncodedDocument, OutputEncoding};
pub use placement::PlacementPolicy;
pub use rectangle::{Rectangle, Size};
pub use signature_image::{ColorSpace, SignatureImage};
pub use stamper::{PageStamp, PdfStamper, StampedDocument, StampingDocument};
pub use submission::{sha256_hex, DocumentSubmission};
pub use utils::decode_payload;

/// Stamp with the default configuration (half scale, Letter sized blank pages).
pub fn stamp(
    source_pdf: &[u8],
    signature_png: &[u8],
    policy: PlacementPolicy,
) -> Result<StampedDocument, Error> {
    PdfStamper::default().stamp(source_pdf, signature_png, policy)
}
