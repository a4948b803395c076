use crate::{
    config::StamperConfig,
    image_insert::InsertImage,
    image_insert_to_page::InsertImageToPage,
    image_xobject::ImageXObject,
    lopdf_utils,
    output::{EncodedDocument, OutputEncoding},
    placement::PlacementPolicy,
    rectangle::{Rectangle, Size},
    signature_image::SignatureImage,
    utils::pdf_date,
    Error,
};
use lopdf::{
    content::{Content, Operation},
    Document, Object, ObjectId,
};
use std::collections::HashMap;

/// Name used for the producer entry of stamped documents.
const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Soft masks need pdf 1.4.
const SOFT_MASK_MIN_VERSION: &str = "1.4";

/// An editable, parsed copy of a source document.
#[derive(Debug, Clone)]
pub struct StampingDocument {
    document: Document,
    /// Link between an image key and the objectId of the embedded image.
    /// This is used so an image drawn on many pages is stored only once.
    image_object_ids: HashMap<String, ObjectId>,
}

impl StampingDocument {
    /// Parse `bytes`. Any failure is reported as `Error::Parse`.
    pub fn load_mem(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::Parse("empty document".to_owned()));
        }
        let document =
            Document::load_mem(bytes).map_err(|err| Error::Parse(err.to_string()))?;
        if document.trailer.get(b"Encrypt").is_ok() {
            return Err(Error::Parse(
                "encrypted documents are not supported".to_owned(),
            ));
        }
        lopdf_utils::pages_root_id(&document)?;

        Ok(StampingDocument {
            document,
            image_object_ids: HashMap::new(),
        })
    }

    /// Page ids in page order.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.document.get_pages().into_values().collect()
    }

    /// The page's media box, if it has a usable one.
    pub fn page_box(&self, page_id: ObjectId) -> Option<Rectangle> {
        lopdf_utils::page_box(&self.document, page_id)
    }

    pub fn append_blank_page(&mut self, size: Size) -> Result<ObjectId, Error> {
        lopdf_utils::append_blank_page(&mut self.document, size)
    }

    /// Embed `image` once under `key` and return the id of the image XObject.
    pub fn embed_image(&mut self, key: &str, image: &SignatureImage) -> ObjectId {
        if let Some(object_id) = self.image_object_ids.get(key) {
            return *object_id;
        }
        if image.alpha_samples().is_some() {
            self.require_version(SOFT_MASK_MIN_VERSION);
        }
        let object_id = self.insert_image(&ImageXObject::from(image));
        self.image_object_ids.insert(key.to_owned(), object_id);
        object_id
    }

    fn require_version(&mut self, minimum: &str) {
        let current = self.document.version.parse::<f32>().unwrap_or(0.0);
        let wanted = minimum.parse::<f32>().unwrap_or(0.0);
        if current < wanted {
            log::debug!(
                "Raising pdf version from {} to {}.",
                self.document.version,
                minimum
            );
            self.document.version = minimum.to_owned();
        }
    }

    pub fn update_info(&mut self, mod_date: &str) -> Result<(), Error> {
        lopdf_utils::update_info(&mut self.document, PRODUCER, mod_date)
    }

    /// Compress and serialize into a fresh buffer.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, Error> {
        self.document.compress();
        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl InsertImage for StampingDocument {
    fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.document.add_object(object)
    }
}

impl InsertImageToPage for StampingDocument {
    fn add_xobject(&mut self, page_id: ObjectId, xobject_id: ObjectId) -> Result<String, Error> {
        lopdf_utils::add_xobject(&mut self.document, page_id, xobject_id)
    }

    fn add_to_page_content(
        &mut self,
        page_id: ObjectId,
        content: Content<Vec<Operation>>,
    ) -> Result<(), Error> {
        lopdf_utils::append_page_content(&mut self.document, page_id, content)
    }
}

/// Where one stamp was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStamp {
    /// 1-based page number in the output document.
    pub page_number: u32,
    pub rect: Rectangle,
}

/// The result of a stamp: new pdf bytes plus what was done to them.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedDocument {
    bytes: Vec<u8>,
    page_count: usize,
    stamps: Vec<PageStamp>,
}

impl StampedDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Stamps in page order.
    pub fn stamps(&self) -> &[PageStamp] {
        &self.stamps
    }

    pub fn encode(&self, encoding: OutputEncoding) -> EncodedDocument {
        encoding.encode(&self.bytes)
    }
}

/// Composites a signature image onto pdf pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStamper {
    scale: f64,
    default_page_size: Size,
    update_metadata: bool,
}

impl Default for PdfStamper {
    fn default() -> Self {
        Self::with_settings(&StamperConfig::default())
    }
}

impl PdfStamper {
    /// Build a stamper from a validated `config`.
    pub fn from_config(config: &StamperConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::with_settings(config))
    }

    fn with_settings(config: &StamperConfig) -> Self {
        PdfStamper {
            scale: config.scale,
            default_page_size: config.blank_page_size,
            update_metadata: config.update_metadata,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Stamp `signature_png` onto `source_pdf` according to `policy`.
    /// The inputs are only read; either a complete new document is returned or an error.
    pub fn stamp(
        &self,
        source_pdf: &[u8],
        signature_png: &[u8],
        policy: PlacementPolicy,
    ) -> Result<StampedDocument, Error> {
        let mut document = StampingDocument::load_mem(source_pdf)?;
        let image = SignatureImage::decode(signature_png)?;
        let stamp_size = image.native_size().scale(self.scale);

        let targets = if policy.appends_page() {
            vec![document.append_blank_page(self.default_page_size)?]
        } else {
            document.page_ids()
        };
        if targets.is_empty() {
            log::warn!("Document has no pages, nothing was stamped.");
        }

        let all_pages = document.page_ids();
        let mut stamps = Vec::with_capacity(targets.len());
        for page_id in targets {
            let page_box = document.page_box(page_id).unwrap_or_else(|| {
                log::warn!(
                    "Page {:?} has no media box, assuming {}x{}.",
                    page_id,
                    self.default_page_size.width,
                    self.default_page_size.height
                );
                Rectangle::from(self.default_page_size)
            });
            let rect = policy.rectangle(page_box, stamp_size);
            let image_id = document.embed_image("signature", &image);
            document.insert_image_to_page(page_id, image_id, rect)?;

            let page_number = all_pages
                .iter()
                .position(|id| *id == page_id)
                .map(|index| index as u32 + 1)
                .unwrap_or_default();
            log::debug!("Stamped page {} at {:?}.", page_number, rect);
            stamps.push(PageStamp { page_number, rect });
        }

        if self.update_metadata {
            document.update_info(&pdf_date(chrono::Utc::now()))?;
        }

        let page_count = all_pages.len();
        let bytes = document.into_bytes()?;
        log::info!(
            "Stamped {} of {} pages ({} bytes).",
            stamps.len(),
            page_count,
            bytes.len()
        );
        Ok(StampedDocument {
            bytes,
            page_count,
            stamps,
        })
    }

    /// `stamp`, then encode the result as text.
    pub fn stamp_encoded(
        &self,
        source_pdf: &[u8],
        signature_png: &[u8],
        policy: PlacementPolicy,
        encoding: OutputEncoding,
    ) -> Result<EncodedDocument, Error> {
        Ok(self
            .stamp(source_pdf, signature_png, policy)?
            .encode(encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pdf_is_parse_error() {
        assert!(matches!(
            StampingDocument::load_mem(&[]),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_truncated_header_is_parse_error() {
        assert!(matches!(
            StampingDocument::load_mem(b"%PD"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_default_stamper_uses_half_scale() {
        assert_eq!(PdfStamper::default().scale(), 0.5);
    }

    #[test]
    fn test_from_config_rejects_unusable_scale() {
        for scale in [f64::NAN, f64::INFINITY, 0.0, -0.5] {
            let result = PdfStamper::from_config(&StamperConfig::new().with_scale(scale));
            assert!(matches!(result, Err(Error::InvalidConfig(_))), "{}", scale);
        }
    }

    #[test]
    fn test_from_config_keeps_valid_settings() {
        let config = StamperConfig::new()
            .with_scale(0.25)
            .with_blank_page_size(Size::a4());
        let stamper = PdfStamper::from_config(&config).unwrap();
        assert_eq!(stamper.scale(), 0.25);
        assert_eq!(stamper.default_page_size, Size::a4());
    }
}
