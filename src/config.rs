//! Configuration for stamping and for the signing component.

use crate::{output::OutputEncoding, placement::PlacementPolicy, rectangle::Size, Error};
use serde::{Deserialize, Serialize};

/// Fraction of the signature's pixel size used as its size on the page.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Stamping and persistence configuration, usually handed over by the host as json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StamperConfig {
    /// Which pages receive the stamp.
    pub placement: PlacementPolicy,

    /// Text form of the stamped document.
    pub encoding: OutputEncoding,

    /// Scale applied to the signature's native pixel size.
    pub scale: f64,

    /// Size of a page appended by `PlacementPolicy::AppendBlankPage`,
    /// also used for pages without a media box.
    ///
    /// Defaults to US Letter, which places a 200x80 pixel signature at (331, 356).
    /// pdf-lib's `addPage()` without arguments may pick another size, so hosts that
    /// need identical output to a pdf-lib stamp should set this explicitly.
    pub blank_page_size: Size,

    /// Write `/Producer` and `/ModDate` into the document information dictionary.
    pub update_metadata: bool,

    /// Submit the stamped document to the document store after a save.
    pub persist: bool,

    /// Title of the submitted document.
    pub file_name: String,
}

impl Default for StamperConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StamperConfig {
    pub fn new() -> Self {
        Self {
            placement: PlacementPolicy::default(),
            encoding: OutputEncoding::default(),
            scale: DEFAULT_SCALE,
            blank_page_size: Size::letter(),
            update_metadata: true,
            persist: false,
            file_name: "signed.pdf".to_owned(),
        }
    }

    /// Parse and validate a json configuration. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        let page = self.blank_page_size;
        if !(page.width.is_finite() && page.height.is_finite())
            || page.width <= 0.0
            || page.height <= 0.0
        {
            return Err(Error::InvalidConfig(format!(
                "blank page size must be positive, got {}x{}",
                page.width, page.height
            )));
        }
        if self.file_name.trim().is_empty() {
            return Err(Error::InvalidConfig("file name must not be empty".to_owned()));
        }
        Ok(())
    }

    pub fn with_placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_blank_page_size(mut self, size: Size) -> Self {
        self.blank_page_size = size;
        self
    }

    pub fn with_metadata(mut self, enable: bool) -> Self {
        self.update_metadata = enable;
        self
    }

    pub fn with_persist(mut self, enable: bool) -> Self {
        self.persist = enable;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}
