use crate::{rectangle::Size, Error};
use png::{ColorType, Transformations};
use std::io::Cursor;

/// Pdf colour space of the decoded colour samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRGB,
}

impl ColorSpace {
    pub fn name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }

    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }
}

/// A decoded png signature, split into colour samples and an optional alpha plane
/// so it can be embedded as an image XObject with a soft mask.
/// All samples are 8 bits per component.
#[derive(Debug, Clone)]
pub struct SignatureImage {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    color: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl SignatureImage {
    /// Decode png bytes. Palette images and `tRNS` chunks are expanded,
    /// 16 bit samples are reduced to 8 bits.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::ImageDecode("empty image data".to_owned()));
        }

        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|err| Error::ImageDecode(err.to_string()))?;
        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buffer)
            .map_err(|err| Error::ImageDecode(err.to_string()))?;
        buffer.truncate(info.buffer_size());

        if info.width == 0 || info.height == 0 {
            return Err(Error::ImageDecode("image has no pixels".to_owned()));
        }

        let (color_space, has_alpha) = match info.color_type {
            ColorType::Grayscale => (ColorSpace::DeviceGray, false),
            ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, true),
            ColorType::Rgb => (ColorSpace::DeviceRGB, false),
            ColorType::Rgba => (ColorSpace::DeviceRGB, true),
            ColorType::Indexed => {
                return Err(Error::ImageDecode(
                    "palette image was not expanded".to_owned(),
                ))
            }
        };

        let (color, alpha) = if has_alpha {
            let (color, alpha) = split_alpha(&buffer, color_space.components());
            (color, Some(alpha))
        } else {
            (buffer, None)
        };

        let expected = info.width as usize * info.height as usize * color_space.components();
        if color.len() != expected {
            return Err(Error::ImageDecode(format!(
                "decoded {} colour bytes, expected {}",
                color.len(),
                expected
            )));
        }

        Ok(SignatureImage {
            width: info.width,
            height: info.height,
            color_space,
            color,
            alpha,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Native size, one user-space unit per pixel.
    pub fn native_size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn color_samples(&self) -> &[u8] {
        &self.color
    }

    pub fn alpha_samples(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }
}

/// Separate interleaved `components + 1` samples into colour and alpha planes.
fn split_alpha(samples: &[u8], components: usize) -> (Vec<u8>, Vec<u8>) {
    let stride = components + 1;
    let pixels = samples.len() / stride;
    let mut color = Vec::with_capacity(pixels * components);
    let mut alpha = Vec::with_capacity(pixels);
    for pixel in samples.chunks_exact(stride) {
        color.extend_from_slice(&pixel[..components]);
        alpha.push(pixel[components]);
    }
    (color, alpha)
}
