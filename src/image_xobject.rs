use crate::signature_image::{ColorSpace, SignatureImage};
use lopdf::{dictionary, Dictionary, Stream};

/// An image XObject ready to be added to a document.
/// The soft mask, when present, must be added first so its id can be referenced.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub bits_per_component: u8,
    pub image_data: Vec<u8>,
    pub soft_mask: Option<Vec<u8>>,
}

impl From<&SignatureImage> for ImageXObject {
    fn from(image: &SignatureImage) -> Self {
        ImageXObject {
            width: image.width(),
            height: image.height(),
            color_space: image.color_space(),
            bits_per_component: 8,
            image_data: image.color_samples().to_vec(),
            soft_mask: image.alpha_samples().map(|alpha| alpha.to_vec()),
        }
    }
}

impl ImageXObject {
    fn image_dictionary(&self, color_space: &str) -> Dictionary {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => self.bits_per_component as i64,
        }
    }

    /// The alpha plane as a DeviceGray image, if the image has transparency.
    pub fn soft_mask_stream(&self) -> Option<Stream> {
        self.soft_mask.as_ref().map(|alpha| {
            Stream::new(
                self.image_dictionary(ColorSpace::DeviceGray.name()),
                alpha.clone(),
            )
        })
    }

    /// The colour image. `soft_mask_id` links the stream from `soft_mask_stream`.
    pub fn image_stream(&self, soft_mask_id: Option<lopdf::ObjectId>) -> Stream {
        let mut dict = self.image_dictionary(self.color_space.name());
        if let Some(soft_mask_id) = soft_mask_id {
            dict.set("SMask", soft_mask_id);
        }
        Stream::new(dict, self.image_data.clone())
    }
}
