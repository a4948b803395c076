use crate::image_xobject::ImageXObject;
use lopdf::{Object, ObjectId};

/// Embed image XObjects into a document.
pub trait InsertImage {
    fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId;

    /// Add the image (and its soft mask) as new objects and return the id of the image.
    fn insert_image(&mut self, image: &ImageXObject) -> ObjectId {
        let soft_mask_id = image
            .soft_mask_stream()
            .map(|soft_mask| self.add_object(soft_mask));
        self.add_object(image.image_stream(soft_mask_id))
    }
}
