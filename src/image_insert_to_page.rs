use crate::{rectangle::Rectangle, Error};
use lopdf::{
    content::{Content, Operation},
    ObjectId,
};

/// Draw an already embedded image XObject onto a page.
pub trait InsertImageToPage {
    /// Register `xobject_id` in the page resources and return the name it got.
    fn add_xobject(&mut self, page_id: ObjectId, xobject_id: ObjectId) -> Result<String, Error>;

    /// Append operations to the page, after all existing content.
    fn add_to_page_content(
        &mut self,
        page_id: ObjectId,
        content: Content<Vec<Operation>>,
    ) -> Result<(), Error>;

    fn insert_image_to_page(
        &mut self,
        page_id: ObjectId,
        xobject_id: ObjectId,
        rect: Rectangle,
    ) -> Result<(), Error> {
        let xobject_name = self.add_xobject(page_id, xobject_id)?;
        let content = Content {
            operations: rect.draw_xobject_operations(&xobject_name),
        };
        self.add_to_page_content(page_id, content)
    }
}
