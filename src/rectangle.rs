use lopdf::content::Operation;
use serde::{Deserialize, Serialize};

/// Width and height in pdf user-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// US Letter, the default size of a freshly appended page.
    /// Not necessarily what pdf-lib's `addPage()` picks; see `StamperConfig::blank_page_size`.
    pub const fn letter() -> Self {
        Size::new(612.0, 792.0)
    }

    pub const fn a4() -> Self {
        Size::new(595.0, 842.0)
    }

    /// Multiply both dimensions by the same factor.
    pub fn scale(&self, factor: f64) -> Self {
        Size::new(self.width * factor, self.height * factor)
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::letter()
    }
}

/// Placement of a stamp on a page. Origin is the bottom-left corner of the page,
/// y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Size> for Rectangle {
    /// A rectangle of `size` at the origin.
    fn from(size: Size) -> Self {
        Rectangle::new(0.0, 0.0, size)
    }
}

impl Rectangle {
    pub fn new(x: f64, y: f64, size: Size) -> Self {
        Rectangle {
            x,
            y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The operations that paint the XObject `xobject_name` into this rectangle.
    /// The image space (unit square) is mapped onto the rectangle with `cm`.
    pub fn draw_xobject_operations(&self, xobject_name: &str) -> Vec<Operation> {
        vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (self.width as f32).into(),
                    0.into(),
                    0.into(),
                    (self.height as f32).into(),
                    (self.x as f32).into(),
                    (self.y as f32).into(),
                ],
            ),
            Operation::new("Do", vec![lopdf::Object::Name(xobject_name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]
    }
}
