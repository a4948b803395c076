#![allow(dead_code)]

use pdf_stamp::lopdf::{
    content::Content, dictionary, Dictionary, Document, Object, ObjectId, Stream,
};

/// A pdf with one page per entry of `sizes`, each showing a line of text.
pub fn create_test_pdf(version: &str, sizes: &[(i64, i64)]) -> Vec<u8> {
    let boxes: Vec<[i64; 4]> = sizes.iter().map(|(w, h)| [0, 0, *w, *h]).collect();
    build_pdf(version, &boxes, false)
}

/// Like `create_test_pdf`, with full `[llx lly urx ury]` media boxes.
pub fn create_boxed_pdf(boxes: &[[i64; 4]]) -> Vec<u8> {
    build_pdf("1.5", boxes, false)
}

/// Letter pages that all point at one indirect resource dictionary.
pub fn create_shared_resources_pdf(pages: usize) -> Vec<u8> {
    build_pdf("1.5", &vec![[0, 0, 612, 792]; pages], true)
}

fn build_pdf(version: &str, boxes: &[[i64; 4]], shared_resources: bool) -> Vec<u8> {
    let mut doc = Document::with_version(version);
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources = dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    };
    let shared_id = shared_resources.then(|| doc.add_object(resources.clone()));

    let mut kids = Vec::new();
    for (index, media_box) in boxes.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 50 700 Td (Page-{}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_resources = match shared_id {
            Some(id) => Object::Reference(id),
            None => Object::Dictionary(resources.clone()),
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => media_box.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
            "Resources" => page_resources,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => boxes.len() as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub fn letter_pdf(pages: usize) -> Vec<u8> {
    create_test_pdf("1.5", &vec![(612, 792); pages])
}

/// An RGBA png of the given size with a transparent left half.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            let alpha = if x < width / 2 { 0 } else { 255 };
            data.extend_from_slice(&[0, 0, 128, alpha]);
        }
    }
    encode_png(width, height, png::ColorType::Rgba, &data)
}

/// An opaque grayscale png.
pub fn create_gray_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(
        width,
        height,
        png::ColorType::Grayscale,
        &vec![200; (width * height) as usize],
    )
}

fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    bytes
}

fn to_f64(obj: &Object) -> f64 {
    match obj {
        Object::Integer(value) => *value as f64,
        Object::Real(value) => *value as f64,
        other => panic!("not a number: {:?}", other),
    }
}

/// A drawn XObject: its resource name and the `(x, y, width, height)` it was painted at.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawn {
    pub name: String,
    pub rect: (f64, f64, f64, f64),
}

/// Every `cm ... Do` pair in the page content.
pub fn drawn_xobjects(doc: &Document, page_id: ObjectId) -> Vec<Drawn> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let mut drawn = Vec::new();
    for pair in content.operations.windows(2) {
        if pair[0].operator == "cm" && pair[1].operator == "Do" {
            let m: Vec<f64> = pair[0].operands.iter().map(to_f64).collect();
            let name = pair[1].operands[0].as_name().unwrap();
            drawn.push(Drawn {
                name: String::from_utf8(name.to_vec()).unwrap(),
                rect: (m[4], m[5], m[0], m[3]),
            });
        }
    }
    drawn
}

/// Operators of the page content, in order.
pub fn operators(doc: &Document, page_id: ObjectId) -> Vec<String> {
    Content::decode(&doc.get_page_content(page_id).unwrap())
        .unwrap()
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect()
}

/// The object the page's `/XObject` resource `name` points to.
pub fn xobject_id(doc: &Document, page_id: ObjectId, name: &str) -> ObjectId {
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let resources = match page.get(b"Resources").unwrap() {
        Object::Reference(id) => doc.get_object(*id).unwrap().as_dict().unwrap(),
        other => other.as_dict().unwrap(),
    };
    resources
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(name.as_bytes())
        .unwrap()
        .as_reference()
        .unwrap()
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}
