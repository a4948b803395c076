use crate::{
    rectangle::{Rectangle, Size},
    Error,
};
use lopdf::{
    content::{Content, Operation},
    dictionary, Dictionary, Document, Object, ObjectId, Stream,
};

/// Page tree attributes are inherited through at most this many `Parent` links.
const MAX_TREE_DEPTH: usize = 64;

/// Prefix of the resource names given to stamped images.
const XOBJECT_NAME_PREFIX: &str = "Sig";

/// Where a page's resource dictionary lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourcesLocation {
    /// Inline in the page dictionary.
    Page(ObjectId),
    /// An indirect object, possibly shared with other pages.
    Shared(ObjectId),
}

pub fn obj_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}

/// Follow a reference, if `obj` is one.
pub fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, Error> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Look `key` up on the page, then on its ancestors in the page tree.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = Some(page_id);
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_object(current?).and_then(Object::as_dict).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// The page's (possibly inherited) media box, normalised so `x`/`y` is the lower-left corner.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Option<Rectangle> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?;
    let values = resolve(doc, &media_box).ok()?.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let llx = obj_to_f64(&values[0])?;
    let lly = obj_to_f64(&values[1])?;
    let urx = obj_to_f64(&values[2])?;
    let ury = obj_to_f64(&values[3])?;
    Some(Rectangle::new(
        llx.min(urx),
        lly.min(ury),
        Size::new((urx - llx).abs(), (ury - lly).abs()),
    ))
}

/// Id of the root `/Pages` node.
pub fn pages_root_id(doc: &Document) -> Result<ObjectId, Error> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| Error::Parse("missing document catalog".to_owned()))?;
    doc.get_object(catalog_id)
        .and_then(Object::as_dict)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| Error::Parse("missing page tree".to_owned()))
}

/// Append an empty page of `size` as the last kid of the root page node.
pub fn append_blank_page(doc: &mut Document, size: Size) -> Result<ObjectId, Error> {
    let pages_id = pages_root_id(doc)?;
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            (size.width as f32).into(),
            (size.height as f32).into(),
        ],
        "Resources" => dictionary! {},
    });

    let pages = doc.get_object_mut(pages_id)?.as_dict_mut()?;
    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    let appended = match pages.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            kids.push(Object::Reference(page_id));
            true
        }
        Ok(_) => {
            return Err(Error::Parse(
                "page tree kids are not an inline array".to_owned(),
            ))
        }
        Err(_) => false,
    };
    if !appended {
        pages.set("Kids", vec![Object::Reference(page_id)]);
    }
    pages.set("Count", count + 1);
    Ok(page_id)
}

/// Make sure the page has its own resources entry, copying inherited resources onto it.
fn materialize_resources(doc: &mut Document, page_id: ObjectId) -> Result<ResourcesLocation, Error> {
    match doc.get_object(page_id)?.as_dict()?.get(b"Resources") {
        Ok(Object::Reference(id)) => return Ok(ResourcesLocation::Shared(*id)),
        Ok(Object::Dictionary(_)) => return Ok(ResourcesLocation::Page(page_id)),
        _ => {}
    }

    let inherited = match inherited_attribute(doc, page_id, b"Resources") {
        Some(resources) => resolve(doc, &resources)?.as_dict()?.clone(),
        None => Dictionary::new(),
    };
    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Resources", inherited);
    Ok(ResourcesLocation::Page(page_id))
}

fn resources(doc: &Document, location: ResourcesLocation) -> Result<&Dictionary, Error> {
    Ok(match location {
        ResourcesLocation::Page(page_id) => doc
            .get_object(page_id)?
            .as_dict()?
            .get(b"Resources")?
            .as_dict()?,
        ResourcesLocation::Shared(id) => doc.get_object(id)?.as_dict()?,
    })
}

fn resources_mut(
    doc: &mut Document,
    location: ResourcesLocation,
) -> Result<&mut Dictionary, Error> {
    Ok(match location {
        ResourcesLocation::Page(page_id) => doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .get_mut(b"Resources")?
            .as_dict_mut()?,
        ResourcesLocation::Shared(id) => doc.get_object_mut(id)?.as_dict_mut()?,
    })
}

fn unused_xobject_name(xobjects: &Dictionary) -> String {
    let mut index = 1;
    loop {
        let name = format!("{}{}", XOBJECT_NAME_PREFIX, index);
        if !xobjects.has(name.as_bytes()) {
            return name;
        }
        index += 1;
    }
}

/// Register `xobject_id` in the page's `/XObject` resources under a free name.
/// An entry that already points at `xobject_id` is reused, so pages sharing
/// one resource dictionary draw the image under the same name.
pub fn add_xobject(
    doc: &mut Document,
    page_id: ObjectId,
    xobject_id: ObjectId,
) -> Result<String, Error> {
    let location = materialize_resources(doc, page_id)?;
    let mut xobjects = match resources(doc, location)?.get(b"XObject") {
        Ok(existing) => resolve(doc, existing)?.as_dict()?.clone(),
        Err(_) => Dictionary::new(),
    };
    let registered = xobjects
        .iter()
        .find(|(_, value)| matches!(value, Object::Reference(id) if *id == xobject_id));
    if let Some((name, _)) = registered {
        return Ok(String::from_utf8_lossy(name).into_owned());
    }
    let name = unused_xobject_name(&xobjects);
    xobjects.set(name.clone(), xobject_id);
    resources_mut(doc, location)?.set("XObject", xobjects);
    Ok(name)
}

/// Append `content` after the page's existing content streams.
/// Existing content is wrapped in `q`/`Q` so its graphics state ends before the new operations.
pub fn append_page_content(
    doc: &mut Document,
    page_id: ObjectId,
    content: Content<Vec<Operation>>,
) -> Result<(), Error> {
    let encoded = content.encode()?;
    #[cfg(feature = "debug")]
    log::debug!(
        "Appending to page {:?}: {}",
        page_id,
        String::from_utf8_lossy(&encoded)
    );

    let existing: Vec<Object> = match doc.get_object(page_id)?.as_dict()?.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id)? {
            Object::Array(items) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    let mut contents = Vec::with_capacity(existing.len() + 2);
    let body = if existing.is_empty() {
        encoded
    } else {
        let save_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        contents.push(Object::Reference(save_id));
        contents.extend(existing);
        [b"\nQ\n".to_vec(), encoded].concat()
    };
    let stamp_id = doc.add_object(Stream::new(Dictionary::new(), body));
    contents.push(Object::Reference(stamp_id));

    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", contents);
    Ok(())
}

/// Record the producer and modification date in the document information dictionary.
/// An inline `/Info` dictionary is moved into its own object with its entries kept.
pub fn update_info(doc: &mut Document, producer: &str, mod_date: &str) -> Result<(), Error> {
    let info_id = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => *id,
        other => {
            let info = match other {
                Ok(Object::Dictionary(inline)) => inline.clone(),
                _ => Dictionary::new(),
            };
            let id = doc.add_object(info);
            doc.trailer.set("Info", id);
            id
        }
    };
    let info = doc.get_object_mut(info_id)?.as_dict_mut()?;
    info.set("Producer", Object::string_literal(producer));
    info.set("ModDate", Object::string_literal(mod_date));
    Ok(())
}
