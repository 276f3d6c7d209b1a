//! RoLabelImg XML documents
//!
//! Reading goes through `roxmltree`. Writing uses `quick-xml` with a four-space
//! indent.

use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::{Document, Node};
use std::io::{Cursor, Write};

use crate::error::FormatError;
use crate::geometry::CenterBox;
use crate::types::{AnnotationObject, ImageSize, RoLabelAnnotation};
use crate::utils::format_decimal;

const INDENT: usize = 4;

// Same declaration text as minidom's toprettyxml
const XML_DECL: &[u8] = b"<?xml version=\"1.0\" ?>\n";

/// Parse a RoLabelImg XML document
pub fn parse_str(xml: &str) -> Result<RoLabelAnnotation, FormatError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut annotation = RoLabelAnnotation {
        folder: String::new(),
        filename: String::new(),
        size: ImageSize::default(),
        objects: Vec::new(),
    };

    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "folder" => annotation.folder = node_text(&child).to_string(),
            "filename" => annotation.filename = node_text(&child).to_string(),
            "size" => annotation.size = parse_size(&child),
            "object" => annotation.objects.push(parse_object(&child)?),
            _ => {}
        }
    }

    Ok(annotation)
}

// Size is informational only; labelImg-style tools write "800.0" or leave it empty
fn parse_size(node: &Node) -> ImageSize {
    let mut size = ImageSize::default();
    if let Some(width) = lenient_dimension(node, "width") {
        size.width = width;
    }
    if let Some(height) = lenient_dimension(node, "height") {
        size.height = height;
    }
    if let Some(depth) = lenient_dimension(node, "depth") {
        size.depth = depth;
    }
    size
}

fn lenient_dimension(node: &Node, tag: &str) -> Option<u32> {
    let text = node_text(&find_child(node, tag)?);
    let value = text.parse::<u32>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v.round() as u32)
    });
    if value.is_none() {
        debug!("Ignoring unreadable <{}> in <size>: {:?}", tag, text);
    }
    value
}

fn parse_object(node: &Node) -> Result<AnnotationObject, FormatError> {
    let name = required_child(node, "object", "name")?;
    let difficult = required_child(node, "object", "difficult")?;

    let bbox = if let Some(robndbox) = find_child(node, "robndbox") {
        CenterBox::new(
            required_number(&robndbox, "robndbox", "cx")?,
            required_number(&robndbox, "robndbox", "cy")?,
            required_number(&robndbox, "robndbox", "w")?,
            required_number(&robndbox, "robndbox", "h")?,
            required_number(&robndbox, "robndbox", "angle")?,
        )
    } else if let Some(bndbox) = find_child(node, "bndbox") {
        CenterBox::from_corners(
            required_number(&bndbox, "bndbox", "xmin")?,
            required_number(&bndbox, "bndbox", "ymin")?,
            required_number(&bndbox, "bndbox", "xmax")?,
            required_number(&bndbox, "bndbox", "ymax")?,
        )
    } else {
        return Err(FormatError::MissingElement {
            parent: "object",
            element: "robndbox",
        });
    };

    Ok(AnnotationObject {
        name: node_text(&name).to_string(),
        difficult: node_text(&difficult).to_string(),
        bbox,
    })
}

fn find_child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn required_child<'a, 'input>(
    node: &Node<'a, 'input>,
    parent: &'static str,
    tag: &'static str,
) -> Result<Node<'a, 'input>, FormatError> {
    find_child(node, tag).ok_or(FormatError::MissingElement {
        parent,
        element: tag,
    })
}

fn required_number(
    node: &Node,
    parent: &'static str,
    tag: &'static str,
) -> Result<f64, FormatError> {
    parse_number(&required_child(node, parent, tag)?)
}

fn node_text<'a>(node: &Node<'a, '_>) -> &'a str {
    node.text().map(str::trim).unwrap_or_default()
}

fn parse_number<T: std::str::FromStr>(node: &Node) -> Result<T, FormatError> {
    let text = node_text(node);
    text.parse().map_err(|_| FormatError::InvalidNumber {
        field: node.tag_name().name().to_string(),
        value: text.to_string(),
    })
}

/// Serialize a RoLabelImg document as pretty-printed XML
pub fn to_xml_string(annotation: &RoLabelAnnotation) -> Result<String, FormatError> {
    let mut xml = XmlBuilder::new();

    xml.decl()?;
    xml.open("annotation")?;
    xml.text_element("folder", &annotation.folder)?;
    xml.text_element("filename", &annotation.filename)?;

    xml.open("size")?;
    xml.text_element("width", &annotation.size.width.to_string())?;
    xml.text_element("height", &annotation.size.height.to_string())?;
    xml.text_element("depth", &annotation.size.depth.to_string())?;
    xml.close("size")?;

    for object in &annotation.objects {
        xml.open("object")?;
        xml.text_element("name", &object.name)?;
        xml.text_element("difficult", &object.difficult)?;

        let bbox = &object.bbox;
        xml.open("robndbox")?;
        xml.text_element("cx", &format_decimal(bbox.cx))?;
        xml.text_element("cy", &format_decimal(bbox.cy))?;
        xml.text_element("w", &format_decimal(bbox.w))?;
        xml.text_element("h", &format_decimal(bbox.h))?;
        xml.text_element("angle", &format_decimal(bbox.angle))?;
        xml.close("robndbox")?;

        xml.close("object")?;
    }

    xml.close("annotation")?;
    xml.finish()
}

struct XmlBuilder {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlBuilder {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT),
        }
    }

    fn write(&mut self, event: Event) -> Result<(), FormatError> {
        self.writer
            .write_event(event)
            .map_err(|e| FormatError::XmlWrite(e.to_string()))
    }

    fn decl(&mut self) -> Result<(), FormatError> {
        self.writer
            .get_mut()
            .write_all(XML_DECL)
            .map_err(|e| FormatError::XmlWrite(e.to_string()))
    }

    fn open(&mut self, tag: &str) -> Result<(), FormatError> {
        self.write(Event::Start(BytesStart::new(tag)))
    }

    fn close(&mut self, tag: &str) -> Result<(), FormatError> {
        self.write(Event::End(BytesEnd::new(tag)))
    }

    fn text_element(&mut self, tag: &str, text: &str) -> Result<(), FormatError> {
        self.open(tag)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    fn finish(self) -> Result<String, FormatError> {
        let mut xml = String::from_utf8(self.writer.into_inner().into_inner())
            .map_err(|e| FormatError::XmlWrite(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }
}
