//! Pascal VOC XML encoder.
//!
//! Output is one compact `<annotation>` element with no declaration and no
//! whitespace between elements:
//!
//! ```text
//! <annotation><filename>cat.jpg</filename><folder>VOC2026</folder>
//!   <object><name>cat</name><bndbox><xmin>..</xmin><ymin>..</ymin>
//!   <xmax>..</xmax><ymax>..</ymax></bndbox></object>...
//!   <size><width>..</width><height>..</height><depth>3</depth></size>
//! </annotation>
//! ```
//!
//! (wrapped here for reading). Objects carry the raw label string, never a
//! vocabulary index. A box set with no boxes encodes as an empty
//! `<annotation></annotation>`.

use chrono::Datelike;

use super::number::format_number;
use super::ExportImage;
use crate::change::BoxView;

/// Image depth written into `<size>`; the stage only handles RGB images.
const IMAGE_DEPTH: u32 = 3;

/// Encodes `boxes` as VOC XML with the current local year in `<folder>`.
pub fn encode_voc_xml(boxes: &[BoxView], image: &ExportImage) -> String {
    encode_voc_xml_for_year(boxes, image, chrono::Local::now().year())
}

/// Encodes `boxes` as VOC XML with `<folder>VOC{year}</folder>`.
pub fn encode_voc_xml_for_year(boxes: &[BoxView], image: &ExportImage, year: i32) -> String {
    if boxes.is_empty() {
        return "<annotation></annotation>".to_string();
    }

    let mut xml = String::from("<annotation>");
    push_text_element(&mut xml, "filename", image.file_name.as_deref().unwrap_or(""));
    push_text_element(&mut xml, "folder", &format!("VOC{}", year));

    for view in boxes {
        xml.push_str("<object>");
        push_text_element(&mut xml, "name", &view.label);
        xml.push_str("<bndbox>");
        push_number_element(&mut xml, "xmin", view.x);
        push_number_element(&mut xml, "ymin", view.y);
        push_number_element(&mut xml, "xmax", view.x + view.width);
        push_number_element(&mut xml, "ymax", view.y + view.height);
        xml.push_str("</bndbox></object>");
    }

    xml.push_str("<size>");
    if image.has_size() {
        push_number_element(&mut xml, "width", image.width);
        push_number_element(&mut xml, "height", image.height);
    } else {
        xml.push_str("<width/><height/>");
    }
    push_number_element(&mut xml, "depth", f64::from(IMAGE_DEPTH));
    xml.push_str("</size></annotation>");
    xml
}

fn push_text_element(xml: &mut String, tag: &str, text: &str) {
    if text.is_empty() {
        xml.push_str(&format!("<{}/>", tag));
    } else {
        xml.push_str(&format!("<{0}>{1}</{0}>", tag, xml_escape(text)));
    }
}

fn push_number_element(xml: &mut String, tag: &str, value: f64) {
    xml.push_str(&format!("<{0}>{1}</{0}>", tag, format_number(value)));
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
