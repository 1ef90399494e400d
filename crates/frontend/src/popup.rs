use mapannot_shared::config::{
    IMAGE_BOX_CLASS, IMAGE_CLASS, IMAGE_LINK_CLASS, LABEL_CLASS, LINK_BOX_CLASS, LINK_CLASS,
    TEXT_CLASS,
};
use mapannot_shared::error::RenderError;
use mapannot_shared::models::AnnotationRecord;
use web_sys::{Document, HtmlElement};

use crate::dom::{create, dom_error};

/// Glyph shown for each entry in the link box.
const LINK_GLYPH: &str = "⇒";

/// Fill `popup` with the sections `record` has data for, in display order:
/// label, text, images, links, raw markup.
pub fn compose(
    document: &Document,
    popup: &HtmlElement,
    record: &AnnotationRecord,
) -> Result<(), RenderError> {
    if !record.label.is_empty() {
        let label = create(document, "h2", LABEL_CLASS)?;
        match record.label_link() {
            Some(href) => {
                let link = anchor(document, "", href)?;
                link.set_text_content(Some(&record.label));
                label.append_child(&link).map_err(dom_error)?;
            }
            None => label.set_text_content(Some(&record.label)),
        }
        popup.append_child(&label).map_err(dom_error)?;
    }

    if let Some(body) = record.body() {
        let text = create(document, "p", TEXT_CLASS)?;
        text.set_text_content(Some(body));
        popup.append_child(&text).map_err(dom_error)?;
    }

    for src in &record.images {
        let image_box = create(document, "div", IMAGE_BOX_CLASS)?;
        let link = anchor(document, IMAGE_LINK_CLASS, src)?;
        let image = create(document, "img", IMAGE_CLASS)?;
        image.set_attribute("src", src).map_err(dom_error)?;
        link.append_child(&image).map_err(dom_error)?;
        image_box.append_child(&link).map_err(dom_error)?;
        popup.append_child(&image_box).map_err(dom_error)?;
    }

    if !record.links.is_empty() {
        let link_box = create(document, "div", LINK_BOX_CLASS)?;
        for href in &record.links {
            let link = anchor(document, LINK_CLASS, href)?;
            link.set_text_content(Some(LINK_GLYPH));
            link_box.append_child(&link).map_err(dom_error)?;
        }
        popup.append_child(&link_box).map_err(dom_error)?;
    }

    if let Some(markup) = record.markup() {
        popup
            .insert_adjacent_html("beforeend", markup)
            .map_err(dom_error)?;
    }
    Ok(())
}

fn anchor(document: &Document, class: &str, href: &str) -> Result<HtmlElement, RenderError> {
    let link = create(document, "a", class)?;
    link.set_attribute("href", href).map_err(dom_error)?;
    Ok(link)
}
