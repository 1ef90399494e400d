//! Full-screen zoom of one image grid cell.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use mapannot_shared::config::{
    GRID_CLOSE_CLASS, GRID_COMMENT_CLASS, GRID_COVER_CLASS, GRID_LABEL_CLASS, GRID_LINK_CLASS,
    GRID_SCREEN_CLASS,
};
use mapannot_shared::error::RenderError;
use mapannot_shared::grid::{label_z, Lightbox};
use mapannot_shared::models::GridRecord;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom::{
    create, document, dom_error, release_later, set_px, set_style, set_z, set_zoom, viewport_size,
};
use crate::image_grid::hover_raise;

const CLOSE_GLYPH: &str = "✕";

/// The two body-level nodes of an open lightbox and the listeners bound to it.
struct Overlay {
    cover: HtmlElement,
    screen: HtmlElement,
    listeners: RefCell<Vec<EventListener>>,
}

impl Overlay {
    fn close(&self) {
        self.screen.remove();
        self.cover.remove();
        release_later(self.listeners.take());
    }

    fn close_on_click(self: &Rc<Self>, target: &HtmlElement) {
        let overlay = Rc::clone(self);
        let listener = EventListener::new(target, "click", move |_| overlay.close());
        self.listeners.borrow_mut().push(listener);
    }
}

/// Show a zoomed copy of `cell` over the whole page.
pub fn open(cell: &HtmlElement, record: &GridRecord, unit: f64) -> Result<(), RenderError> {
    let document = document()?;
    let body = document
        .body()
        .ok_or_else(|| RenderError::Dom("no body".to_string()))?;
    let geometry = Lightbox::new(viewport_size(), unit);

    let cover = create(&document, "div", GRID_COVER_CLASS)?;
    body.append_child(&cover).map_err(dom_error)?;
    let screen = create(&document, "div", GRID_SCREEN_CLASS)?;
    set_px(&screen, "width", geometry.screen)?;
    set_px(&screen, "height", geometry.screen)?;
    let overlay = Rc::new(Overlay {
        cover,
        screen,
        listeners: RefCell::new(Vec::new()),
    });
    overlay.close_on_click(&overlay.cover);

    let filled = fill(&overlay, &document, &body, cell, record, geometry);
    if filled.is_err() {
        overlay.close();
    }
    filled
}

fn fill(
    overlay: &Rc<Overlay>,
    document: &Document,
    body: &HtmlElement,
    cell: &HtmlElement,
    record: &GridRecord,
    geometry: Lightbox,
) -> Result<(), RenderError> {
    let count = record.images.len();

    let clone = cell
        .clone_node_with_deep(true)
        .map_err(dom_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| RenderError::Dom("cloned cell is not an HTML element".to_string()))?;
    set_style(&clone, "margin", "0px")?;
    set_style(&clone, "border", "none")?;
    if let Some(zoom) = geometry.cell_zoom() {
        set_zoom(&clone, zoom)?;
    }

    let children = clone.children();
    let mut link_index = 0;
    for i in 0..children.length() {
        let Some(child) = children.item(i).and_then(|c| c.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        match child.class_name().as_str() {
            GRID_LABEL_CLASS => {
                child.remove_attribute("title").map_err(dom_error)?;
                set_zoom(&child, geometry.control_zoom())?;
                overlay.close_on_click(&child);
            }
            GRID_LINK_CLASS => {
                overlay
                    .listeners
                    .borrow_mut()
                    .extend(hover_raise(&child, link_index, count));
                link_index += 1;
            }
            _ => {}
        }
    }

    if let Some(note) = record.note() {
        let comment = create(document, "div", GRID_COMMENT_CLASS)?;
        comment.set_text_content(Some(note));
        set_z(&comment, label_z(count))?;
        set_zoom(&comment, geometry.comment_zoom())?;
        clone.append_child(&comment).map_err(dom_error)?;
    }

    let close = create(document, "div", GRID_CLOSE_CLASS)?;
    close.set_text_content(Some(CLOSE_GLYPH));
    set_z(&close, Lightbox::close_z(clone.children().length() as usize))?;
    set_zoom(&close, geometry.control_zoom())?;
    overlay.close_on_click(&close);
    clone.append_child(&close).map_err(dom_error)?;

    overlay.screen.append_child(&clone).map_err(dom_error)?;
    body.append_child(&overlay.screen).map_err(dom_error)?;
    Ok(())
}
