use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use mapannot_shared::config::{
    GRID_LABEL_CLASS, GRID_LINK_CLASS, GRID_UNIT_CLASS, INITIAL_RENDER_DELAY_MS,
};
use mapannot_shared::error::{ConfigError, RenderError};
use mapannot_shared::grid::{
    hover_z, image_side, initial_anchor, label_z, link_z, loaded_offset, Anchor,
};
use mapannot_shared::models::GridRecord;
use mapannot_shared::parser;
use tracing::{debug, error};
use web_sys::{Document, HtmlElement};

use crate::dom::{
    client_size, create, document, dom_error, element_by_id, html_element_by_id, is_touch_device,
    make_positioned, place, set_px, set_style, set_z,
};
use crate::lightbox;

/// Fill the element `pane_id` with one `unit`-pixel cell per record of
/// `list_id`, after the initial layout delay.
pub fn mount(pane_id: &str, list_id: &str, unit: f64) -> Result<(), RenderError> {
    if !(unit.is_finite() && unit > 0.0) {
        return Err(ConfigError::UnitSize(unit).into());
    }
    let document = document()?;
    let pane = html_element_by_id(&document, pane_id, "grid pane")?;
    let list = element_by_id(&document, list_id, "record list")?;
    let records = parser::parse_grid(&list.text_content().unwrap_or_default())?;
    make_positioned(&pane)?;

    // cells are built once and never rebuilt, so the timer is not tracked
    let _ = Timeout::new(INITIAL_RENDER_DELAY_MS, move || {
        if let Err(err) = render(&pane, &records, unit) {
            error!("{err}");
        }
    })
    .forget();
    Ok(())
}

fn render(pane: &HtmlElement, records: &[GridRecord], unit: f64) -> Result<(), RenderError> {
    let document = document()?;
    let touch = is_touch_device();
    for record in records {
        let cell = build_cell(&document, record, unit, touch)?;
        pane.append_child(&cell).map_err(dom_error)?;
    }
    debug!(cells = records.len(), "image grid rendered");
    Ok(())
}

fn build_cell(
    document: &Document,
    record: &GridRecord,
    unit: f64,
    touch: bool,
) -> Result<HtmlElement, RenderError> {
    let count = record.images.len();
    let cell = create(document, "span", GRID_UNIT_CLASS)?;
    set_px(&cell, "width", unit)?;
    set_px(&cell, "height", unit)?;

    let label = create(document, "div", GRID_LABEL_CLASS)?;
    label.set_text_content(Some(record.display_label()));
    set_z(&label, label_z(count))?;
    if let Some(note) = record.note() {
        label.set_attribute("title", note).map_err(dom_error)?;
    }
    cell.append_child(&label).map_err(dom_error)?;

    let side = image_side(unit, count);
    for (index, src) in record.images.iter().enumerate() {
        let link = create(document, "a", GRID_LINK_CLASS)?;
        match initial_anchor(unit, index, count) {
            Anchor::TopLeft(at) => place(&link, at)?,
            Anchor::BottomRight => {
                set_style(&link, "left", "auto")?;
                set_style(&link, "top", "auto")?;
                set_px(&link, "right", 0.0)?;
                set_px(&link, "bottom", 0.0)?;
            }
        }
        set_z(&link, link_z(index, count))?;
        if !touch {
            link.set_attribute("href", src).map_err(dom_error)?;
        }

        let image = create(document, "img", "")?;
        image.set_attribute("src", src).map_err(dom_error)?;
        set_px(&image, "max-width", side)?;
        set_px(&image, "max-height", side)?;
        if count == 1 || index > 0 {
            reposition_on_load(&link, &image, unit, index, count);
        }
        for listener in hover_raise(&link, index, count) {
            listener.forget();
        }

        link.append_child(&image).map_err(dom_error)?;
        cell.append_child(&link).map_err(dom_error)?;
    }

    let opener = {
        let cell = cell.clone();
        let record = record.clone();
        EventListener::new(&label, "click", move |_| {
            if let Err(err) = lightbox::open(&cell, &record, unit) {
                error!("{err}");
            }
        })
    };
    opener.forget();
    Ok(cell)
}

fn reposition_on_load(link: &HtmlElement, image: &HtmlElement, unit: f64, index: usize, count: usize) {
    let link = link.clone();
    let loaded = image.clone();
    EventListener::once(image, "load", move |_| {
        let Some(at) = loaded_offset(unit, index, count, client_size(&loaded)) else {
            return;
        };
        if let Err(err) = place(&link, at) {
            error!("{err}");
        }
    })
    .forget();
}

/// Raise an image link above its siblings while hovered.
pub fn hover_raise(link: &HtmlElement, index: usize, count: usize) -> [EventListener; 2] {
    let raise = {
        let target = link.clone();
        EventListener::new(link, "mouseover", move |_| {
            if let Err(err) = set_z(&target, hover_z(count)) {
                error!("{err}");
            }
        })
    };
    let restore = {
        let target = link.clone();
        EventListener::new(link, "mouseout", move |_| {
            if let Err(err) = set_z(&target, link_z(index, count)) {
                error!("{err}");
            }
        })
    };
    [raise, restore]
}
