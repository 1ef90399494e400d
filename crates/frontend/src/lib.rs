//! Browser bindings for the map annotation and image grid widgets.
//!
//! ```js
//! import init, { renderMapAnnotations, renderImageGrid } from "./mapannot_frontend.js";
//! await init();
//! renderMapAnnotations(document.getElementById("map"), "map-records");
//! renderImageGrid("gallery", "gallery-records", 160);
//! ```

mod annotations;
mod dom;
mod image_grid;
mod lightbox;
mod logging;
mod popup;

use mapannot_shared::error::RenderError;
use tracing::error;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// Overlay markers for the records in element `list_id` on `image`.
///
/// `image` must be an `<img>` inside an element carrying `data-latlong`.
/// Only a malformed JSON record list is thrown; other problems are logged.
#[wasm_bindgen(js_name = renderMapAnnotations)]
pub fn render_map_annotations(image: &JsValue, list_id: &str) -> Result<(), JsValue> {
    surface(annotations::mount(image, list_id))
}

/// Fill element `pane_id` with square cells of `unit_size` pixels, one per
/// record in element `list_id`.
#[wasm_bindgen(js_name = renderImageGrid)]
pub fn render_image_grid(pane_id: &str, list_id: &str, unit_size: f64) -> Result<(), JsValue> {
    surface(image_grid::mount(pane_id, list_id, unit_size))
}

fn surface(result: Result<(), RenderError>) -> Result<(), JsValue> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.is_fatal() => Err(JsValue::from_str(&err.to_string())),
        Err(err) => {
            error!("{err}");
            Ok(())
        }
    }
}
