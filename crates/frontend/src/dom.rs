use mapannot_shared::error::{ConfigError, RenderError};
use mapannot_shared::layout::{Point, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub fn dom_error(err: JsValue) -> RenderError {
    RenderError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub fn document() -> Result<Document, RenderError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RenderError::Dom("no document".to_string()))
}

/// Look up an element by id, reporting which reference was missing.
pub fn element_by_id(document: &Document, id: &str, role: &str) -> Result<Element, RenderError> {
    if id.is_empty() {
        return Err(ConfigError::MissingElement(role.to_string()).into());
    }
    document
        .get_element_by_id(id)
        .ok_or_else(|| ConfigError::MissingElement(format!("{role} #{id}")).into())
}

pub fn html_element_by_id(
    document: &Document,
    id: &str,
    role: &str,
) -> Result<HtmlElement, RenderError> {
    element_by_id(document, id, role)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ConfigError::BadElement(format!("{role} #{id}")).into())
}

/// Nearest ancestor of `element` carrying `attr`.
pub fn ancestor_with_attribute(element: &Element, attr: &str) -> Option<HtmlElement> {
    let mut current = element.parent_element();
    while let Some(node) = current {
        if node.has_attribute(attr) {
            if let Ok(found) = node.clone().dyn_into::<HtmlElement>() {
                return Some(found);
            }
        }
        current = node.parent_element();
    }
    None
}

/// Create an element of `tag` with `class`, as an `HtmlElement`.
pub fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, RenderError> {
    let element = document
        .create_element(tag)
        .map_err(dom_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| RenderError::Dom(format!("<{tag}> is not an HTML element")))?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

pub fn set_style(element: &HtmlElement, name: &str, value: &str) -> Result<(), RenderError> {
    element.style().set_property(name, value).map_err(dom_error)
}

pub fn set_px(element: &HtmlElement, name: &str, value: f64) -> Result<(), RenderError> {
    set_style(element, name, &format!("{value}px"))
}

pub fn set_z(element: &HtmlElement, z: impl std::fmt::Display) -> Result<(), RenderError> {
    set_style(element, "z-index", &z.to_string())
}

pub fn set_zoom(element: &HtmlElement, zoom: f64) -> Result<(), RenderError> {
    set_style(element, "zoom", &zoom.to_string())
}

/// Move an absolutely placed element to `at`.
pub fn place(element: &HtmlElement, at: Point) -> Result<(), RenderError> {
    set_px(element, "left", at.x)?;
    set_px(element, "top", at.y)
}

/// Inner size of the element, padding included and borders excluded.
pub fn client_size(element: &Element) -> Size {
    Size::new(element.client_width() as f64, element.client_height() as f64)
}

/// Size of the element's box on screen.
pub fn rect_size(element: &Element) -> Size {
    let rect = element.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}

/// Browser viewport in CSS pixels.
pub fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::default();
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    Size::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
}

/// Touch-first devices get no direct image links in grids.
pub fn is_touch_device() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let has_touch_handler = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))
        .unwrap_or(false);
    has_touch_handler || window.navigator().max_touch_points() > 0
}

/// Make `pane` a positioning context for the nodes placed in it.
pub fn make_positioned(pane: &HtmlElement) -> Result<(), RenderError> {
    let computed = web_sys::window()
        .and_then(|w| w.get_computed_style(pane).ok().flatten())
        .unwrap_or_else(|| pane.style());
    let position = computed.get_property_value("position").map_err(dom_error)?;
    if !is_positioned(&position) {
        set_style(pane, "position", "relative")?;
    }
    Ok(())
}

fn is_positioned(position: &str) -> bool {
    matches!(position, "absolute" | "fixed")
}

/// Drop `value` after the current event handler returns.
///
/// Used for listeners and timers released from inside their own callback.
pub fn release_later<T: 'static>(value: T) {
    wasm_bindgen_futures::spawn_local(async move {
        drop(value);
    });
}
