//! Map annotations on a live page.
//!
//! Every annotated image has one [`PaneState`] in a thread-local registry keyed
//! by the image element. The state owns the nodes and listeners of the last
//! pass, the pending timer and the last rendered width, so a new pass or a new
//! mount releases all of them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use mapannot_shared::config::{
    PaneConfig, BOUNDS_ATTR, INITIAL_RENDER_DELAY_MS, MARKER_CLASS, MARKER_TEXT_CLASS,
    POPUP_CLASS, RESIZE_DEBOUNCE_MS, SHOW_ALL_ATTR,
};
use mapannot_shared::error::{ConfigError, RenderError};
use mapannot_shared::layout::{Point, Size};
use mapannot_shared::models::AnnotationRecord;
use mapannot_shared::parser;
use mapannot_shared::reconcile::{reconcile, PaneSurface};
use mapannot_shared::resize::{Registry, RenderState};
use mapannot_shared::visibility::{PointerEvent, Visibility};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::dom::{
    ancestor_with_attribute, client_size, create, document, dom_error, element_by_id,
    make_positioned, place, rect_size, release_later, set_style, set_z,
};
use crate::popup;

struct PaneState {
    pane: HtmlElement,
    records: Vec<AnnotationRecord>,
    owned: Vec<Element>,
    listeners: Vec<EventListener>,
    render: RenderState<Timeout>,
    _resize: EventListener,
}

impl Drop for PaneState {
    fn drop(&mut self) {
        for node in self.owned.drain(..) {
            node.remove();
        }
    }
}

thread_local! {
    static PANES: RefCell<Registry<HtmlImageElement, PaneState>> = RefCell::new(Registry::new());
}

/// Attach annotations from the record list `list_id` to `image`.
///
/// The first pass runs after a short delay; later passes follow window
/// resizes that change the image width.
pub fn mount(image: &JsValue, list_id: &str) -> Result<(), RenderError> {
    let image = image
        .dyn_ref::<HtmlImageElement>()
        .cloned()
        .ok_or_else(|| ConfigError::BadElement("annotated element must be an <img>".into()))?;
    let pane = ancestor_with_attribute(&image, BOUNDS_ATTR).ok_or(ConfigError::MissingBounds)?;
    let document = document()?;
    let list = element_by_id(&document, list_id, "record list")?;
    let records = parser::parse_annotations(&list.text_content().unwrap_or_default())?;

    make_positioned(&pane)?;
    set_style(&pane, "padding", "0px")?;
    set_style(&pane, "border", "none")?;
    set_z(&image, 0)?;

    let window = web_sys::window().ok_or_else(|| RenderError::Dom("no window".to_string()))?;
    let resize = {
        let image = image.clone();
        EventListener::new(&window, "resize", move |_| schedule_resize(&image))
    };
    let initial = {
        let image = image.clone();
        Timeout::new(INITIAL_RENDER_DELAY_MS, move || initial_pass(&image))
    };
    let mut render = RenderState::new();
    render.schedule(initial);

    debug!(records = records.len(), "annotations mounted");
    let state = PaneState {
        pane,
        records,
        owned: Vec::new(),
        listeners: Vec::new(),
        render,
        _resize: resize,
    };
    // a replaced state takes its nodes, listeners and timer with it
    let replaced = PANES.with(|panes| panes.borrow_mut().insert(image, state));
    drop(replaced);
    Ok(())
}

fn initial_pass(image: &HtmlImageElement) {
    PANES.with(|panes| {
        let mut panes = panes.borrow_mut();
        let Some(state) = panes.get_mut(image) else {
            return;
        };
        if let Some(fired) = state.render.cancel() {
            release_later(fired);
        }
        state.render.record_width(image.client_width() as f64);
        if let Err(err) = run_pass(image, state) {
            error!("{err}");
        }
    });
}

fn schedule_resize(image: &HtmlImageElement) {
    let timer = {
        let image = image.clone();
        Timeout::new(RESIZE_DEBOUNCE_MS, move || resize_settled(&image))
    };
    PANES.with(|panes| {
        if let Some(state) = panes.borrow_mut().get_mut(image) {
            // dropping the superseded timer cancels it
            state.render.schedule(timer);
        }
    });
}

fn resize_settled(image: &HtmlImageElement) {
    PANES.with(|panes| {
        let mut panes = panes.borrow_mut();
        if !image.is_connected() {
            // the state holds the timer running this callback
            if let Some(state) = panes.remove(image) {
                release_later(state);
            }
            debug!("annotated image left the page, state released");
            return;
        }
        let Some(state) = panes.get_mut(image) else {
            return;
        };
        let (fired, changed) = state.render.fire(image.client_width() as f64);
        if let Some(fired) = fired {
            release_later(fired);
        }
        if !changed {
            debug!("image width unchanged, pass skipped");
            return;
        }
        if let Err(err) = run_pass(image, state) {
            error!("{err}");
        }
    });
}

fn run_pass(image: &HtmlImageElement, state: &mut PaneState) -> Result<(), RenderError> {
    let config = PaneConfig::from_attributes(
        state.pane.get_attribute(BOUNDS_ATTR).as_deref(),
        state.pane.get_attribute(SHOW_ALL_ATTR).as_deref(),
    )?;
    let document = document()?;
    let mut surface = WebPane {
        document: &document,
        image,
        pane: &state.pane,
        owned: &mut state.owned,
        listeners: &mut state.listeners,
    };
    reconcile(&mut surface, &config, &state.records)?;
    Ok(())
}

/// The live pane as seen by one pass.
struct WebPane<'a> {
    document: &'a Document,
    image: &'a HtmlImageElement,
    pane: &'a HtmlElement,
    owned: &'a mut Vec<Element>,
    listeners: &'a mut Vec<EventListener>,
}

impl WebPane<'_> {
    fn append_owned(&mut self, tag: &str, class: &str) -> Result<HtmlElement, RenderError> {
        let element = create(self.document, tag, class)?;
        set_style(&element, "position", "absolute")?;
        self.pane.append_child(&element).map_err(dom_error)?;
        self.owned.push(element.clone().into());
        Ok(element)
    }
}

fn class_list(base: &str, extra: Option<String>) -> String {
    match extra {
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}

impl PaneSurface for WebPane<'_> {
    type Marker = HtmlElement;
    type Popup = HtmlElement;
    type Error = RenderError;

    fn container_size(&self) -> Size {
        client_size(self.image)
    }

    fn clear_owned(&mut self) -> Result<(), RenderError> {
        for node in self.owned.drain(..) {
            node.remove();
        }
        self.listeners.clear();
        Ok(())
    }

    fn add_marker(&mut self, record: &AnnotationRecord) -> Result<HtmlElement, RenderError> {
        let marker = self.append_owned("div", &class_list(MARKER_CLASS, record.marker_class()))?;
        let text = create(self.document, "span", MARKER_TEXT_CLASS)?;
        marker.append_child(&text).map_err(dom_error)?;
        Ok(marker)
    }

    fn marker_size(&self, marker: &HtmlElement) -> Size {
        client_size(marker)
    }

    fn add_popup(&mut self, record: &AnnotationRecord) -> Result<HtmlElement, RenderError> {
        let popup = self.append_owned("div", &class_list(POPUP_CLASS, record.popup_class()))?;
        popup::compose(self.document, &popup, record)?;
        Ok(popup)
    }

    fn popup_size(&self, popup: &HtmlElement) -> Size {
        rect_size(popup)
    }

    fn place_marker(&mut self, marker: &HtmlElement, at: Point, z: i32) -> Result<(), RenderError> {
        place(marker, at)?;
        set_z(marker, z)
    }

    fn place_popup(&mut self, popup: &HtmlElement, at: Point, z: i32) -> Result<(), RenderError> {
        place(popup, at)?;
        set_z(popup, z)
    }

    fn bind_visibility(
        &mut self,
        marker: &HtmlElement,
        popup: &HtmlElement,
        initial: Visibility,
    ) -> Result<(), RenderError> {
        let toggle = Rc::new(Toggle {
            state: Cell::new(initial),
            marker: marker.clone(),
            popup: popup.clone(),
        });
        toggle.apply(initial)?;
        let bindings = [
            (marker, "click", PointerEvent::Click),
            (marker, "mouseenter", PointerEvent::Enter),
            (marker, "mouseleave", PointerEvent::Leave),
            (popup, "mouseenter", PointerEvent::Enter),
            (popup, "mouseleave", PointerEvent::Leave),
        ];
        for (target, event_type, event) in bindings {
            let toggle = Rc::clone(&toggle);
            self.listeners
                .push(EventListener::new(target, event_type, move |_| {
                    toggle.handle(event)
                }));
        }
        Ok(())
    }
}

/// Visibility of one marker/popup pair, driven by pointer listeners.
struct Toggle {
    state: Cell<Visibility>,
    marker: HtmlElement,
    popup: HtmlElement,
}

impl Toggle {
    fn handle(&self, event: PointerEvent) {
        let next = self.state.get().transition(event);
        self.state.set(next);
        if let Err(err) = self.apply(next) {
            error!("{err}");
        }
    }

    fn apply(&self, visibility: Visibility) -> Result<(), RenderError> {
        let layering = visibility.layering();
        set_style(&self.popup, "display", layering.popup_display)?;
        set_z(&self.popup, layering.popup_z)?;
        set_z(&self.marker, layering.marker_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list() {
        assert_eq!(class_list(MARKER_CLASS, None), "mapannotpinbox");
        assert_eq!(
            class_list(MARKER_CLASS, Some("redpin".to_string())),
            "mapannotpinbox redpin"
        );
    }
}
