// Browser plumbing: finding elements, measuring them, and event listeners
// that unregister themselves when dropped

use crate::error::FieldError;
use crate::field::AnchorLayout;
use crate::renderer::Surface;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, Window};

pub fn window() -> Result<Window, FieldError> {
    web_sys::window().ok_or(FieldError::NoWindow)
}

pub fn document() -> Result<Document, FieldError> {
    window()?.document().ok_or(FieldError::NoDocument)
}

pub fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, FieldError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| FieldError::MissingElement(format!("#{}", id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FieldError::WrongElement(format!("#{}", id), "canvas"))
}

pub fn html_element(document: &Document, selector: &str) -> Result<HtmlElement, FieldError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| FieldError::MissingElement(selector.to_owned()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FieldError::WrongElement(selector.to_owned(), "html element"))
}

/// Inner size of the viewport, in CSS pixels.
pub fn viewport_surface(window: &Window) -> Surface {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    Surface::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Layout box of an element (excluding transforms).
pub fn element_surface(element: &HtmlElement) -> Surface {
    Surface::new(
        element.offset_width().max(0) as u32,
        element.offset_height().max(0) as u32,
    )
}

/// Centers of every element matching `selector`, relative to the top left
/// corner of `container`.
pub struct DomAnchorLayout {
    container: Element,
    selector: String,
}

impl DomAnchorLayout {
    pub fn new(container: Element, selector: &str) -> Self {
        DomAnchorLayout {
            container,
            selector: selector.to_owned(),
        }
    }
}

impl AnchorLayout for DomAnchorLayout {
    fn read(&self, out: &mut Vec<Vector2<f64>>) {
        out.clear();
        let nodes = match self.container.query_selector_all(&self.selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("bad anchor selector {}: {:?}", self.selector, err);
                return;
            }
        };
        let origin = self.container.get_bounding_client_rect();
        for i in 0..nodes.length() {
            let element = match nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                Some(element) => element,
                None => continue,
            };
            let rect = element.get_bounding_client_rect();
            out.push([
                rect.left() - origin.left() + rect.width() / 2.0,
                rect.top() - origin.top() + rect.height() / 2.0,
            ]);
        }
    }
}

/// An event listener that is removed from its target on drop.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, FieldError>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("removing {} listener failed: {:?}", self.kind, err);
        }
    }
}
