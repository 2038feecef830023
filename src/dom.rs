//! Thin helpers over `web-sys` shared by the feature modules.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{DomError, DomResult};

pub fn window() -> DomResult<Window> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> DomResult<Document> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn body(document: &Document) -> DomResult<HtmlElement> {
    document
        .body()
        .ok_or_else(|| DomError::NoMatch("body".to_string()))
}

/// Looks up `#id` and casts it to the requested element type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> DomResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongType {
            selector: format!("#{}", id),
            expected: std::any::type_name::<T>(),
        })
}

pub fn query<T: JsCast>(root: &Element, selector: &str) -> DomResult<Option<T>> {
    match root.query_selector(selector)? {
        Some(el) => el.dyn_into::<T>().map(Some).map_err(|_| DomError::WrongType {
            selector: selector.to_string(),
            expected: std::any::type_name::<T>(),
        }),
        None => Ok(None),
    }
}

/// Collects every element under `document` matching `selector`, skipping text nodes.
pub fn query_all(document: &Document, selector: &str) -> DomResult<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Same as [`query_all`] but scoped to `root`.
pub fn query_all_in(root: &Element, selector: &str) -> DomResult<Vec<Element>> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Adds or removes `class` depending on `on`.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
///
/// The closure is leaked; listeners stay bound until the page unloads.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> DomResult<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Event target of `event` as a DOM node, if it is one.
pub fn event_node(event: &Event) -> Option<web_sys::Node> {
    event.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok())
}
