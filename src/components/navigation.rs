use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement};

use crate::clock::{BrowserClock, Debouncer};
use crate::config::Config;
use crate::dom;
use crate::error::DomResult;

pub const HEADER_ID: &str = "header";
pub const NAV_LINK_CLASS: &str = "nav__link";
pub const ACTIVE_LINK_CLASS: &str = "nav__link--active";
pub const HEADER_SCROLLED_CLASS: &str = "header--scrolled";

/// Vertical extent of a page section, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position <= self.top + self.height
    }
}

/// Section whose span contains `scroll_y + offset`. Bounds are inclusive, so on
/// a shared edge the later section in document order wins.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64, offset: f64) -> Option<&str> {
    let position = scroll_y + offset;
    sections
        .iter()
        .filter(|s| s.contains(position))
        .last()
        .map(|s| s.id.as_str())
}

pub trait NavView {
    fn scroll_y(&self) -> f64;
    fn sections(&self) -> Vec<SectionSpan>;
    /// Marks the link for `section` active and every other link inactive.
    fn set_active_link(&self, section: Option<&str>);
    fn set_header_scrolled(&self, scrolled: bool);
}

pub struct Navigation<V: NavView> {
    view: V,
    scroll_offset: f64,
    scrolled_threshold: f64,
    active: Option<String>,
    header_scrolled: bool,
}

impl<V: NavView> Navigation<V> {
    pub fn new(view: V, config: &Config) -> Self {
        Self {
            view,
            scroll_offset: config.scroll_offset,
            scrolled_threshold: config.header_scrolled_threshold,
            active: None,
            header_scrolled: false,
        }
    }

    /// One (debounced) scroll tick.
    pub fn on_scroll(&mut self) {
        let scroll_y = self.view.scroll_y();
        let sections = self.view.sections();

        let next = active_section(&sections, scroll_y, self.scroll_offset).map(str::to_string);
        if next != self.active {
            debug!("Active section: {:?} -> {:?}", self.active, next);
            self.view.set_active_link(next.as_deref());
            self.active = next;
        }

        let scrolled = scroll_y > self.scrolled_threshold;
        if scrolled != self.header_scrolled {
            self.view.set_header_scrolled(scrolled);
            self.header_scrolled = scrolled;
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn header_scrolled(&self) -> bool {
        self.header_scrolled
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

pub struct DomNavView {
    document: Document,
    header: Option<Element>,
}

impl DomNavView {
    pub fn new(document: Document) -> Self {
        let header = document.get_element_by_id(HEADER_ID);
        Self { document, header }
    }

    fn links(&self) -> Vec<Element> {
        dom::query_all(&self.document, &format!(".{}", NAV_LINK_CLASS)).unwrap_or_default()
    }
}

impl NavView for DomNavView {
    fn scroll_y(&self) -> f64 {
        dom::window()
            .ok()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0)
    }

    fn sections(&self) -> Vec<SectionSpan> {
        dom::query_all(&self.document, "section[id]")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|el| {
                let id = el.id();
                let el = el.dyn_into::<HtmlElement>().ok()?;
                Some(SectionSpan::new(id, el.offset_top().into(), el.offset_height().into()))
            })
            .collect()
    }

    fn set_active_link(&self, section: Option<&str>) {
        let target = section.map(|id| format!("#{}", id));
        for link in self.links() {
            let is_target = target.is_some() && link.get_attribute("href") == target;
            dom::set_class(&link, ACTIVE_LINK_CLASS, is_target);
        }
    }

    fn set_header_scrolled(&self, scrolled: bool) {
        if let Some(header) = &self.header {
            dom::set_class(header, HEADER_SCROLLED_CLASS, scrolled);
        }
    }
}

pub fn init(document: &Document, config: &Config) -> DomResult<()> {
    let navigation = Rc::new(RefCell::new(Navigation::new(DomNavView::new(document.clone()), config)));
    let debouncer = Debouncer::new(BrowserClock, config.scroll_debounce());

    let window = dom::window()?;
    dom::listen(&window, "scroll", move |_| {
        let navigation = navigation.clone();
        spawn_local(debouncer.schedule(move || navigation.borrow_mut().on_scroll()));
    })?;

    info!("Navigation highlighting ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("home", 0.0, 600.0),
            SectionSpan::new("about", 600.0, 800.0),
            SectionSpan::new("contact", 1400.0, 500.0),
        ]
    }

    #[test]
    fn offset_is_added_before_matching() {
        assert_eq!(active_section(&page(), 0.0, 100.0), Some("home"));
        assert_eq!(active_section(&page(), 520.0, 100.0), Some("about"));
        assert_eq!(active_section(&page(), 1300.0, 100.0), Some("contact"));
    }

    #[test]
    fn shared_boundary_goes_to_later_section() {
        assert_eq!(active_section(&page(), 500.0, 100.0), Some("about"));
    }

    #[test]
    fn nothing_matches_past_the_last_section() {
        assert_eq!(active_section(&page(), 5000.0, 100.0), None);
        assert_eq!(active_section(&[], 0.0, 100.0), None);
    }
}
