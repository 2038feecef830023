use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::Config;
use crate::dom;
use crate::error::DomResult;

/// Id referenced by a same-page anchor, or `None` for a bare `#` / external href.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Where to scroll so that a section starting at `section_top` clears the fixed header.
pub fn scroll_destination(section_top: f64, header_height: Option<f64>, config: &Config) -> f64 {
    let header = header_height.unwrap_or(config.fallback_header_height);
    section_top - header - config.scroll_margin
}

/// Smoothly scrolls to `#section_id`. Missing sections are ignored.
pub fn scroll_to_section(document: &Document, section_id: &str, config: &Config) {
    let Some(section) = document
        .get_element_by_id(section_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("No section #{} to scroll to", section_id);
        return;
    };

    let header_height = document
        .query_selector(".header")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| f64::from(el.offset_height()));
    let top = scroll_destination(f64::from(section.offset_top()), header_height, config);

    if let Ok(window) = dom::window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn init(document: &Document, config: &Config) -> DomResult<()> {
    let links = dom::query_all(document, "a[href^=\"#\"]")?;
    let count = links.len();

    for link in links {
        let document = document.clone();
        let config = config.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        dom::listen(&link, "click", move |e| {
            e.prevent_default();
            if let Some(id) = anchor_target(&href) {
                scroll_to_section(&document, id, &config);
            }
        })?;
    }

    info!("Smooth scrolling bound to {} anchors", count);
    Ok(())
}
