//! Browser-side behaviour for the SaaviGen.AI marketing site.
//!
//! The page is rendered on the server; this crate only attaches behaviour to
//! the existing markup (navigation state, mobile menu, smooth scrolling, the
//! contact form, CTA buttons, toasts and a few viewport effects).

use std::rc::Rc;

use log::{info, warn};
use web_sys::Document;

pub mod clock;
pub mod config;
pub mod dom;
pub mod error;
pub mod styles;

pub mod components {
    pub mod contact_form;
    pub mod cta_buttons;
    pub mod mobile_menu;
    pub mod navigation;
    pub mod notification;
    pub mod reveal;
    pub mod ripple;
    pub mod smooth_scroll;
}

use clock::BrowserClock;
use components::notification::{DomToastSurface, NotificationCenter, PageNotifications};
use components::{contact_form, cta_buttons, mobile_menu, navigation, reveal, ripple, smooth_scroll};
use config::Config;
use error::DomResult;

/// Logs and swallows a feature that could not be wired; the rest of the page keeps working.
fn wire(feature: &str, result: DomResult<()>) {
    if let Err(e) = result {
        warn!("{} disabled: {}", feature, e);
    }
}

/// Attaches every feature to `document`. Safe to call once the DOM is parsed.
pub fn init(document: &Document) {
    let config = Config::from_document(document);
    let notifications: PageNotifications =
        Rc::new(NotificationCenter::new(DomToastSurface::new(document.clone(), &config)));

    wire("Navigation", navigation::init(document, &config));
    wire("Mobile menu", mobile_menu::init(document));
    wire("Smooth scrolling", smooth_scroll::init(document, &config));
    wire(
        "Contact form",
        contact_form::init(document, &config, notifications.clone(), BrowserClock),
    );
    wire(
        "CTA buttons",
        cta_buttons::init(document, &config, notifications, BrowserClock),
    );
    wire("Scroll effects", reveal::init_scroll_effects(document, &config));
    wire("Enhancement styles", styles::inject(document));
    wire("Interactive effects", ripple::init(document, &config));
    wire("Lazy animations", reveal::init_lazy_animations(document, &config));

    info!("Page behaviour initialised");
}

/// Whether `document.readyState` says parsing is over and the markup can be wired.
pub fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Runs [`init`] now if the document is parsed, otherwise on `DOMContentLoaded`.
pub fn start() -> DomResult<()> {
    let document = dom::document()?;

    if is_parsed(&document.ready_state()) {
        init(&document);
        return Ok(());
    }

    let target = document.clone();
    dom::listen(&document, "DOMContentLoaded", move |_| init(&target))
}

#[cfg(test)]
mod tests {
    use super::is_parsed;

    #[test]
    fn waits_only_while_loading() {
        assert!(!is_parsed("loading"));
        assert!(is_parsed("interactive"));
        assert!(is_parsed("complete"));
    }
}
