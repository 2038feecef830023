//! Viewport-triggered effects: one-shot fade-ins for content cards, and
//! decorative loops that stay paused until first seen.

use js_sys::Array;
use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::Config;
use crate::dom;
use crate::error::DomResult;

pub const FADE_IN_CLASS: &str = "animate-fade-in";

pub const REVEAL_TARGETS: [&str; 5] = [
    ".about__card",
    ".service-category",
    ".feature-card",
    ".use-case-card",
    ".testimonial-card",
];

pub const LAZY_ANIMATION_TARGETS: [&str; 2] = [".ai-brain", ".neural-network"];

pub fn selector(targets: &[&str]) -> String {
    targets.join(", ")
}

/// CSS `animation-play-state` of a lazily started decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Paused,
    Running,
}

impl PlayState {
    pub fn css_value(self) -> &'static str {
        match self {
            PlayState::Paused => "paused",
            PlayState::Running => "running",
        }
    }

    /// Visibility only ever starts an animation; nothing pauses it again.
    pub fn on_visible(self) -> Self {
        PlayState::Running
    }
}

fn observer_options(threshold: f64, root_margin: Option<&str>) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    options
}

/// Observes `targets` and calls `on_first_sight` once per element, then stops watching it.
fn observe_once<F>(targets: Vec<Element>, options: &IntersectionObserverInit, on_first_sight: F) -> DomResult<()>
where
    F: Fn(&Element) + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                let target = entry.target();
                on_first_sight(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?;
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    Ok(())
}

pub fn init_scroll_effects(document: &Document, config: &Config) -> DomResult<()> {
    let targets = dom::query_all(document, &selector(&REVEAL_TARGETS))?;
    let count = targets.len();
    let options = observer_options(config.reveal_threshold, Some(&config.reveal_root_margin));

    observe_once(targets, &options, |el| {
        dom::set_class(el, FADE_IN_CLASS, true);
    })?;

    info!("Fade-in observing {} elements", count);
    Ok(())
}

fn set_play_state(el: &Element, state: PlayState) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("animation-play-state", state.css_value());
    }
}

pub fn init_lazy_animations(document: &Document, config: &Config) -> DomResult<()> {
    let targets = dom::query_all(document, &selector(&LAZY_ANIMATION_TARGETS))?;
    let count = targets.len();
    for el in &targets {
        set_play_state(el, PlayState::default());
    }

    let options = observer_options(config.lazy_animation_threshold, None);
    observe_once(targets, &options, |el| {
        debug!("Starting decorative animation on <{}>", el.tag_name().to_lowercase());
        set_play_state(el, PlayState::default().on_visible());
    })?;

    info!("Lazy animations holding {} elements", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_join_targets() {
        assert_eq!(selector(&LAZY_ANIMATION_TARGETS), ".ai-brain, .neural-network");
        assert!(selector(&REVEAL_TARGETS).starts_with(".about__card, .service-category"));
    }

    #[test]
    fn play_state_never_returns_to_paused() {
        let state = PlayState::default();
        assert_eq!(state.css_value(), "paused");
        let state = state.on_visible();
        assert_eq!(state, PlayState::Running);
        assert_eq!(state.on_visible(), PlayState::Running);
    }
}
