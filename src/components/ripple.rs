use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::config::Config;
use crate::dom;
use crate::error::DomResult;

pub const RIPPLE_TARGETS: &str = ".btn";

/// Square box of a ripple relative to its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// Circle as wide as the button's larger side, centred on the click.
    pub fn new(rect: (f64, f64, f64, f64), click_x: f64, click_y: f64) -> Self {
        let (rect_left, rect_top, width, height) = rect;
        let size = width.max(height);
        Self {
            size,
            left: click_x - rect_left - size / 2.0,
            top: click_y - rect_top - size / 2.0,
        }
    }

    pub fn css(&self, duration_ms: u32) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; left: {left}px; top: {top}px; \
             background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
             animation: ripple {secs}s ease-out; pointer-events: none;",
            size = self.size,
            left = self.left,
            top = self.top,
            secs = f64::from(duration_ms) / 1000.0,
        )
    }
}

fn spawn_ripple(document: &Document, button: &Element, event: &MouseEvent, duration_ms: u32) -> DomResult<()> {
    let rect = button.get_bounding_client_rect();
    let geometry = RippleGeometry::new(
        (rect.left(), rect.top(), rect.width(), rect.height()),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );

    let ripple = document.create_element("span")?;
    ripple.set_attribute("style", &geometry.css(duration_ms))?;
    button.append_child(&ripple)?;

    Timeout::new(duration_ms, move || ripple.remove()).forget();
    Ok(())
}

pub fn init(document: &Document, config: &Config) -> DomResult<()> {
    let buttons = dom::query_all(document, RIPPLE_TARGETS)?;
    let count = buttons.len();
    let duration_ms = config.ripple_duration_ms;

    for button in buttons {
        let document = document.clone();
        let target = button.clone();
        dom::listen(&button, "click", move |e| {
            if let Some(click) = e.dyn_ref::<MouseEvent>() {
                let _ = spawn_ripple(&document, &target, click, duration_ms);
            }
        })?;
    }

    info!("Ripple effect on {} buttons", count);
    Ok(())
}
