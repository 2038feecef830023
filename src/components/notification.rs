//! Floating toast notifications.
//!
//! At most one toast is on screen: showing a new one removes the current one
//! outright instead of stacking. Toasts slide in, and slide out again either
//! when the close button is pressed or after the auto-dismiss delay.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement};

use crate::config::Config;
use crate::dom;
use crate::error::{DomError, DomResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl Severity {
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "#10b981",
            Severity::Error => "#ef4444",
            Severity::Info => "#3b82f6",
            Severity::Warning => "#f59e0b",
        }
    }

    pub fn class_name(self) -> String {
        format!("notification notification--{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: NotificationId::next(),
            message: message.into(),
            severity,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Anything that can put a short message in front of the visitor.
pub trait Notify {
    fn notify(&self, message: &str, severity: Severity);
}

impl<T: Notify + ?Sized> Notify for Rc<T> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}

/// Where toasts are drawn.
pub trait ToastSurface {
    type Handle;

    /// Puts `notification` on screen and starts its own enter/auto-dismiss timers.
    fn mount(&self, notification: &Notification) -> DomResult<Self::Handle>;

    /// False once the toast was closed or timed out, even while it is still animating out.
    fn is_showing(&self, handle: &Self::Handle) -> bool;

    /// Immediate removal, cancelling any pending timers of the toast.
    fn remove(&self, handle: Self::Handle);
}

/// Owns the single visible toast slot.
///
/// The handle of a closed toast stays in the slot until the next `show`, so the
/// toast's listeners outlive its exit animation.
pub struct NotificationCenter<S: ToastSurface> {
    surface: S,
    current: RefCell<Option<(NotificationId, S::Handle)>>,
}

impl<S: ToastSurface> NotificationCenter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: RefCell::new(None),
        }
    }

    pub fn show(&self, message: &str, severity: Severity) -> Option<NotificationId> {
        if let Some((old, handle)) = self.current.borrow_mut().take() {
            debug!("Replacing notification {:?}", old);
            self.surface.remove(handle);
        }

        let notification = Notification::new(message, severity);
        match self.surface.mount(&notification) {
            Ok(handle) => {
                debug!("Showing {} notification {:?}", severity.tag(), notification.id());
                *self.current.borrow_mut() = Some((notification.id(), handle));
                Some(notification.id())
            }
            Err(e) => {
                warn!("Could not show notification: {}", e);
                None
            }
        }
    }

    /// The toast on screen, if it has not been closed or timed out.
    pub fn current(&self) -> Option<NotificationId> {
        self.current
            .borrow()
            .as_ref()
            .filter(|(_, handle)| self.surface.is_showing(handle))
            .map(|(id, _)| *id)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ToastSurface> Notify for NotificationCenter<S> {
    fn notify(&self, message: &str, severity: Severity) {
        self.show(message, severity);
    }
}

const TOAST_STYLE: &str = "
    position: fixed;
    top: 100px;
    right: 20px;
    max-width: 400px;
    padding: 16px 20px;
    color: white;
    border-radius: 8px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    z-index: 10000;
    font-family: Inter, var(--font-family-base);
    font-size: 14px;
    line-height: 1.5;
    transform: translateX(100%);
    transition: transform 0.3s ease-in-out;
    white-space: pre-line;
";

const CLOSE_BUTTON_STYLE: &str = "
    position: absolute;
    top: 8px;
    right: 12px;
    background: none;
    border: none;
    color: white;
    font-size: 18px;
    cursor: pointer;
    padding: 0;
    line-height: 1;
";

const HIDDEN: &str = "translateX(100%)";
const SHOWN: &str = "translateX(0)";

/// A toast element appended to `<body>`.
pub struct DomToast {
    element: HtmlElement,
    hidden: Rc<Cell<bool>>,
    _enter: Timeout,
    _auto_dismiss: Timeout,
    _on_close: Closure<dyn FnMut(Event)>,
}

pub struct DomToastSurface {
    document: Document,
    enter_delay_ms: u32,
    auto_dismiss_ms: u32,
    exit_ms: u32,
}

impl DomToastSurface {
    pub fn new(document: Document, config: &Config) -> Self {
        Self {
            document,
            enter_delay_ms: config.notification_enter_delay_ms,
            auto_dismiss_ms: config.notification_auto_dismiss_ms,
            exit_ms: config.notification_exit_ms,
        }
    }

    fn create(&self, tag: &str) -> DomResult<HtmlElement> {
        self.document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::WrongType {
                selector: tag.to_string(),
                expected: "HtmlElement",
            })
    }
}

/// Slides `element` out, then detaches it.
fn hide(element: &HtmlElement, hidden: &Cell<bool>, exit_ms: u32) {
    hidden.set(true);
    let _ = element.style().set_property("transform", HIDDEN);
    let element = element.clone();
    Timeout::new(exit_ms, move || {
        if element.parent_node().is_some() {
            element.remove();
        }
    })
    .forget();
}

impl ToastSurface for DomToastSurface {
    type Handle = DomToast;

    fn mount(&self, notification: &Notification) -> DomResult<DomToast> {
        let severity = notification.severity();
        let element = self.create("div")?;
        element.set_class_name(&severity.class_name());
        element.style().set_css_text(TOAST_STYLE);
        element.style().set_property("background", severity.color())?;
        element.set_text_content(Some(notification.message()));

        let close = self.create("button")?;
        close.set_text_content(Some("\u{d7}"));
        close.style().set_css_text(CLOSE_BUTTON_STYLE);
        let hidden = Rc::new(Cell::new(false));
        let on_close = {
            let element = element.clone();
            let hidden = hidden.clone();
            let exit_ms = self.exit_ms;
            Closure::wrap(Box::new(move |_: Event| hide(&element, &hidden, exit_ms)) as Box<dyn FnMut(Event)>)
        };
        close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
        element.append_child(&close)?;

        dom::body(&self.document)?.append_child(&element)?;

        let enter = {
            let element = element.clone();
            Timeout::new(self.enter_delay_ms, move || {
                let _ = element.style().set_property("transform", SHOWN);
            })
        };
        let auto_dismiss = {
            let element = element.clone();
            let hidden = hidden.clone();
            let exit_ms = self.exit_ms;
            Timeout::new(self.auto_dismiss_ms, move || hide(&element, &hidden, exit_ms))
        };

        Ok(DomToast {
            element,
            hidden,
            _enter: enter,
            _auto_dismiss: auto_dismiss,
            _on_close: on_close,
        })
    }

    fn is_showing(&self, handle: &DomToast) -> bool {
        !handle.hidden.get()
    }

    fn remove(&self, handle: DomToast) {
        // Detach first so the close listener is never reachable once dropped.
        handle.element.remove();
    }
}

pub type PageNotifications = Rc<NotificationCenter<DomToastSurface>>;
