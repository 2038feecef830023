#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, FutureExt, LocalBoxFuture};
use saavigen_frontend::clock::Clock;
use saavigen_frontend::components::notification::{Notification, Notify, Severity, ToastSurface};
use saavigen_frontend::error::DomResult;

/// Clock whose sleeps complete immediately, remembering what was asked for.
#[derive(Default)]
pub struct InstantClock {
    pub sleeps: RefCell<Vec<Duration>>,
}

impl Clock for InstantClock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        future::ready(()).boxed_local()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: RefCell<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<(String, Severity)> {
        self.shown.borrow().last().cloned()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.shown.borrow_mut().push((message.to_string(), severity));
    }
}

/// Shared log of timeline events, so tests can assert on ordering across fakes.
pub type Timeline = Rc<RefCell<Vec<String>>>;

pub struct TimelineNotifier(pub Timeline);

impl Notify for TimelineNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.0.borrow_mut().push(format!("notify:{}:{}", severity.tag(), message));
    }
}

/// Toast surface that keeps "mounted" toasts in a list instead of the page.
#[derive(Default)]
pub struct FakeSurface {
    pub on_screen: RefCell<Vec<String>>,
    pub removed: RefCell<Vec<String>>,
    pub fail_next: Cell<bool>,
}

impl FakeSurface {
    /// What the close button or the auto-dismiss timer does to a toast.
    pub fn hide(&self, text: &str) {
        self.on_screen.borrow_mut().retain(|t| t != text);
    }
}

impl ToastSurface for FakeSurface {
    type Handle = String;

    fn mount(&self, notification: &Notification) -> DomResult<String> {
        if self.fail_next.replace(false) {
            return Err(saavigen_frontend::error::DomError::NoMatch("body".into()));
        }
        let text = notification.message().to_string();
        self.on_screen.borrow_mut().push(text.clone());
        Ok(text)
    }

    fn is_showing(&self, handle: &String) -> bool {
        self.on_screen.borrow().contains(handle)
    }

    fn remove(&self, handle: String) {
        self.on_screen.borrow_mut().retain(|t| *t != handle);
        self.removed.borrow_mut().push(handle);
    }
}
