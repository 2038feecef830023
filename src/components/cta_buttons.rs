use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::clock::Clock;
use crate::components::contact_form::Field;
use crate::components::notification::{Notify, Severity};
use crate::components::smooth_scroll;
use crate::config::Config;
use crate::dom;
use crate::error::DomResult;

pub const CTA_CLASS: &str = "cta-btn";
pub const ACTION_ATTR: &str = "data-action";
pub const CONTACT_SECTION_ID: &str = "contact";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaAction {
    Training,
    Compliance,
}

impl CtaAction {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "training" => Some(CtaAction::Training),
            "compliance" => Some(CtaAction::Compliance),
            _ => None,
        }
    }

    /// Text dropped into the message field.
    pub fn prefill(self) -> &'static str {
        match self {
            CtaAction::Training => "I am interested in your Corporate Training programs. Please provide more information about your training offerings and how they can help our organization.",
            CtaAction::Compliance => "I am interested in your Compliance Readiness Assessment. Please provide more information about your compliance services and assessment process.",
        }
    }

    pub fn notice(self) -> &'static str {
        match self {
            CtaAction::Training => "Please fill out the form below to request corporate training information.",
            CtaAction::Compliance => "Please fill out the form below to request a compliance readiness assessment.",
        }
    }
}

pub trait CtaView {
    fn prefill_message(&self, text: &str);
    fn scroll_to_contact(&self);
    fn focus_name(&self);
}

pub struct CtaButtons<V, N, C> {
    view: V,
    notifier: N,
    clock: C,
    scroll_delay: Duration,
    focus_delay: Duration,
}

impl<V: CtaView, N: Notify, C: Clock> CtaButtons<V, N, C> {
    pub fn new(view: V, notifier: N, clock: C, config: &Config) -> Self {
        Self {
            view,
            notifier,
            clock,
            scroll_delay: config.cta_scroll_delay(),
            focus_delay: config.cta_focus_delay(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Pre-fills the form, announces it, then scrolls there and focuses the name field.
    pub async fn run(&self, action: CtaAction) {
        debug!("CTA {:?}", action);
        self.view.prefill_message(action.prefill());
        self.notifier.notify(action.notice(), Severity::Info);

        self.clock.sleep(self.scroll_delay).await;
        self.view.scroll_to_contact();

        self.clock.sleep(self.focus_delay).await;
        self.view.focus_name();
    }
}

pub struct DomCtaView {
    document: Document,
    config: Config,
}

impl CtaView for DomCtaView {
    fn prefill_message(&self, text: &str) {
        let Some(field) = self.document.get_element_by_id(Field::Message.id()) else {
            return;
        };
        if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(text);
        } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            input.set_value(text);
        }
    }

    fn scroll_to_contact(&self) {
        smooth_scroll::scroll_to_section(&self.document, CONTACT_SECTION_ID, &self.config);
    }

    fn focus_name(&self) {
        if let Ok(name) = dom::element_by_id::<HtmlElement>(&self.document, Field::Name.id()) {
            let _ = name.focus();
        }
    }
}

pub fn init<N, C>(document: &Document, config: &Config, notifier: N, clock: C) -> DomResult<()>
where
    N: Notify + 'static,
    C: Clock + 'static,
{
    let view = DomCtaView {
        document: document.clone(),
        config: config.clone(),
    };
    let ctas = Rc::new(CtaButtons::new(view, notifier, clock, config));

    let buttons = dom::query_all(document, &format!(".{}", CTA_CLASS))?;
    let count = buttons.len();
    for button in buttons {
        let ctas = ctas.clone();
        let action = button.get_attribute(ACTION_ATTR).as_deref().and_then(CtaAction::from_attr);
        dom::listen(&button, "click", move |e| {
            e.prevent_default();
            let Some(action) = action else {
                return;
            };
            let ctas = ctas.clone();
            spawn_local(async move { ctas.run(action).await });
        })?;
    }

    info!("{} CTA buttons ready", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_two_actions_are_recognised() {
        assert_eq!(CtaAction::from_attr("training"), Some(CtaAction::Training));
        assert_eq!(CtaAction::from_attr("compliance"), Some(CtaAction::Compliance));
        assert_eq!(CtaAction::from_attr("Training"), None);
        assert_eq!(CtaAction::from_attr("demo"), None);
    }

    #[test]
    fn canned_texts_name_the_intent() {
        assert!(CtaAction::Training.prefill().contains("Corporate Training"));
        assert!(CtaAction::Compliance.prefill().contains("Compliance Readiness Assessment"));
        assert!(CtaAction::Training.notice().contains("corporate training"));
        assert!(CtaAction::Compliance.notice().contains("compliance readiness"));
    }
}
