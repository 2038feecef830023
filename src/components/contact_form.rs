//! Contact form: inline validation and a (simulated) send.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::clock::Clock;
use crate::components::notification::{Notify, Severity};
use crate::config::Config;
use crate::dom;
use crate::error::{DomResult, SubmitError};

pub const FORM_ID: &str = "contact-form";
pub const ERROR_CLASS: &str = "form-control--error";
pub const ERROR_MESSAGE_CLASS: &str = "form-error";

pub const SENDING_LABEL: &str = "Sending...";
pub const INVALID_NOTICE: &str = "Please fix the errors below and try again.";
pub const SENT_NOTICE: &str = "Thank you for your message! We will get back to you soon.";
pub const FAILED_NOTICE: &str = "Sorry, your message could not be sent. Please try again.";

pub const NAME_ERROR: &str = "Please enter a valid name (at least 2 characters)";
pub const EMAIL_MISSING: &str = "Please enter an email address";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_ERROR: &str = "Please enter a message (at least 10 characters)";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

// Deliberately loose: something@something.something with no whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Organization,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Organization, Field::Message];

    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Organization => "organization",
            Field::Message => "message",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Strips what a browser's `String.prototype.trim` strips, which includes the
/// byte order mark.
fn trim_field(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Trimmed form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, organization: &str, message: &str) -> Self {
        Self {
            name: trim_field(name).to_string(),
            email: trim_field(email).to_string(),
            organization: trim_field(organization).to_string(),
            message: trim_field(message).to_string(),
        }
    }

    /// Checks name, email and message. Organization is optional and never checked.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError { field: Field::Name, message: NAME_ERROR });
        }

        if self.email.is_empty() {
            errors.push(FieldError { field: Field::Email, message: EMAIL_MISSING });
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError { field: Field::Email, message: EMAIL_INVALID });
        }

        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError { field: Field::Message, message: MESSAGE_ERROR });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Delivery channel for a validated submission. Dropping the returned future cancels it.
pub trait Submitter {
    fn submit(&self, submission: ContactSubmission) -> LocalBoxFuture<'static, Result<(), SubmitError>>;
}

/// Stand-in for a backend: waits, then always succeeds.
pub struct SimulatedSubmitter<C: Clock> {
    clock: C,
    delay: Duration,
}

impl<C: Clock> SimulatedSubmitter<C> {
    pub fn new(clock: C, delay: Duration) -> Self {
        Self { clock, delay }
    }
}

impl<C: Clock> Submitter for SimulatedSubmitter<C> {
    fn submit(&self, submission: ContactSubmission) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
        debug!("Simulating send for {} <{}>", submission.name, submission.email);
        self.clock.sleep(self.delay).map(|_| Ok(())).boxed_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Invalid(Vec<FieldError>),
    Failed(SubmitError),
    /// A previous submission is still in flight.
    Busy,
}

pub trait FormView {
    /// Raw (untrimmed) field contents.
    fn read(&self) -> ContactSubmission;
    fn clear_errors(&self);
    fn show_field_error(&self, error: &FieldError);
    fn clear_field_error(&self, field: Field);
    /// Swaps the submit control into (or back out of) its busy state.
    fn set_sending(&self, sending: bool);
    fn reset(&self);
}

pub struct ContactForm<V, N, S> {
    view: V,
    notifier: N,
    submitter: S,
    phase: Cell<FormPhase>,
}

impl<V: FormView, N: Notify, S: Submitter> ContactForm<V, N, S> {
    pub fn new(view: V, notifier: N, submitter: S) -> Self {
        Self {
            view,
            notifier,
            submitter,
            phase: Cell::new(FormPhase::Idle),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn on_field_edited(&self, field: Field) {
        self.view.clear_field_error(field);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.phase.get() == FormPhase::Sending {
            debug!("Ignoring submit while sending");
            return SubmitOutcome::Busy;
        }

        self.view.clear_errors();
        let raw = self.view.read();
        let submission = ContactSubmission::new(&raw.name, &raw.email, &raw.organization, &raw.message);

        if let Err(errors) = submission.validate() {
            for error in &errors {
                self.view.show_field_error(error);
            }
            self.notifier.notify(INVALID_NOTICE, Severity::Error);
            return SubmitOutcome::Invalid(errors);
        }

        self.phase.set(FormPhase::Sending);
        self.view.set_sending(true);

        let result = self.submitter.submit(submission).await;

        let outcome = match result {
            Ok(()) => {
                self.notifier.notify(SENT_NOTICE, Severity::Success);
                self.view.reset();
                SubmitOutcome::Sent
            }
            Err(e) => {
                warn!("Contact form submission failed: {}", e);
                self.notifier.notify(FAILED_NOTICE, Severity::Error);
                SubmitOutcome::Failed(e)
            }
        };

        self.view.set_sending(false);
        self.phase.set(FormPhase::Idle);
        outcome
    }
}

const FIELD_ERROR_STYLE: &str = "
    color: var(--color-error);
    font-size: var(--font-size-sm);
    margin-top: var(--space-4);
";

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub struct DomFormView {
    document: Document,
    form: HtmlFormElement,
    submit_button: Option<HtmlButtonElement>,
    idle_label: RefCell<Option<String>>,
}

impl DomFormView {
    pub fn new(document: Document, form: HtmlFormElement) -> DomResult<Self> {
        let submit_button = dom::query::<HtmlButtonElement>(&form, "button[type=\"submit\"]")?;
        Ok(Self {
            document,
            form,
            submit_button,
            idle_label: RefCell::new(None),
        })
    }

    fn control(&self, field: Field) -> Option<Element> {
        self.form
            .query_selector(&format!("#{}", field.id()))
            .ok()
            .flatten()
    }

    fn value(&self, field: Field) -> String {
        self.control(field).map(|el| control_value(&el)).unwrap_or_default()
    }
}

impl FormView for DomFormView {
    fn read(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.value(Field::Name),
            email: self.value(Field::Email),
            organization: self.value(Field::Organization),
            message: self.value(Field::Message),
        }
    }

    fn clear_errors(&self) {
        for el in dom::query_all(&self.document, &format!(".{}", ERROR_MESSAGE_CLASS)).unwrap_or_default() {
            el.remove();
        }
        for el in dom::query_all(&self.document, &format!(".{}", ERROR_CLASS)).unwrap_or_default() {
            dom::set_class(&el, ERROR_CLASS, false);
        }
    }

    fn show_field_error(&self, error: &FieldError) {
        let Some(control) = self.control(error.field) else {
            return;
        };
        dom::set_class(&control, ERROR_CLASS, true);

        let Ok(note) = self.document.create_element("div") else {
            return;
        };
        note.set_class_name(ERROR_MESSAGE_CLASS);
        note.set_text_content(Some(error.message));
        let _ = note.set_attribute("style", FIELD_ERROR_STYLE);
        if let Some(parent) = control.parent_node() {
            let _ = parent.append_child(&note);
        }
    }

    fn clear_field_error(&self, field: Field) {
        let Some(control) = self.control(field) else {
            return;
        };
        dom::set_class(&control, ERROR_CLASS, false);
        if let Some(parent) = control.parent_element() {
            if let Ok(Some(note)) = parent.query_selector(&format!(".{}", ERROR_MESSAGE_CLASS)) {
                note.remove();
            }
        }
    }

    fn set_sending(&self, sending: bool) {
        let Some(button) = &self.submit_button else {
            return;
        };
        if sending {
            *self.idle_label.borrow_mut() = button.text_content();
            button.set_text_content(Some(SENDING_LABEL));
        } else if let Some(label) = self.idle_label.borrow_mut().take() {
            button.set_text_content(Some(&label));
        }
        button.set_disabled(sending);
    }

    fn reset(&self) {
        self.form.reset();
    }
}

pub fn init<N, C>(document: &Document, config: &Config, notifier: N, clock: C) -> DomResult<()>
where
    N: Notify + 'static,
    C: Clock + 'static,
{
    let form_el: HtmlFormElement = dom::element_by_id(document, FORM_ID)?;
    let view = DomFormView::new(document.clone(), form_el.clone())?;
    let submitter = SimulatedSubmitter::new(clock, config.submit_delay());
    let form = Rc::new(ContactForm::new(view, notifier, submitter));

    for control in dom::query_all_in(&form_el, "input, textarea")? {
        let Some(field) = Field::from_id(&control.id()) else {
            continue;
        };
        let form = form.clone();
        dom::listen(&control, "input", move |_| form.on_field_edited(field))?;
    }

    dom::listen(&form_el, "submit", move |e| {
        e.prevent_default();
        let form = form.clone();
        spawn_local(async move {
            let outcome = form.submit().await;
            debug!("Contact form submit: {:?}", outcome);
        });
    })?;

    info!("Contact form ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission::new(name, email, "", message)
    }

    fn failing_fields(s: &ContactSubmission) -> Vec<Field> {
        s.validate().err().unwrap_or_default().into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_submission_passes() {
        assert_eq!(submission("Ana", "ana@co.com", "Hello, I need more info.").validate(), Ok(()));
    }

    #[test]
    fn every_rule_reports_its_own_field() {
        let bad = submission("A", "bad", "short");
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], FieldError { field: Field::Name, message: NAME_ERROR });
        assert_eq!(errors[1], FieldError { field: Field::Email, message: EMAIL_INVALID });
        assert_eq!(errors[2], FieldError { field: Field::Message, message: MESSAGE_ERROR });
    }

    #[test]
    fn fields_are_trimmed_before_length_checks() {
        let s = submission("  A  ", "  ana@co.com ", "   123456789   ");
        assert_eq!(s.name, "A");
        assert_eq!(s.email, "ana@co.com");
        assert_eq!(failing_fields(&s), vec![Field::Name, Field::Message]);
    }

    #[test]
    fn byte_order_marks_are_trimmed_like_whitespace() {
        let padded = submission("\u{FEFF}Ana\u{FEFF}", "\u{FEFF} ana@co.com", "Hello, I need more info.");
        assert_eq!(padded.name, "Ana");
        assert_eq!(padded.email, "ana@co.com");
        assert_eq!(padded.validate(), Ok(()));

        let short = submission("\u{FEFF}A", "ana@co.com", "Hello, I need more info.");
        assert_eq!(failing_fields(&short), vec![Field::Name]);
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        assert!(submission("Al", "a@b.co", "0123456789").validate().is_ok());
    }

    #[test]
    fn empty_email_has_its_own_message() {
        let errors = submission("Ana", "   ", "Hello, I need more info.").validate().unwrap_err();
        assert_eq!(errors, vec![FieldError { field: Field::Email, message: EMAIL_MISSING }]);
    }

    #[test]
    fn email_pattern_is_permissive() {
        assert!(is_valid_email("ana@co.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        // Accepted even though no real mail server would take it.
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("ana@co"));
        assert!(!is_valid_email("ana @co.com"));
        assert!(!is_valid_email("ana@@co.com"));
    }

    #[test]
    fn organization_is_never_validated() {
        let s = ContactSubmission::new("Ana", "ana@co.com", "", "Hello, I need more info.");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn field_ids_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_id(field.id()), Some(field));
        }
        assert_eq!(Field::from_id("phone"), None);
    }
}
