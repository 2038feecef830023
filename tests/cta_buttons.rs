mod common;

use std::rc::Rc;
use std::time::Duration;

use common::{InstantClock, Timeline, TimelineNotifier};
use futures::executor::block_on;
use saavigen_frontend::components::cta_buttons::{CtaAction, CtaButtons, CtaView};
use saavigen_frontend::config::Config;

struct FakePage(Timeline);

impl CtaView for FakePage {
    fn prefill_message(&self, text: &str) {
        self.0.borrow_mut().push(format!("prefill:{}", text));
    }

    fn scroll_to_contact(&self) {
        self.0.borrow_mut().push("scroll:contact".into());
    }

    fn focus_name(&self) {
        self.0.borrow_mut().push("focus:name".into());
    }
}

fn run(action: CtaAction) -> (Vec<String>, Vec<Duration>) {
    let timeline = Timeline::default();
    let clock = Rc::new(InstantClock::default());
    let ctas = CtaButtons::new(
        FakePage(timeline.clone()),
        TimelineNotifier(timeline.clone()),
        clock.clone(),
        &Config::default(),
    );
    block_on(ctas.run(action));
    let events = timeline.borrow().clone();
    let sleeps = clock.sleeps.borrow().clone();
    (events, sleeps)
}

#[test]
fn training_prefills_announces_scrolls_and_focuses() {
    let (events, sleeps) = run(CtaAction::Training);

    assert_eq!(
        events,
        vec![
            format!("prefill:{}", CtaAction::Training.prefill()),
            format!("notify:info:{}", CtaAction::Training.notice()),
            "scroll:contact".to_string(),
            "focus:name".to_string(),
        ]
    );
    assert_eq!(sleeps, vec![Duration::from_millis(100), Duration::from_millis(500)]);
}

#[test]
fn compliance_uses_its_own_texts() {
    let (events, _) = run(CtaAction::Compliance);

    assert_eq!(
        events[0],
        "prefill:I am interested in your Compliance Readiness Assessment. Please provide more information about your compliance services and assessment process."
    );
    assert_eq!(
        events[1],
        "notify:info:Please fill out the form below to request a compliance readiness assessment."
    );
}

#[test]
fn delays_come_from_config() {
    let timeline = Timeline::default();
    let clock = Rc::new(InstantClock::default());
    let config = Config::from_json(r#"{ "cta_scroll_delay_ms": 0, "cta_focus_delay_ms": 250 }"#).unwrap();
    let ctas = CtaButtons::new(FakePage(timeline.clone()), TimelineNotifier(timeline), clock.clone(), &config);

    block_on(ctas.run(CtaAction::Training));

    assert_eq!(*clock.sleeps.borrow(), vec![Duration::ZERO, Duration::from_millis(250)]);
}
