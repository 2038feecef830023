use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::error::DomResult;

pub const TOGGLE_ID: &str = "nav-toggle";
pub const MENU_ID: &str = "nav-menu";
pub const MENU_OPEN_CLASS: &str = "nav__menu--open";
pub const TOGGLE_OPEN_CLASS: &str = "nav__toggle--open";
pub const BODY_OPEN_CLASS: &str = "nav-open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleClicked,
    NavLinkClicked,
    /// A click that landed neither in the menu nor on the toggle.
    OutsideClicked,
    KeyPressed(String),
}

pub trait MenuView {
    fn render(&self, state: MenuState);
}

pub struct MobileMenu<V: MenuView> {
    view: V,
    state: MenuState,
}

impl<V: MenuView> MobileMenu<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Applies `event`; returns whether the state changed.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match (&event, self.state) {
            (MenuEvent::ToggleClicked, MenuState::Closed) => MenuState::Open,
            (MenuEvent::ToggleClicked, MenuState::Open) => MenuState::Closed,
            (MenuEvent::KeyPressed(key), _) if key != "Escape" => self.state,
            _ => MenuState::Closed,
        };

        if next == self.state {
            return false;
        }
        debug!("Mobile menu {:?} -> {:?} on {:?}", self.state, next, event);
        self.state = next;
        self.view.render(next);
        true
    }
}

pub struct DomMenuView {
    menu: Element,
    toggle: Element,
    body: Option<HtmlElement>,
}

impl MenuView for DomMenuView {
    fn render(&self, state: MenuState) {
        let open = state.is_open();
        dom::set_class(&self.menu, MENU_OPEN_CLASS, open);
        dom::set_class(&self.toggle, TOGGLE_OPEN_CLASS, open);
        if let Some(body) = &self.body {
            dom::set_class(body, BODY_OPEN_CLASS, open);
        }
    }
}

pub fn init(document: &Document) -> DomResult<()> {
    let toggle: Element = dom::element_by_id(document, TOGGLE_ID)?;
    let menu_el: Element = dom::element_by_id(document, MENU_ID)?;
    let view = DomMenuView {
        menu: menu_el.clone(),
        toggle: toggle.clone(),
        body: document.body(),
    };
    let menu = Rc::new(RefCell::new(MobileMenu::new(view)));

    {
        let menu = menu.clone();
        dom::listen(&toggle, "click", move |e| {
            e.prevent_default();
            e.stop_propagation();
            menu.borrow_mut().handle(MenuEvent::ToggleClicked);
        })?;
    }

    for link in dom::query_all(document, ".nav__link")? {
        let menu = menu.clone();
        dom::listen(&link, "click", move |_| {
            menu.borrow_mut().handle(MenuEvent::NavLinkClicked);
        })?;
    }

    {
        let menu = menu.clone();
        dom::listen(document, "click", move |e| {
            let target = dom::event_node(&e);
            let inside = menu_el.contains(target.as_ref()) || toggle.contains(target.as_ref());
            if !inside {
                menu.borrow_mut().handle(MenuEvent::OutsideClicked);
            }
        })?;
    }

    dom::listen(document, "keydown", move |e| {
        if let Some(key_event) = e.dyn_ref::<KeyboardEvent>() {
            menu.borrow_mut().handle(MenuEvent::KeyPressed(key_event.key()));
        }
    })?;

    info!("Mobile menu ready");
    Ok(())
}
