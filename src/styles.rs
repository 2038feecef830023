use web_sys::Document;

use crate::error::{DomError, DomResult};

pub const STYLE_ELEMENT_ID: &str = "site-enhancements";

pub const ENHANCEMENT_CSS: &str = r#"
    .about__card,
    .service-category,
    .feature-card,
    .use-case-card,
    .testimonial-card {
        opacity: 0;
        transform: translateY(20px);
        transition: opacity 0.6s ease-out, transform 0.6s ease-out;
    }

    .animate-fade-in {
        opacity: 1 !important;
        transform: translateY(0) !important;
    }

    .header--scrolled {
        background: rgba(255, 255, 255, 0.98) !important;
        box-shadow: 0 2px 20px rgba(0, 0, 0, 0.1);
    }

    .nav__link--active {
        color: var(--color-primary) !important;
    }

    .nav__link--active::after {
        width: 100% !important;
    }

    body.nav-open {
        overflow: hidden;
    }

    .form-control--error {
        border-color: var(--color-error) !important;
        box-shadow: 0 0 0 3px rgba(239, 68, 68, 0.1) !important;
    }

    .form-error {
        color: var(--color-error);
        font-size: var(--font-size-sm);
        margin-top: var(--space-4);
    }

    @keyframes ripple {
        to {
            transform: scale(2);
            opacity: 0;
        }
    }

    @media (max-width: 768px) {
        .nav__menu {
            position: fixed !important;
            top: 100% !important;
            left: 0 !important;
            right: 0 !important;
            background: var(--color-surface) !important;
            border-top: 1px solid var(--color-border) !important;
            transform: translateY(-100%) !important;
            opacity: 0 !important;
            visibility: hidden !important;
            transition: all 0.3s ease !important;
            z-index: 999 !important;
        }

        .nav__menu--open {
            transform: translateY(0) !important;
            opacity: 1 !important;
            visibility: visible !important;
        }

        .nav__list {
            flex-direction: column !important;
            padding: 24px !important;
            gap: 16px !important;
        }

        .nav__toggle {
            display: flex !important;
        }

        .nav__toggle--open span:nth-child(1) {
            transform: rotate(45deg) translate(5px, 5px);
        }

        .nav__toggle--open span:nth-child(2) {
            opacity: 0;
        }

        .nav__toggle--open span:nth-child(3) {
            transform: rotate(-45deg) translate(7px, -6px);
        }
    }
"#;

/// Appends the enhancement stylesheet to `<head>` unless it is already there.
pub fn inject(document: &Document) -> DomResult<()> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| DomError::NoMatch("head".to_string()))?;
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(ENHANCEMENT_CSS));
    head.append_child(&style)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{contact_form, mobile_menu, navigation, reveal};

    #[test]
    fn stylesheet_covers_every_toggled_class() {
        for class in [
            reveal::FADE_IN_CLASS,
            navigation::HEADER_SCROLLED_CLASS,
            navigation::ACTIVE_LINK_CLASS,
            mobile_menu::MENU_OPEN_CLASS,
            mobile_menu::TOGGLE_OPEN_CLASS,
            mobile_menu::BODY_OPEN_CLASS,
            contact_form::ERROR_CLASS,
            contact_form::ERROR_MESSAGE_CLASS,
        ] {
            assert!(ENHANCEMENT_CSS.contains(class), "missing rule for {}", class);
        }
    }

    #[test]
    fn stylesheet_defines_ripple_keyframes() {
        assert!(ENHANCEMENT_CSS.contains("@keyframes ripple"));
    }
}
