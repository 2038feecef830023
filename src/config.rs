use std::time::Duration;

use log::Level;
use serde::Deserialize;
use thiserror::Error;

/// Id of the optional inline JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed site config: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Page-behaviour tunables. Distances are CSS pixels, durations milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Added to the vertical offset before matching it against a section.
    pub scroll_offset: f64,
    /// Vertical offset after which the header is marked as scrolled.
    pub header_scrolled_threshold: f64,
    /// Used when the page has no `.header` element to measure.
    pub fallback_header_height: f64,
    /// Extra gap left above a section after smooth scrolling to it.
    pub scroll_margin: f64,
    pub scroll_debounce_ms: u32,
    pub submit_delay_ms: u32,
    pub cta_scroll_delay_ms: u32,
    pub cta_focus_delay_ms: u32,
    pub notification_enter_delay_ms: u32,
    pub notification_auto_dismiss_ms: u32,
    pub notification_exit_ms: u32,
    pub ripple_duration_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub lazy_animation_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_offset: 100.0,
            header_scrolled_threshold: 50.0,
            fallback_header_height: 80.0,
            scroll_margin: 20.0,
            scroll_debounce_ms: 10,
            submit_delay_ms: 1_500,
            cta_scroll_delay_ms: 100,
            cta_focus_delay_ms: 500,
            notification_enter_delay_ms: 100,
            notification_auto_dismiss_ms: 5_000,
            notification_exit_ms: 300,
            ripple_duration_ms: 600,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            lazy_animation_threshold: 0.1,
        }
    }
}

impl Config {
    /// Parses an inline JSON override. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the `#site-config` block from the live document, if the page has one.
    pub fn from_document(document: &web_sys::Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms.into())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.into())
    }

    pub fn cta_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.cta_scroll_delay_ms.into())
    }

    pub fn cta_focus_delay(&self) -> Duration {
        Duration::from_millis(self.cta_focus_delay_ms.into())
    }
}
