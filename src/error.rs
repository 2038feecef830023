use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while talking to the page. None of these are shown to the visitor;
/// a feature that hits one is logged and left unwired.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("nothing matches `{0}`")]
    NoMatch(String),
    #[error("element `{selector}` is not a {expected}")]
    WrongType { selector: String, expected: &'static str },
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        DomError::Js(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

pub type DomResult<T> = Result<T, DomError>;
