//! Error type shared by the slideshow core, the browser glue and the site tooling.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while building or driving a slideshow.
///
/// Audio failures are deliberately absent: they are swallowed where they occur.
#[derive(Error, Debug)]
pub enum SlideshowError {
    /// Configuration values that cannot drive a slideshow.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while preparing the static site.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JavaScript interop error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A required page element is absent.
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// The page template could not be rendered.
    #[error("Template error: {0}")]
    Template(String),
}

impl From<JsValue> for SlideshowError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .unwrap_or_else(|| format!("{js_val:?}"));
        SlideshowError::JavaScript(message)
    }
}

impl From<SlideshowError> for JsValue {
    fn from(err: SlideshowError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type for slideshow operations.
pub type SlideshowResult<T> = Result<T, SlideshowError>;
