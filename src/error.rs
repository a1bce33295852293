use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("element {0} is not a {1}")]
    WrongElement(String, &'static str),

    #[error("2d context unavailable on canvas {0}")]
    NoContext(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl FieldError {
    /// The page simply lacks this layer; attaching should quietly do nothing.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            FieldError::MissingElement(_) | FieldError::WrongElement(..) | FieldError::NoContext(_)
        )
    }
}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
