use crate::lifecycle::Phase;

/// Result alias used by every fallible operation in the crate.
pub type EffectResult<T> = Result<T, EffectError>;

/// Failures that can reach a caller.
///
/// Running effects never produce these: a frame that cannot draw or a color
/// that cannot be parsed is dropped silently. Errors only come out of option
/// parsing, lifecycle misuse and DOM setup.
#[derive(thiserror::Error, Debug)]
pub enum EffectError {
    /// Rejected effect options.
    #[error("config error: {0}")]
    Config(String),

    /// A color string that is neither hex nor `rgb(...)`.
    #[error("color error: {0}")]
    Color(String),

    /// An operation that is not valid in the runner's current phase.
    #[error("lifecycle error: cannot {action} while {phase}")]
    Lifecycle { phase: Phase, action: &'static str },

    /// The drawing environment (window, document, 2D context) is missing.
    #[error("environment unavailable: {0}")]
    Environment(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EffectError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    pub fn lifecycle(phase: Phase, action: &'static str) -> Self {
        Self::Lifecycle { phase, action }
    }

    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EffectError> for wasm_bindgen::JsValue {
    fn from(err: EffectError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
