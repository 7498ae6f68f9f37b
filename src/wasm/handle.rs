use tracing::info;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::render::{self, Mount, SharedMount};
use crate::config::{self, GlitchConfig, SquaresConfig};
use crate::effect::{Background, EffectKind};
use crate::error::EffectError;
use crate::page::{self, PageSignals};

fn random_seed() -> u64 {
    let half = || (js_sys::Math::random() * u32::MAX as f64) as u64;
    (half() << 32) | half()
}

/// A mounted (or mountable) background. The page keeps this handle; it is
/// also what diagnostic tooling inspects.
#[wasm_bindgen]
pub struct EffectHandle {
    mount: SharedMount,
}

impl EffectHandle {
    fn from_background(background: Background) -> Self {
        Self {
            mount: Mount::shared(background),
        }
    }
}

#[wasm_bindgen]
impl EffectHandle {
    /// Letter glitch from a JSON options object (empty string for defaults).
    #[wasm_bindgen(js_name = letterGlitch)]
    pub fn letter_glitch(options: &str) -> Result<EffectHandle, JsValue> {
        let config: GlitchConfig = config::from_json(options)?;
        Ok(Self::from_background(Background::glitch(config, random_seed())?))
    }

    pub fn squares(options: &str) -> Result<EffectHandle, JsValue> {
        let config: SquaresConfig = config::from_json(options)?;
        Ok(Self::from_background(Background::squares(config)?))
    }

    pub fn init(&self, container: &HtmlElement) -> Result<(), JsValue> {
        render::init(&self.mount, container)
    }

    pub fn resize(&self) {
        render::resize_now(&self.mount);
    }

    pub fn stop(&self) {
        render::stop(&self.mount);
    }

    pub fn resume(&self) -> Result<(), JsValue> {
        render::resume(&self.mount)
    }

    pub fn destroy(&self) {
        render::destroy(&self.mount);
    }

    pub fn phase(&self) -> String {
        self.mount.borrow().runner().phase().to_string()
    }

    /// JSON snapshot of the effect's state.
    pub fn diagnostics(&self) -> Result<String, JsValue> {
        Ok(self.mount.borrow().runner().diagnostics().to_json()?)
    }
}

/// Mounts at most one background on `document.body` and swaps them.
#[wasm_bindgen]
#[derive(Default)]
pub struct PageController {
    current: Option<EffectHandle>,
}

#[wasm_bindgen]
impl PageController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PageController {
        PageController::default()
    }

    /// Mount whatever the current page calls for. Returns whether anything
    /// was mounted.
    #[wasm_bindgen(js_name = mountForPage)]
    pub fn mount_for_page(&mut self) -> Result<bool, JsValue> {
        let signals = read_signals()?;
        match page::select_background(&signals) {
            Some(kind) => {
                self.mount_kind(kind)?;
                Ok(true)
            }
            None => {
                self.unmount();
                Ok(false)
            }
        }
    }

    /// Tear down the current background and mount `kind`
    /// (`"letterGlitch"` or `"squares"`).
    #[wasm_bindgen(js_name = switchTo)]
    pub fn switch_to(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind: EffectKind = kind.parse()?;
        self.mount_kind(kind)
    }

    pub fn unmount(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.destroy();
        }
    }

    /// The live effect, for diagnostic tooling.
    pub fn current(&self) -> Option<EffectHandle> {
        self.current.as_ref().map(|h| EffectHandle {
            mount: h.mount.clone(),
        })
    }

    pub fn diagnostics(&self) -> Result<String, JsValue> {
        match &self.current {
            Some(handle) => handle.diagnostics(),
            None => Ok("null".to_string()),
        }
    }
}

impl PageController {
    fn mount_kind(&mut self, kind: EffectKind) -> Result<(), JsValue> {
        self.unmount();
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .ok_or_else(|| EffectError::environment("no document body"))?;
        let handle = EffectHandle::from_background(Background::page_preset(kind, random_seed())?);
        handle.init(&body)?;
        info!(?kind, "page background mounted");
        self.current = Some(handle);
        Ok(())
    }
}

fn read_signals() -> Result<PageSignals, JsValue> {
    let win = web_sys::window().ok_or_else(|| EffectError::environment("no window"))?;
    let location = win.location();
    let stored_preference = win
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(page::PREFERENCE_KEY).ok().flatten());
    Ok(PageSignals {
        path: location.pathname()?,
        query: location.search()?,
        stored_preference,
    })
}

/// Select and mount the page's background. The returned controller is the
/// only handle to it.
#[wasm_bindgen(js_name = mountPageBackground)]
pub fn mount_page_background() -> Result<PageController, JsValue> {
    let mut controller = PageController::new();
    controller.mount_for_page()?;
    Ok(controller)
}
