//! Decorative canvas backgrounds for the browser: a letter glitch field and a
//! scrolling squares grid, sharing one mount/stop/destroy lifecycle.
//!
//! Everything outside `wasm` is platform-neutral and runs on the host, which
//! is where the effect state machines are tested.

pub mod color;
pub mod config;
pub mod diagnostics;
pub mod effect;
pub mod error;
pub mod glitch;
pub mod grid;
pub mod lifecycle;
pub mod page;
pub mod runner;
pub mod squares;
pub mod surface;

pub use effect::{Background, Effect, EffectKind, Placement};
pub use error::{EffectError, EffectResult};
pub use runner::{EffectRunner, FrameStatus};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod handle;
    mod render;

    pub use handle::{EffectHandle, PageController};

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::default());
        tracing::debug!("backdrop_wasm loaded");
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{EffectHandle, PageController};
