use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    MouseEvent, Window,
};

use super::canvas::Canvas2d;
use crate::effect::{Background, Effect, Placement};
use crate::error::EffectError;
use crate::lifecycle::{Debounce, Phase};
use crate::runner::EffectRunner;

// Holds the animation-frame closure so the loop can hand a reference to
// itself back to `request_animation_frame`. The closure only keeps weak
// references, so dropping the mount drops the loop.
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub(crate) type SharedMount = Rc<RefCell<Mount>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Browser side of one mounted effect: DOM nodes, timers and callbacks
/// around a platform-neutral [`EffectRunner`].
pub(crate) struct Mount {
    runner: EffectRunner<Background, Canvas2d>,
    canvas: Option<HtmlCanvasElement>,
    overlays: Vec<HtmlElement>,
    frame_id: Option<i32>,
    frame_cb: FrameCallback,
    resize_cb: Option<Closure<dyn FnMut()>>,
    resize_debounce: Debounce,
    listeners: Vec<Listener>,
}

impl Mount {
    pub(crate) fn shared(background: Background) -> SharedMount {
        Rc::new(RefCell::new(Mount {
            runner: EffectRunner::new(background),
            canvas: None,
            overlays: Vec::new(),
            frame_id: None,
            frame_cb: Rc::new(RefCell::new(None)),
            resize_cb: None,
            resize_debounce: Debounce::default(),
            listeners: Vec::new(),
        }))
    }

    pub(crate) fn runner(&self) -> &EffectRunner<Background, Canvas2d> {
        &self.runner
    }

    fn cancel_frame(&mut self) {
        if let (Some(id), Some(win)) = (self.frame_id.take(), window()) {
            if let Err(err) = win.cancel_animation_frame(id) {
                warn!(error = ?err, "cancel_animation_frame failed");
            }
        }
    }

    fn cancel_resize(&mut self) {
        if let (Some(token), Some(win)) = (self.resize_debounce.take(), window()) {
            win.clear_timeout_with_handle(token);
        }
    }

    /// Release every browser resource. Idempotent.
    fn teardown(&mut self) {
        self.cancel_frame();
        self.cancel_resize();
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
        for overlay in self.overlays.drain(..) {
            overlay.remove();
        }
        self.resize_cb = None;
        self.frame_cb.borrow_mut().take();
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn browser_window() -> Result<Window, JsValue> {
    window().ok_or_else(|| EffectError::environment("no window").into())
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

fn style_canvas(canvas: &HtmlCanvasElement, placement: Placement) -> Result<(), JsValue> {
    match placement {
        Placement::Viewport => set_styles(
            canvas,
            &[
                ("display", "block"),
                ("width", "100%"),
                ("height", "100%"),
                ("position", "fixed"),
                ("top", "0"),
                ("left", "0"),
                ("z-index", "-1"),
                ("pointer-events", "none"),
            ],
        ),
        Placement::Container => set_styles(
            canvas,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("border", "none"),
                ("display", "block"),
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("z-index", "-1"),
            ],
        ),
    }
}

/// Drawing area in CSS pixels.
fn measure(win: &Window, canvas: &HtmlCanvasElement, placement: Placement) -> (f64, f64) {
    match placement {
        Placement::Viewport => {
            let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (dim(win.inner_width()), dim(win.inner_height()))
        }
        Placement::Container => (canvas.offset_width() as f64, canvas.offset_height() as f64),
    }
}

/// Size the backing store and return the CSS-to-device scale to apply.
fn size_backing_store(
    win: &Window,
    canvas: &HtmlCanvasElement,
    placement: Placement,
    width: f64,
    height: f64,
) -> f64 {
    match placement {
        Placement::Viewport => {
            let dpr = win.device_pixel_ratio();
            let dpr = if dpr > 0.0 { dpr } else { 1.0 };
            canvas.set_width((width * dpr) as u32);
            canvas.set_height((height * dpr) as u32);
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{width}px"));
            let _ = style.set_property("height", &format!("{height}px"));
            dpr
        }
        Placement::Container => {
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            1.0
        }
    }
}

/// Attach the effect to `container` and start its frame loop.
pub(crate) fn init(mount: &SharedMount, container: &HtmlElement) -> Result<(), JsValue> {
    let phase = mount.borrow().runner.phase();
    if phase != Phase::Uninitialized {
        return Err(EffectError::lifecycle(phase, "init").into());
    }

    let win = browser_window()?;
    let document = win
        .document()
        .ok_or_else(|| EffectError::environment("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| EffectError::environment("2d context unavailable"))?
        .dyn_into()?;

    let (placement, overlay_css) = {
        let m = mount.borrow();
        (m.runner.effect().placement(), m.runner.effect().overlays())
    };
    style_canvas(&canvas, placement)?;
    if placement == Placement::Viewport {
        set_styles(container, &[("position", "relative"), ("overflow", "hidden")])?;
    }
    container.append_child(&canvas)?;

    let mut overlays = Vec::with_capacity(overlay_css.len());
    for background in overlay_css {
        let layer: HtmlElement = document.create_element("div")?.dyn_into()?;
        set_styles(
            &layer,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("width", "100%"),
                ("height", "100%"),
                ("pointer-events", "none"),
                ("z-index", "1"),
                ("background", background),
            ],
        )?;
        container.append_child(&layer)?;
        overlays.push(layer);
    }

    let (width, height) = measure(&win, &canvas, placement);
    let surface = Canvas2d::new(ctx);
    surface.set_scale(size_backing_store(&win, &canvas, placement, width, height));

    {
        let mut m = mount.borrow_mut();
        m.canvas = Some(canvas.clone());
        m.overlays = overlays;
        m.runner.init(surface, width, height)?;
    }

    install_listeners(mount, &win, &canvas, placement)?;
    install_frame_loop(mount);
    request_frame(mount, &win)
}

fn listen(
    mount: &SharedMount,
    target: &EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    mount.borrow_mut().listeners.push(Listener {
        target: target.clone(),
        event,
        callback,
    });
    Ok(())
}

fn install_listeners(
    mount: &SharedMount,
    win: &Window,
    canvas: &HtmlCanvasElement,
    placement: Placement,
) -> Result<(), JsValue> {
    let weak = Rc::downgrade(mount);
    mount.borrow_mut().resize_cb = Some(Closure::wrap(Box::new(move || {
        if let Some(mount) = weak.upgrade() {
            resize_now(&mount);
        }
    }) as Box<dyn FnMut()>));

    let weak = Rc::downgrade(mount);
    let on_resize = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(mount) = weak.upgrade() {
            schedule_resize(&mount);
        }
    }) as Box<dyn FnMut(Event)>);
    listen(mount, win, "resize", on_resize)?;

    if placement != Placement::Container {
        return Ok(());
    }

    let weak = Rc::downgrade(mount);
    let target = canvas.clone();
    let on_move = Closure::wrap(Box::new(move |event: Event| {
        let (Some(mount), Some(event)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
            return;
        };
        let rect = target.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        mount.borrow_mut().runner.pointer_moved(x, y);
    }) as Box<dyn FnMut(Event)>);
    listen(mount, canvas, "mousemove", on_move)?;

    let weak: Weak<RefCell<Mount>> = Rc::downgrade(mount);
    let on_leave = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(mount) = weak.upgrade() {
            mount.borrow_mut().runner.pointer_left();
        }
    }) as Box<dyn FnMut(Event)>);
    listen(mount, canvas, "mouseleave", on_leave)
}

fn schedule_resize(mount: &SharedMount) {
    let Some(win) = window() else { return };
    let mut m = mount.borrow_mut();
    m.cancel_resize();
    let scheduled = match m.resize_cb.as_ref() {
        Some(cb) => win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            m.resize_debounce.delay_ms(),
        ),
        None => return,
    };
    match scheduled {
        Ok(token) => {
            m.resize_debounce.replace(token);
        }
        Err(err) => warn!(error = ?err, "could not schedule resize"),
    }
}

/// Re-measure and resize immediately. No-op unless running.
pub(crate) fn resize_now(mount: &SharedMount) {
    let Some(win) = window() else { return };
    let mut m = mount.borrow_mut();
    m.resize_debounce.take();
    if !m.runner.is_running() {
        return;
    }
    let Some(canvas) = m.canvas.clone() else { return };
    let placement = m.runner.effect().placement();
    let (width, height) = measure(&win, &canvas, placement);
    let scale = size_backing_store(&win, &canvas, placement, width, height);
    if let Some(surface) = m.runner.surface_mut() {
        surface.set_scale(scale);
    }
    m.runner.resize(width, height);
}

fn install_frame_loop(mount: &SharedMount) {
    let weak = Rc::downgrade(mount);
    let slot = mount.borrow().frame_cb.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let Some(mount) = weak.upgrade() else { return };
        let status = {
            let mut m = mount.borrow_mut();
            m.frame_id = None;
            m.runner.frame(now)
        };
        // schedule next only while still active
        if status.keep_going() {
            if let Some(win) = window() {
                if let Err(err) = request_frame(&mount, &win) {
                    warn!(error = ?err, "request_animation_frame failed");
                }
            }
        }
    }) as Box<dyn FnMut(f64)>));
}

fn request_frame(mount: &SharedMount, win: &Window) -> Result<(), JsValue> {
    let mut m = mount.borrow_mut();
    if m.frame_id.is_some() {
        return Ok(());
    }
    let id = {
        let slot = m.frame_cb.borrow();
        let Some(cb) = slot.as_ref() else {
            return Ok(());
        };
        win.request_animation_frame(cb.as_ref().unchecked_ref())?
    };
    m.frame_id = Some(id);
    Ok(())
}

pub(crate) fn stop(mount: &SharedMount) {
    let mut m = mount.borrow_mut();
    m.runner.stop();
    m.cancel_frame();
}

pub(crate) fn resume(mount: &SharedMount) -> Result<(), JsValue> {
    mount.borrow_mut().runner.resume()?;
    request_frame(mount, &browser_window()?)
}

pub(crate) fn destroy(mount: &SharedMount) {
    let mut m = mount.borrow_mut();
    m.runner.destroy();
    m.teardown();
    debug!("mount torn down");
}
