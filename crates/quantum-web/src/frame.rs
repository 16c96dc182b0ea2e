//! The animation driver: shared app state, the requestAnimationFrame loop,
//! and the start/stop/reduced transitions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use quantum_core::{Phase, Scene};

use crate::bridge::{Bridge, Subscription};
use crate::dom;
use crate::render::Renderer;

/// Everything the event handlers and the frame loop share.
pub struct AppState {
    pub scene: RefCell<Scene>,
    pub renderer: RefCell<Renderer>,
    pub bridge: Bridge,
    pub canvas: web::HtmlCanvasElement,
    pub phase: Cell<Phase>,
    pub raf_handle: Cell<Option<i32>>,
    pub last_instant: Cell<Instant>,
    pub subscription: RefCell<Option<Subscription>>,
}

/// (Re)start the driver. Under the reduced-motion preference this applies
/// the static marker and never begins a loop; otherwise it resizes the
/// surface, resets transients, and starts a fresh frame loop. Re-running
/// start after the page becomes visible again is a deliberate full reset.
pub fn start(app: &Rc<AppState>) {
    cancel_loop(app);

    let reduced = dom::reduced_motion_active();
    app.phase.set(Phase::on_start(reduced));
    dom::set_reduced_marker(&app.canvas, reduced);
    if reduced {
        return;
    }

    let (w, h) = app.renderer.borrow_mut().resize(&app.canvas);
    {
        let mut scene = app.scene.borrow_mut();
        scene.resize(w, h);
        scene.reset_transients();
    }
    app.last_instant.set(Instant::now());
    run_loop(app.clone());
}

/// Cancel any pending frame callback. Scene state is held, not reset.
pub fn cancel_loop(app: &Rc<AppState>) {
    if let Some(handle) = app.raf_handle.take() {
        if let Some(window) = web::window() {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}

fn run_loop(app: Rc<AppState>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let app_tick = app.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        // A stale loop from before a restart just stops rescheduling.
        if !app_tick.phase.get().is_running() {
            return;
        }
        frame(&app_tick);
        if let Some(window) = web::window() {
            if let Ok(handle) = window.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                app_tick.raf_handle.set(Some(handle));
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(window) = web::window() {
        if let Ok(handle) = window
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            app.raf_handle.set(Some(handle));
        }
    }
}

fn frame(app: &Rc<AppState>) {
    let now = Instant::now();
    let delta = now - app.last_instant.get();
    app.last_instant.set(now);
    let delta_ms = delta.as_secs_f64() * 1000.0;

    let scene = &mut *app.scene.borrow_mut();
    if scene.step(delta_ms) {
        log::debug!(
            "detail level {:.2} (avg frame {:.1} ms)",
            scene.detail.level(),
            scene.detail.avg_delta_ms()
        );
    }
    if let Err(e) = app.renderer.borrow().render(scene) {
        log::warn!("render error: {e:?}");
    }
}
