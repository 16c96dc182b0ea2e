//! Browser entry point for the particle background: finds the canvas,
//! builds the scene and transports, wires events, and starts the driver.
//!
//! The background is decorative. Every failure path here logs and stands
//! down instead of surfacing an error to the page.

#![cfg(target_arch = "wasm32")]

pub mod bridge;
pub mod constants;
pub mod dom;
pub mod events;
pub mod frame;
pub mod render;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use quantum_core::{Phase, Scene, SceneConfig};

use crate::bridge::Bridge;
use crate::constants::{CANVAS_ID, CHANNEL_NAME, STORAGE_KEY};
use crate::frame::AppState;
use crate::render::Renderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = init() {
        log::warn!("quantum background disabled: {e:#}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let (_, document) = dom::window_document().ok_or_else(|| anyhow::anyhow!("no window"))?;

    // Pages without the canvas simply don't get a background.
    let Some(element) = document.get_element_by_id(CANVAS_ID) else {
        log::debug!("no #{CANVAS_ID} element; background inactive");
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("#{CANVAS_ID} is not a canvas"))?;

    let mut renderer = Renderer::new(&canvas)?;
    let (width, height) = renderer.resize(&canvas);

    let seed = (js_sys::Date::now() as u64)
        ^ (((js_sys::Math::random() * u32::MAX as f64) as u64) << 32);
    let scene = Scene::new(SceneConfig {
        width,
        height,
        seed,
    });
    let bridge = Bridge::new(STORAGE_KEY, CHANNEL_NAME);

    let app = Rc::new(AppState {
        scene: RefCell::new(scene),
        renderer: RefCell::new(renderer),
        bridge,
        canvas,
        phase: Cell::new(Phase::Stopped),
        raf_handle: Cell::new(None),
        last_instant: Cell::new(Instant::now()),
        subscription: RefCell::new(None),
    });

    let subscription = {
        let remote = app.clone();
        app.bridge
            .subscribe(move |envelope| remote.scene.borrow_mut().apply_remote(envelope))
    };
    *app.subscription.borrow_mut() = Some(subscription);

    events::wire(app.clone());
    frame::start(&app);
    log::info!("quantum background running (peer {})", app.bridge.id());
    Ok(())
}
