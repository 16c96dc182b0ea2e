//! DOM event wiring. Every handler is a leaked `Closure` holding an `Rc`
//! clone of the shared state; the background lives for the whole page, so
//! nothing here is ever unhooked except through the bridge on pagehide.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use quantum_core::bridge::Outbound;
use quantum_core::Phase;

use crate::dom;
use crate::frame::{self, AppState};

fn emit(app: &AppState, out: Outbound) {
    app.bridge.emit(out.signal, out.flush);
}

fn emit_all(app: &AppState, outs: Vec<Outbound>) {
    for out in outs {
        emit(app, out);
    }
}

/// Attach all input, lifecycle, and environment listeners.
pub fn wire(app: Rc<AppState>) {
    let Some((window, document)) = dom::window_document() else {
        return;
    };

    // Pointer motion drives the local attractor and the rate-limited
    // position broadcast.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if !app.phase.get().is_running() {
                return;
            }
            let out = app
                .scene
                .borrow_mut()
                .pointer_move(ev.client_x() as f32, ev.client_y() as f32);
            if let Some(out) = out {
                emit(&app, out);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Press: charge boost plus an immediate burst.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if !app.phase.get().is_running() {
                return;
            }
            let touch = ev.pointer_type() == "touch";
            let outs = app.scene.borrow_mut().press(
                ev.client_x() as f32,
                ev.client_y() as f32,
                touch,
            );
            emit_all(&app, outs);
        }) as Box<dyn FnMut(_)>);
        let _ = window
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Release flushes a zero-charge position so peers drop the glow at once.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if !app.phase.get().is_running() {
                return;
            }
            if let Some(out) = app.scene.borrow_mut().release() {
                emit(&app, out);
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Cursor leaving the window releases the pointer just like a pointerup,
    // so the glow and attraction don't park at the viewport edge.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if !app.phase.get().is_running() {
                return;
            }
            if let Some(out) = app.scene.borrow_mut().release() {
                emit(&app, out);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Click covers keyboard activation too: detail 0 means no real pointer
    // coordinates, so the burst lands at the viewport center.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            if !app.phase.get().is_running() {
                return;
            }
            let keyboard = ev.detail() == 0;
            let outs = app.scene.borrow_mut().tap_burst(
                ev.client_x() as f32,
                ev.client_y() as f32,
                keyboard,
            );
            emit_all(&app, outs);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::FocusEvent| {
            app.scene.borrow_mut().focus();
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::FocusEvent| {
            if let Some(out) = app.scene.borrow_mut().blur() {
                emit(&app, out);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Hidden tab: stop scheduling frames entirely, restart fresh when the
    // page becomes visible again.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let hidden = web::window()
                .and_then(|w| w.document())
                .map(|d| d.hidden())
                .unwrap_or(false);
            if hidden {
                app.phase.set(app.phase.get().on_hidden());
                frame::cancel_loop(&app);
            } else {
                frame::start(&app);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Resize rescales state in place rather than restarting.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            if app.phase.get() == Phase::Reduced {
                return;
            }
            let (w, h) = app.renderer.borrow_mut().resize(&app.canvas);
            app.scene.borrow_mut().resize(w, h);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Reduced-motion preference flips are a full driver restart either way.
    if let Some(query) = dom::reduced_motion_query() {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MediaQueryListEvent| {
            frame::start(&app);
        }) as Box<dyn FnMut(_)>);
        let _ = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Site theme switches re-derive the accent palette.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            app.renderer.borrow_mut().set_palette(dom::derive_palette());
        }) as Box<dyn FnMut(_)>);
        let _ = window
            .add_event_listener_with_callback("themechange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Best-effort goodbye so peers retire this window's proxy promptly.
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let out = app.scene.borrow().leave_signal();
            emit(&app, out);
            app.bridge.destroy();
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
