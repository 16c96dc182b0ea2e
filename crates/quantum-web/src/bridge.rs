//! Cross-window transports behind one publish/subscribe contract.
//!
//! Outbound messages go over a `BroadcastChannel` when the browser has one,
//! and are unconditionally mirrored into a shared localStorage key so
//! windows without the channel still observe them through `storage` events.
//! Both inbound paths funnel through a single dispatcher: parse, admission
//! filter (self-origin, dedup, staleness), then every subscribed listener
//! synchronously. Every failure here degrades silently; the background is
//! decorative and must never block the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use quantum_core::bridge::{Envelope, InboundFilter, Signal};

use crate::dom;

type Listener = Rc<dyn Fn(&Envelope)>;

struct BridgeInner {
    id: String,
    storage_key: String,
    channel: RefCell<Option<web::BroadcastChannel>>,
    filter: RefCell<InboundFilter>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
    channel_closure: RefCell<Option<Closure<dyn FnMut(web::MessageEvent)>>>,
    storage_closure: RefCell<Option<Closure<dyn FnMut(web::StorageEvent)>>>,
}

pub struct Bridge {
    inner: Rc<BridgeInner>,
}

/// Handle returned by [`Bridge::subscribe`]; removes exactly that listener.
pub struct Subscription {
    inner: Rc<BridgeInner>,
    key: usize,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(k, _)| *k != self.key);
    }
}

impl Bridge {
    pub fn new(storage_key: &str, channel_name: &str) -> Bridge {
        let id = instance_id();
        let inner = Rc::new(BridgeInner {
            id: id.clone(),
            storage_key: storage_key.to_owned(),
            channel: RefCell::new(None),
            filter: RefCell::new(InboundFilter::new(id)),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            channel_closure: RefCell::new(None),
            storage_closure: RefCell::new(None),
        });

        // Broadcast channel path, when the browser provides one.
        if let Ok(channel) = web::BroadcastChannel::new(channel_name) {
            let dispatch_inner = inner.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::MessageEvent| {
                if let Some(raw) = ev.data().as_string() {
                    dispatch(&dispatch_inner, &raw);
                }
            }) as Box<dyn FnMut(_)>);
            channel.set_onmessage(Some(closure.as_ref().unchecked_ref()));
            *inner.channel.borrow_mut() = Some(channel);
            *inner.channel_closure.borrow_mut() = Some(closure);
        }

        // Storage fallback path.
        if let Some(window) = web::window() {
            let dispatch_inner = inner.clone();
            let key = storage_key.to_owned();
            let closure = Closure::wrap(Box::new(move |ev: web::StorageEvent| {
                if ev.key().as_deref() != Some(key.as_str()) {
                    return;
                }
                if let Some(raw) = ev.new_value() {
                    dispatch(&dispatch_inner, &raw);
                }
            }) as Box<dyn FnMut(_)>);
            let _ = window
                .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
            *inner.storage_closure.borrow_mut() = Some(closure);
        }

        Bridge { inner }
    }

    /// Process-unique identifier stamped on every outbound envelope.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Publish a signal to every other window. `flush` clears the persisted
    /// mirror immediately after writing so fire-and-forget signals leave no
    /// stale state behind for late joiners.
    pub fn emit(&self, signal: Signal, flush: bool) {
        let envelope = Envelope {
            id: self.inner.id.clone(),
            signal,
            timestamp: js_sys::Date::now(),
        };
        let raw = match serde_json::to_string(&envelope) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("bridge encode failed: {e}");
                return;
            }
        };
        if let Some(channel) = self.inner.channel.borrow().as_ref() {
            let _ = channel.post_message(&JsValue::from_str(&raw));
        }
        if let Some(storage) = dom::local_storage() {
            let _ = storage.set_item(&self.inner.storage_key, &raw);
            if flush {
                let _ = storage.remove_item(&self.inner.storage_key);
            }
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&Envelope) + 'static) -> Subscription {
        let key = self.inner.next_listener.get();
        self.inner.next_listener.set(key + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((key, Rc::new(listener)));
        Subscription {
            inner: self.inner.clone(),
            key,
        }
    }

    /// Close the channel and unhook the storage listener.
    pub fn destroy(&self) {
        if let Some(channel) = self.inner.channel.borrow_mut().take() {
            channel.set_onmessage(None);
            channel.close();
        }
        self.inner.channel_closure.borrow_mut().take();
        if let Some(closure) = self.inner.storage_closure.borrow_mut().take() {
            if let Some(window) = web::window() {
                let _ = window.remove_event_listener_with_callback(
                    "storage",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
        self.inner.listeners.borrow_mut().clear();
    }
}

/// Single inbound dispatcher for both transports.
fn dispatch(inner: &Rc<BridgeInner>, raw: &str) {
    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        // Malformed payloads are dropped silently.
        Err(_) => return,
    };
    if let Err(reject) = inner
        .filter
        .borrow_mut()
        .admit(&envelope, js_sys::Date::now())
    {
        log::trace!("bridge dropped message from {}: {reject}", envelope.id);
        return;
    }
    let listeners: Vec<Listener> = inner
        .listeners
        .borrow()
        .iter()
        .map(|(_, l)| l.clone())
        .collect();
    for listener in listeners {
        listener(&envelope);
    }
}

fn instance_id() -> String {
    let now = js_sys::Date::now() as u64;
    let entropy = (js_sys::Math::random() * u32::MAX as f64) as u32;
    format!("{now:x}-{entropy:08x}")
}
