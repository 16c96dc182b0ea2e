//! Cross-window wire format and inbound admission.
//!
//! The transports (broadcast channel, storage mirror) live in the web crate;
//! this module owns the JSON envelope and the filter every inbound message
//! passes through before it reaches subscribers: self-origin drop, bounded
//! signature de-duplication, and a staleness cutoff.

use std::collections::VecDeque;

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEDUP_CAP, STALE_MS};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerData {
    pub x: f32,
    pub y: f32,
    pub charge: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PulseData {
    pub x: f32,
    pub y: f32,
    pub strength: f32,
    pub charge: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceData {
    pub x: f32,
    pub y: f32,
    pub energy: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveData {}

/// Message body, tagged so the wire shape is
/// `{"type": "pointer", "data": {...}}`. All coordinates are normalized to
/// `[0, 1]` by the sender's viewport before transmission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Signal {
    Pointer(PointerData),
    Pulse(PulseData),
    Trace(TraceData),
    Leave(LeaveData),
}

/// Full wire envelope: `{id, type, data, timestamp}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: String,
    #[serde(flatten)]
    pub signal: Signal,
    pub timestamp: f64,
}

/// A signal the scene wants published. `flush` marks fire-and-forget signals
/// whose storage mirror should be cleared immediately after writing so late
/// joiners never observe stale state.
#[derive(Clone, Debug)]
pub struct Outbound {
    pub signal: Signal,
    pub flush: bool,
}

impl Outbound {
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            flush: false,
        }
    }

    pub fn flushed(signal: Signal) -> Self {
        Self {
            signal,
            flush: true,
        }
    }
}

/// Why an inbound envelope was dropped. Rejections are logged, never raised:
/// the decorative feature must not interrupt the page.
#[derive(Debug, Error, PartialEq)]
pub enum Reject {
    #[error("self-originated message")]
    SelfOrigin,
    #[error("duplicate (id, timestamp) signature")]
    Duplicate,
    #[error("stale message ({age_ms:.0} ms old)")]
    Stale { age_ms: f64 },
}

/// Admission filter shared by both transport paths.
pub struct InboundFilter {
    own_id: String,
    seen: FnvHashSet<String>,
    order: VecDeque<String>,
}

impl InboundFilter {
    pub fn new(own_id: impl Into<String>) -> Self {
        Self {
            own_id: own_id.into(),
            seen: FnvHashSet::default(),
            order: VecDeque::new(),
        }
    }

    pub fn own_id(&self) -> &str {
        &self.own_id
    }

    /// Admit or reject an envelope. Admission records the signature in the
    /// recently-seen set, bounded to the most recent [`DEDUP_CAP`] entries
    /// with oldest-first eviction.
    pub fn admit(&mut self, envelope: &Envelope, now_ms: f64) -> Result<(), Reject> {
        if envelope.id == self.own_id {
            return Err(Reject::SelfOrigin);
        }
        let age_ms = now_ms - envelope.timestamp;
        if age_ms > STALE_MS {
            return Err(Reject::Stale { age_ms });
        }
        let signature = format!("{}|{}", envelope.id, envelope.timestamp);
        if !self.seen.insert(signature.clone()) {
            return Err(Reject::Duplicate);
        }
        self.order.push_back(signature);
        while self.order.len() > DEDUP_CAP {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        Ok(())
    }
}
