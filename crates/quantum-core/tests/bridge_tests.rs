// Wire-format and inbound-admission tests for the cross-window bridge.

use quantum_core::bridge::{
    Envelope, InboundFilter, LeaveData, PointerData, PulseData, Reject, Signal,
};
use quantum_core::constants::DEDUP_CAP;

fn pointer_envelope(id: &str, timestamp: f64) -> Envelope {
    Envelope {
        id: id.to_owned(),
        signal: Signal::Pointer(PointerData {
            x: 0.5,
            y: 0.5,
            charge: 0.2,
        }),
        timestamp,
    }
}

#[test]
fn envelope_serializes_to_flat_wire_shape() {
    let envelope = Envelope {
        id: "w1".to_owned(),
        signal: Signal::Pulse(PulseData {
            x: 0.25,
            y: 0.5,
            strength: 0.8,
            charge: 0.4,
        }),
        timestamp: 123.0,
    };
    let value: serde_json::Value =
        serde_json::to_value(&envelope).expect("envelope must serialize");
    assert_eq!(value["id"], "w1");
    assert_eq!(value["type"], "pulse");
    assert_eq!(value["timestamp"], 123.0);
    assert!((value["data"]["strength"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    assert!((value["data"]["x"].as_f64().unwrap() - 0.25).abs() < 1e-6);

    let back: Envelope = serde_json::from_value(value).expect("wire shape must parse back");
    assert_eq!(back, envelope);
}

#[test]
fn leave_parses_from_raw_json() {
    let raw = r#"{"id":"w2","type":"leave","data":{},"timestamp":5.0}"#;
    let envelope: Envelope = serde_json::from_str(raw).expect("leave must parse");
    assert_eq!(envelope.signal, Signal::Leave(LeaveData {}));
}

#[test]
fn unknown_signal_type_is_a_parse_error() {
    let raw = r#"{"id":"x","type":"bogus","data":{},"timestamp":1.0}"#;
    assert!(serde_json::from_str::<Envelope>(raw).is_err());
}

#[test]
fn own_messages_are_rejected() {
    let mut filter = InboundFilter::new("me");
    let err = filter.admit(&pointer_envelope("me", 100.0), 100.0);
    assert_eq!(err, Err(Reject::SelfOrigin));
}

#[test]
fn duplicate_signatures_are_rejected_once_seen() {
    let mut filter = InboundFilter::new("me");
    let envelope = pointer_envelope("peer", 100.0);
    assert!(filter.admit(&envelope, 100.0).is_ok());
    assert_eq!(filter.admit(&envelope, 100.0), Err(Reject::Duplicate));
    // the same peer with a fresh timestamp is a new signature
    assert!(filter.admit(&pointer_envelope("peer", 101.0), 101.0).is_ok());
}

#[test]
fn stale_messages_are_dropped() {
    let mut filter = InboundFilter::new("me");
    let err = filter.admit(&pointer_envelope("peer", 5000.0), 10_000.0);
    match err {
        Err(Reject::Stale { age_ms }) => assert!((age_ms - 5000.0).abs() < 1e-6),
        other => panic!("expected stale rejection, got {other:?}"),
    }
    // exactly at the cutoff is still admitted
    assert!(filter
        .admit(&pointer_envelope("peer", 6000.0), 10_000.0)
        .is_ok());
}

#[test]
fn dedup_memory_is_bounded_with_oldest_first_eviction() {
    let mut filter = InboundFilter::new("me");
    for i in 0..=(DEDUP_CAP as u64) {
        let ts = i as f64;
        assert!(filter.admit(&pointer_envelope("peer", ts), ts).is_ok());
    }
    // the very first signature has been evicted, so it admits again
    assert!(filter.admit(&pointer_envelope("peer", 0.0), 0.0).is_ok());
    // a recent one is still remembered
    assert_eq!(
        filter.admit(&pointer_envelope("peer", DEDUP_CAP as f64), DEDUP_CAP as f64),
        Err(Reject::Duplicate)
    );
}
