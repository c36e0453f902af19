#![cfg(feature = "derive")]

use fermata::{Event, FieldKey, MessageKind, avec::FromEvents};
use tinyvec::ArrayVec;

#[derive(Debug, Default, FromEvents)]
struct Handshake {
    #[event(ProtocolVersion)]
    protocol: Option<Event>,
    #[event(FirmwareVersion)]
    firmware: Option<Event>,
    #[event(I2cReply)]
    replies: Vec<Event>,
    #[event(StringMessage, |v, e: &Event| v.push(text(e.payload().unwrap_or_default())))]
    lines: Vec<String>,
    #[event(AnalogMessage, |a, e: &Event| {
        if let Some(pin) = e.byte(FieldKey::Pin) {
            let _ = a.try_push(pin);
        }
    })]
    analog_pins: ArrayVec<[u8; 4]>,
    unrelated: u32,
}

/// Join 7-bit pairs into text.
fn text(pairs: &[u8]) -> String {
    pairs
        .chunks(2)
        .map(|p| char::from(p[0] | p.get(1).map_or(0, |m| m << 7)))
        .collect()
}

#[test]
fn decode_slice_startup() {
    const PATH: &str = "fixtures/startup.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut handshake = Handshake::default();
    fermata::avec::decode_slice(&data, &mut handshake).unwrap();

    let protocol = handshake.protocol.unwrap();
    assert_eq!(protocol.byte(FieldKey::Major), Some(2));
    assert_eq!(protocol.byte(FieldKey::Minor), Some(5));

    let firmware = handshake.firmware.unwrap();
    assert_eq!(firmware.kind(), MessageKind::FirmwareVersion);
    assert_eq!(text(firmware.payload().unwrap()), "Std");

    assert_eq!(handshake.replies.len(), 1);
    assert_eq!(handshake.lines, vec!["ok".to_string()]);
    assert_eq!(handshake.analog_pins.as_slice(), &[0]);
    assert_eq!(handshake.unrelated, 0);
}

#[test]
fn decode_slice_noisy() {
    const PATH: &str = "fixtures/noisy.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut handshake = Handshake::default();
    fermata::avec::decode_slice(&data, &mut handshake).unwrap();

    assert!(handshake.protocol.is_none());
    assert!(handshake.firmware.is_none());
    assert_eq!(handshake.replies.len(), 1);
    assert_eq!(handshake.replies[0].payload(), Some(&[][..]));
    assert_eq!(handshake.analog_pins.as_slice(), &[2, 5]);
}

#[test]
fn later_events_replace_earlier_ones() {
    let mut handshake = Handshake::default();
    fermata::avec::decode_slice(&[0xF9, 0x02, 0x05, 0xF9, 0x02, 0x06], &mut handshake).unwrap();

    let protocol = handshake.protocol.unwrap();
    assert_eq!(protocol.byte(FieldKey::Minor), Some(6));
}
