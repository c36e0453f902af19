//! States decoding pin reports.

use super::{
    buffer::{Buffer, Header},
    event::{Event, FieldKey, MessageKind, Value},
    state::{State, Step},
    token::{CAPABILITY_SEPARATOR, END_SYSEX},
};

/// State decoding a capability response (sysex `0x6C`).
///
/// The payload lists, for each pin in turn, pairs of supported mode and
/// resolution followed by [`CAPABILITY_SEPARATOR`]. It is published split
/// into one group per pin; a pin supporting no modes yields an empty group.
#[derive(Debug, Default)]
pub struct CapabilityResponse;

impl State for CapabilityResponse {
    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step {
        if b != END_SYSEX {
            return buffer.push(b).into();
        }

        let payload = buffer.take();

        let mut pins: Vec<Vec<u8>> = payload
            .split(|b| *b == CAPABILITY_SEPARATOR)
            .map(<[u8]>::to_vec)
            .collect();

        // Bytes after the last separator belong to no pin.
        if pins.last().is_some_and(Vec::is_empty) {
            pins.pop();
        }

        let event =
            Event::message(MessageKind::CapabilityResponse).with(FieldKey::Pins, Value::Groups(pins));

        Step::Complete(event)
    }
}

/// State decoding a pin state response (sysex `0x6E`).
///
/// ```text
/// 0  START_SYSEX (0xF0)
/// 1  PIN_STATE_RESPONSE (0x6E)
/// 2  pin number
/// 3  pin mode
/// 4  pin state, bits 0-6
/// ... additional state bytes, 7 bits each
/// n  END_SYSEX (0xF7)
/// ```
#[derive(Debug, Default)]
pub struct PinStateResponse {
    header: Header<2>,
}

impl State for PinStateResponse {
    fn enter(&mut self) {
        self.header.clear();
    }

    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step {
        if b != END_SYSEX {
            if self.header.fill(b) {
                return Step::Continue;
            }
            return buffer.push(b).into();
        }

        let [pin, mode] = match self.header.get() {
            Ok(header) => header,
            Err(err) => return Step::Abandon(err),
        };

        let event = Event::message(MessageKind::PinStateResponse)
            .with(FieldKey::Pin, Value::Byte(pin))
            .with(FieldKey::Mode, Value::Byte(mode))
            .with(FieldKey::Payload, Value::Bytes(buffer.take()));

        Step::Complete(event)
    }
}
