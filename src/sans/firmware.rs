//! State decoding firmware reports.

use super::{
    buffer::{Buffer, Header},
    channel::VersionPair,
    event::{Event, FieldKey, MessageKind, Value},
    state::{State, Step},
    token::END_SYSEX,
};

/// State decoding a firmware report (sysex `0x79`).
///
/// ```text
/// 0  START_SYSEX (0xF0)
/// 1  REPORT_FIRMWARE (0x79)
/// 2  major version
/// 3  minor version
/// 4  first character of the name (LSB)
/// 5  first character of the name (MSB)
/// ...
/// n  END_SYSEX (0xF7)
/// ```
///
/// The name is published as its raw 7-bit pairs.
#[derive(Debug, Default)]
pub struct FirmwareVersion {
    header: Header<2>,
}

impl State for FirmwareVersion {
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

        let header = match self.header.get() {
            Ok(header) => header,
            Err(err) => return Step::Abandon(err),
        };

        let VersionPair { major, minor } = zerocopy::transmute!(header);

        let event = Event::message(MessageKind::FirmwareVersion)
            .with(FieldKey::Major, Value::Byte(major))
            .with(FieldKey::Minor, Value::Byte(minor))
            .with(FieldKey::Payload, Value::Bytes(buffer.take()));

        Step::Complete(event)
    }
}
