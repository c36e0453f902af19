//! States decoding fixed-length channel messages.

use zerocopy::FromBytes;

use super::{
    buffer::Buffer,
    event::{Event, FieldKey, MessageKind, Value},
    state::{FrameError, State, Step},
    token,
};

/// Major and minor version, as sent in version and firmware reports.
#[repr(C, packed)]
#[derive(FromBytes)]
pub(super) struct VersionPair {
    pub(super) major: u8,
    pub(super) minor: u8,
}

/// State decoding a digital or analog message.
///
/// Entered with the status byte, which carries the port or pin number. The
/// two data bytes that follow are published as the payload without being
/// combined. The payload bound does not apply to them.
#[derive(Debug)]
pub struct ChannelMessage {
    kind: MessageKind,
    key: FieldKey,
    channel: Option<u8>,
}

impl ChannelMessage {
    /// A digital port report (`0x90`).
    pub fn digital() -> Self {
        Self {
            kind: MessageKind::DigitalMessage,
            key: FieldKey::Port,
            channel: None,
        }
    }

    /// An analog pin report (`0xE0`).
    pub fn analog() -> Self {
        Self {
            kind: MessageKind::AnalogMessage,
            key: FieldKey::Pin,
            channel: None,
        }
    }
}

impl State for ChannelMessage {
    fn enter(&mut self) {
        self.channel = None;
    }

    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step {
        let Some(channel) = self.channel else {
            self.channel = Some(token::status(b).channel());
            return Step::Continue;
        };

        if !token::is_data(b) {
            return Step::Restart(FrameError::Interrupted(b));
        }

        buffer.push_unbounded(b);
        if buffer.len() < 2 {
            return Step::Continue;
        }

        let event = Event::message(self.kind)
            .with(self.key, Value::Byte(channel))
            .with(FieldKey::Payload, Value::Bytes(buffer.take()));

        Step::Complete(event)
    }
}

/// State decoding a protocol version report (`0xF9`).
#[derive(Debug, Default)]
pub struct ProtocolVersion {
    major: Option<u8>,
}

impl State for ProtocolVersion {
    fn enter(&mut self) {
        self.major = None;
    }

    fn process(&mut self, b: u8, _buffer: &mut Buffer) -> Step {
        if !token::is_data(b) {
            return Step::Restart(FrameError::Interrupted(b));
        }

        let Some(major) = self.major else {
            self.major = Some(b);
            return Step::Continue;
        };

        let VersionPair { major, minor } = zerocopy::transmute!([major, b]);

        let event = Event::message(MessageKind::ProtocolVersion)
            .with(FieldKey::Major, Value::Byte(major))
            .with(FieldKey::Minor, Value::Byte(minor));

        Step::Complete(event)
    }
}
