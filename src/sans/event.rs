//! Decoded messages handed to listeners.

use super::state::{FrameError, StateKind};

/// The kind of message an [`Event`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Protocol version report (`0xF9`).
    ProtocolVersion,
    /// Digital port report (`0x90`).
    DigitalMessage,
    /// Analog pin report (`0xE0`).
    AnalogMessage,
    /// Firmware name and version (sysex `0x79`).
    FirmwareVersion,
    /// String data (sysex `0x71`).
    StringMessage,
    /// Supported modes of every pin (sysex `0x6C`).
    CapabilityResponse,
    /// Mode and state of one pin (sysex `0x6E`).
    PinStateResponse,
    /// Analog channel of every pin (sysex `0x6A`).
    AnalogMappingResponse,
    /// Reply to an I2C read (sysex `0x77`).
    I2cReply,
    /// Any sysex command without a dedicated state.
    SysexCustom,
    /// A frame abandoned before completion.
    MalformedFrame,
}

/// The category of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// A message sent by the device.
    ProtocolMessage,
    /// A fault detected in the byte stream.
    ProtocolError,
}

/// Key of a field in an event body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Raw bytes carried by the message.
    Payload,
    /// Digital port number.
    Port,
    /// Pin number.
    Pin,
    /// Pin mode.
    Mode,
    /// Major version number.
    Major,
    /// Minor version number.
    Minor,
    /// Sysex command identifier.
    Command,
    /// Per-pin byte groups.
    Pins,
    /// Why a frame was abandoned.
    Reason,
    /// State that was active when a frame was abandoned.
    Abandoned,
}

/// Value of a field in an event body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single byte, such as a pin number or version.
    Byte(u8),
    /// Raw payload bytes.
    Bytes(Vec<u8>),
    /// Payload split into groups, one per pin.
    Groups(Vec<Vec<u8>>),
    /// A decoder state.
    State(StateKind),
    /// The fault behind an abandoned frame.
    Error(FrameError),
}

/// An immutable decoded message.
///
/// The body is a small ordered mapping, kept in the order fields were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: MessageKind,
    class: EventClass,
    body: Vec<(FieldKey, Value)>,
}

impl Event {
    /// Start building an event for a message sent by the device.
    pub(crate) fn message(kind: MessageKind) -> Self {
        Self {
            kind,
            class: EventClass::ProtocolMessage,
            body: Vec::new(),
        }
    }

    /// Build an event reporting an abandoned frame.
    pub(crate) fn malformed(abandoned: StateKind, reason: FrameError, partial: Vec<u8>) -> Self {
        Self {
            kind: MessageKind::MalformedFrame,
            class: EventClass::ProtocolError,
            body: Vec::new(),
        }
        .with(FieldKey::Reason, Value::Error(reason))
        .with(FieldKey::Abandoned, Value::State(abandoned))
        .with(FieldKey::Payload, Value::Bytes(partial))
    }

    /// Add a field to the body.
    pub(crate) fn with(mut self, key: FieldKey, value: Value) -> Self {
        self.body.push((key, value));
        self
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn class(&self) -> EventClass {
        self.class
    }

    /// All fields, in the order they were decoded.
    pub fn body(&self) -> &[(FieldKey, Value)] {
        &self.body
    }

    /// Look up a field by key.
    pub fn get(&self, key: FieldKey) -> Option<&Value> {
        self.body.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// The raw payload, if the event carries one.
    pub fn payload(&self) -> Option<&[u8]> {
        match self.get(FieldKey::Payload)? {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// A single-byte field, such as a pin or port number.
    pub fn byte(&self, key: FieldKey) -> Option<u8> {
        match self.get(key)? {
            Value::Byte(b) => Some(*b),
            _ => None,
        }
    }

    /// Per-pin groups of a capability response.
    pub fn groups(&self) -> Option<&[Vec<u8>]> {
        match self.get(FieldKey::Pins)? {
            Value::Groups(groups) => Some(groups),
            _ => None,
        }
    }

    /// The fault behind a [`MessageKind::MalformedFrame`] event.
    pub fn error(&self) -> Option<&FrameError> {
        match self.get(FieldKey::Reason)? {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }
}
