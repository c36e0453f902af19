//! States decoding sysex frames.
//!
//! A sysex frame begins with [`START_SYSEX`](super::token::START_SYSEX),
//! carries a command identifier and an arbitrary number of payload bytes, and
//! ends with [`END_SYSEX`]. Every byte other than the end marker is payload.

use either::Either::{self, Left, Right};

use super::{
    buffer::Buffer,
    event::{Event, FieldKey, MessageKind, Value},
    state::{State, StateKind, Step},
    token::{
        ANALOG_MAPPING_RESPONSE, CAPABILITY_RESPONSE, END_SYSEX, I2C_REPLY, PIN_STATE_RESPONSE,
        REPORT_FIRMWARE, STRING_DATA,
    },
};

/// State reading the command identifier of a sysex frame.
#[derive(Debug, Default)]
pub struct SysexRouter;

/// Select the state for a sysex command.
///
/// Returns the dedicated state for a known command, or the command itself if
/// it should be decoded as a custom sysex message.
pub fn route(command: u8) -> Either<StateKind, u8> {
    match command {
        REPORT_FIRMWARE => Left(StateKind::FirmwareVersion),
        STRING_DATA => Left(StateKind::StringMessage),
        CAPABILITY_RESPONSE => Left(StateKind::CapabilityResponse),
        PIN_STATE_RESPONSE => Left(StateKind::PinStateResponse),
        ANALOG_MAPPING_RESPONSE => Left(StateKind::AnalogMappingResponse),
        I2C_REPLY => Left(StateKind::I2cReply),
        _ => Right(command),
    }
}

impl State for SysexRouter {
    fn process(&mut self, b: u8, _buffer: &mut Buffer) -> Step {
        if b == END_SYSEX {
            log::trace!("skipping empty sysex frame");
            return Step::Transit(StateKind::Waiting);
        }

        match route(b) {
            Left(kind) => Step::Transit(kind),
            Right(command) => {
                log::trace!("decoding sysex command {command:#04x} as custom");
                Step::Refeed(StateKind::SysexCustom)
            }
        }
    }
}

/// State collecting a sysex payload verbatim until the end marker.
///
/// Used for commands whose payload has no structure the decoder needs to
/// recognise, such as string data and analog mapping responses.
#[derive(Debug)]
pub struct Delimited {
    kind: MessageKind,
}

impl Delimited {
    pub fn new(kind: MessageKind) -> Self {
        Self { kind }
    }
}

impl State for Delimited {
    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step {
        if b != END_SYSEX {
            return buffer.push(b).into();
        }

        let event = Event::message(self.kind).with(FieldKey::Payload, Value::Bytes(buffer.take()));

        Step::Complete(event)
    }
}

/// State decoding a sysex command without a dedicated state.
///
/// Entered with the command byte, which is published alongside the payload.
#[derive(Debug, Default)]
pub struct SysexCustom {
    command: Option<u8>,
}

impl State for SysexCustom {
    fn enter(&mut self) {
        self.command = None;
    }

    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step {
        let Some(command) = self.command else {
            self.command = Some(b);
            return Step::Continue;
        };

        if b != END_SYSEX {
            return buffer.push(b).into();
        }

        let event = Event::message(MessageKind::SysexCustom)
            .with(FieldKey::Command, Value::Byte(command))
            .with(FieldKey::Payload, Value::Bytes(buffer.take()));

        Step::Complete(event)
    }
}

/// State dropping the remainder of an abandoned sysex frame.
///
/// Entered after a payload overflow. Bytes are ignored up to and including
/// the end marker, so nothing inside the oversized frame is mistaken for the
/// start of a message.
#[derive(Debug, Default)]
pub struct Discarding;

impl State for Discarding {
    fn process(&mut self, b: u8, _buffer: &mut Buffer) -> Step {
        if b == END_SYSEX {
            return Step::Transit(StateKind::Waiting);
        }

        Step::Continue
    }
}
