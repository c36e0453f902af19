//! State awaiting the first byte of a message.

use super::{
    buffer::Buffer,
    state::{State, StateKind, Step},
    token::{self, ANALOG_MESSAGE, DIGITAL_MESSAGE, REPORT_VERSION, START_SYSEX},
};

/// Idle state, recognising which message kind a byte begins.
///
/// Channel messages carry their port or pin in the status byte, so that byte
/// is handed on to the message state. Anything unrecognised, including stray
/// data bytes after a lost frame, is dropped.
#[derive(Debug, Default)]
pub struct Waiting;

impl State for Waiting {
    fn process(&mut self, b: u8, _buffer: &mut Buffer) -> Step {
        let command = token::status(b).command();

        if command == DIGITAL_MESSAGE >> 4 {
            Step::Refeed(StateKind::DigitalMessage)
        } else if command == ANALOG_MESSAGE >> 4 {
            Step::Refeed(StateKind::AnalogMessage)
        } else {
            match b {
                START_SYSEX => Step::Transit(StateKind::SysexRouter),
                REPORT_VERSION => Step::Transit(StateKind::ProtocolVersion),
                _ => {
                    log::trace!("ignoring byte {b:#04x} outside of a frame");
                    Step::Continue
                }
            }
        }
    }
}
