//! State decoding I2C replies.

use super::{
    buffer::Buffer,
    event::{Event, FieldKey, MessageKind, Value},
    state::{State, Step},
    token::END_SYSEX,
};

/// State collecting the payload of an I2C reply.
///
/// Entered once the router has consumed the sysex start and the
/// [`I2C_REPLY`](super::token::I2C_REPLY) command. The payload (slave address,
/// register and data, each as 7-bit pairs) is published verbatim when the end
/// marker arrives; a frame without payload publishes an empty one.
///
/// ```text
/// 0  START_SYSEX (0xF0)
/// 1  I2C_REPLY (0x77)
/// 2  slave address (LSB)
/// ...
/// n  END_SYSEX (0xF7)
/// ```
#[derive(Debug, Default)]
pub struct I2cReply;

impl State for I2cReply {
    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step {
        if b != END_SYSEX {
            return buffer.push(b).into();
        }

        let event =
            Event::message(MessageKind::I2cReply).with(FieldKey::Payload, Value::Bytes(buffer.take()));

        Step::Complete(event)
    }
}
