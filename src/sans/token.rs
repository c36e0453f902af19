//! Byte values reserved by the Firmata protocol.

use tartan_bitfield::bitfield;

/// Report of a digital port's pin values (ORed with the port number).
pub const DIGITAL_MESSAGE: u8 = 0x90;
/// Report of an analog pin's value (ORed with the pin number).
pub const ANALOG_MESSAGE: u8 = 0xE0;
/// Report of the implemented protocol version.
pub const REPORT_VERSION: u8 = 0xF9;
/// Start of a sysex frame.
pub const START_SYSEX: u8 = 0xF0;
/// End of a sysex frame.
pub const END_SYSEX: u8 = 0xF7;

/// Sysex command: an analog mapping report.
pub const ANALOG_MAPPING_RESPONSE: u8 = 0x6A;
/// Sysex command: a report of supported pin modes.
pub const CAPABILITY_RESPONSE: u8 = 0x6C;
/// Sysex command: a report of a single pin's mode and state.
pub const PIN_STATE_RESPONSE: u8 = 0x6E;
/// Sysex command: a string, sent as 7-bit pairs.
pub const STRING_DATA: u8 = 0x71;
/// Sysex command: a reply to an I2C read request.
pub const I2C_REPLY: u8 = 0x77;
/// Sysex command: the firmware name and version.
pub const REPORT_FIRMWARE: u8 = 0x79;

/// Terminates the list of modes for one pin in a capability response.
pub const CAPABILITY_SEPARATOR: u8 = 0x7F;

bitfield! {
    /// A byte split into the fields of a channel message status byte.
    pub struct Status(u8) {
        [0..4] pub channel: u8,
        [4..8] pub command: u8,
    }
}

/// Interpret a byte as a status byte.
pub fn status(b: u8) -> Status {
    Status(b)
}

/// Whether a byte carries data rather than a command (the high bit is clear).
pub fn is_data(b: u8) -> bool {
    status(b).command() < 0x8
}
