//! The contract shared by every state of the decoder.

use core::time::Duration;

use thiserror::Error;

use super::{buffer::Buffer, event::Event};

/// Identifies one state of the decoder.
///
/// Every reachable transition names its target with this enumeration; the
/// decoder holds one long-lived instance per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Waiting,
    ProtocolVersion,
    DigitalMessage,
    AnalogMessage,
    SysexRouter,
    FirmwareVersion,
    StringMessage,
    CapabilityResponse,
    PinStateResponse,
    AnalogMappingResponse,
    I2cReply,
    SysexCustom,
    Discarding,
}

/// A fault that caused a frame to be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The payload grew past the configured bound.
    #[error("Payload exceeded the {limit} byte limit.")]
    Overflow { limit: usize },
    /// No byte arrived for longer than the configured timeout.
    #[error("Frame stalled for {elapsed:?}.")]
    Stalled { elapsed: Duration },
    /// The frame ended before its fixed header was complete.
    #[error("Frame ended after {found} of {expected} header bytes.")]
    Truncated { expected: u8, found: u8 },
    /// A status byte arrived where a data byte was expected.
    #[error("Status byte ({0:#04x}) interrupted the frame.")]
    Interrupted(u8),
}

/// What the decoder should do after a state consumed a byte.
#[derive(Debug)]
pub enum Step {
    /// Stay in the current state.
    Continue,
    /// Transition to another state.
    Transit(StateKind),
    /// Transition to another state, then hand it the same byte.
    Refeed(StateKind),
    /// Transition to the waiting state, then publish an event.
    Complete(Event),
    /// Drop the frame and the byte. An overflowing sysex frame is discarded
    /// up to its end marker; any other frame returns to the waiting state.
    Abandon(FrameError),
    /// Drop the frame, and hand the byte to the waiting state.
    Restart(FrameError),
}

impl From<Result<(), FrameError>> for Step {
    fn from(result: Result<(), FrameError>) -> Self {
        match result {
            Ok(()) => Step::Continue,
            Err(err) => Step::Abandon(err),
        }
    }
}

/// One mode of the decoder, interpreting the bytes of one message kind.
pub trait State {
    /// Reset transient progress. Called each time the state becomes active.
    fn enter(&mut self) {}

    /// Consume a single byte.
    fn process(&mut self, b: u8, buffer: &mut Buffer) -> Step;
}
