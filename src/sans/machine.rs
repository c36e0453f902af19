//! The decoder driving the states.

use std::time::{Duration, Instant};

use super::{
    buffer::Buffer,
    channel::{ChannelMessage, ProtocolVersion},
    config::Config,
    event::{Event, MessageKind},
    firmware::FirmwareVersion,
    i2c::I2cReply,
    pins::{CapabilityResponse, PinStateResponse},
    state::{FrameError, State, StateKind, Step},
    sysex::{Delimited, Discarding, SysexCustom, SysexRouter},
    waiting::Waiting,
};

/// One long-lived instance of every state.
#[derive(Debug)]
struct States {
    waiting: Waiting,
    protocol_version: ProtocolVersion,
    digital: ChannelMessage,
    analog: ChannelMessage,
    router: SysexRouter,
    firmware: FirmwareVersion,
    string: Delimited,
    capability: CapabilityResponse,
    pin_state: PinStateResponse,
    analog_mapping: Delimited,
    i2c: I2cReply,
    custom: SysexCustom,
    discarding: Discarding,
}

impl States {
    fn new() -> Self {
        Self {
            waiting: Waiting,
            protocol_version: ProtocolVersion::default(),
            digital: ChannelMessage::digital(),
            analog: ChannelMessage::analog(),
            router: SysexRouter,
            firmware: FirmwareVersion::default(),
            string: Delimited::new(MessageKind::StringMessage),
            capability: CapabilityResponse,
            pin_state: PinStateResponse::default(),
            analog_mapping: Delimited::new(MessageKind::AnalogMappingResponse),
            i2c: I2cReply,
            custom: SysexCustom::default(),
            discarding: Discarding,
        }
    }

    fn get(&mut self, kind: StateKind) -> &mut dyn State {
        match kind {
            StateKind::Waiting => &mut self.waiting,
            StateKind::ProtocolVersion => &mut self.protocol_version,
            StateKind::DigitalMessage => &mut self.digital,
            StateKind::AnalogMessage => &mut self.analog,
            StateKind::SysexRouter => &mut self.router,
            StateKind::FirmwareVersion => &mut self.firmware,
            StateKind::StringMessage => &mut self.string,
            StateKind::CapabilityResponse => &mut self.capability,
            StateKind::PinStateResponse => &mut self.pin_state,
            StateKind::AnalogMappingResponse => &mut self.analog_mapping,
            StateKind::I2cReply => &mut self.i2c,
            StateKind::SysexCustom => &mut self.custom,
            StateKind::Discarding => &mut self.discarding,
        }
    }
}

/// Finite-state machine turning bytes into events.
///
/// Exactly one state is active at a time, starting with
/// [`StateKind::Waiting`]. Completed messages are handed to the `emit` closure
/// of the call that completed them, after the machine has returned to
/// waiting.
#[derive(Debug)]
pub struct Machine {
    active: StateKind,
    buffer: Buffer,
    states: States,
    config: Config,
    last_byte: Option<Instant>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Machine {
    pub fn new(config: Config) -> Self {
        Self {
            active: StateKind::Waiting,
            buffer: Buffer::new(config.max_payload),
            states: States::new(),
            config,
            last_byte: None,
        }
    }

    /// The currently active state.
    pub fn state(&self) -> StateKind {
        self.active
    }

    /// Bytes accumulated by the active state so far.
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Safeguards this machine was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume a single byte received now.
    pub fn push(&mut self, b: u8, emit: impl FnMut(Event)) {
        self.advance(b, Instant::now(), emit);
    }

    /// Consume a single byte received at `now`.
    ///
    /// Never fails: bytes the protocol does not expect are dropped, and frames
    /// that cannot complete are reported through `emit` as
    /// [`MessageKind::MalformedFrame`] events.
    pub fn advance(&mut self, b: u8, now: Instant, mut emit: impl FnMut(Event)) {
        if let Some(elapsed) = self.stalled(now) {
            if self.active == StateKind::Discarding {
                log::debug!("stopped discarding after {elapsed:?} idle");
                self.transit(StateKind::Waiting);
            } else {
                emit(self.abandon(FrameError::Stalled { elapsed }, StateKind::Waiting));
            }
        }
        self.last_byte = Some(now);

        loop {
            let step = self.states.get(self.active).process(b, &mut self.buffer);

            match step {
                Step::Continue => {}
                Step::Transit(kind) => self.transit(kind),
                Step::Refeed(kind) => {
                    self.transit(kind);
                    continue;
                }
                Step::Complete(event) => {
                    self.transit(StateKind::Waiting);
                    emit(event);
                }
                Step::Abandon(err) => {
                    let next = match err {
                        FrameError::Overflow { .. } => StateKind::Discarding,
                        _ => StateKind::Waiting,
                    };
                    emit(self.abandon(err, next));
                }
                Step::Restart(err) => {
                    emit(self.abandon(err, StateKind::Waiting));
                    continue;
                }
            }

            break;
        }
    }

    /// Drop any frame in progress and return to waiting.
    pub fn reset(&mut self) {
        if self.active != StateKind::Waiting {
            log::debug!(
                "resetting from {:?} with {} bytes buffered",
                self.active,
                self.buffer.len()
            );
        }

        self.transit(StateKind::Waiting);
        self.last_byte = None;
    }

    fn transit(&mut self, kind: StateKind) {
        log::trace!("transition {:?} -> {kind:?}", self.active);

        self.buffer.clear();
        self.states.get(kind).enter();
        self.active = kind;
    }

    fn abandon(&mut self, err: FrameError, next: StateKind) -> Event {
        let abandoned = self.active;
        let partial = self.buffer.take();

        log::warn!("abandoning {abandoned:?} frame after {} bytes: {err}", partial.len());

        self.transit(next);
        Event::malformed(abandoned, err, partial)
    }

    /// Time since the previous byte, if it exceeds the timeout mid-frame.
    fn stalled(&self, now: Instant) -> Option<Duration> {
        let timeout = self.config.idle_timeout?;
        let last = self.last_byte?;

        if self.active == StateKind::Waiting {
            return None;
        }

        let elapsed = now.saturating_duration_since(last);
        (elapsed > timeout).then_some(elapsed)
    }
}
