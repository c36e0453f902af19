//! A byte-at-a-time decoder for the Firmata serial protocol.
//!
//! Fermata turns the unframed byte feed of a microcontroller running Firmata
//! into discrete, typed events: pin value reports, protocol and firmware
//! identity, and sysex replies such as I2C reads, strings and capability
//! reports. It recognises frame boundaries and hands raw payloads onward;
//! combining 7-bit byte pairs into wider values is left to the consumer.
//!
//! Most users should begin with the [`Dispatcher`](sans::dispatcher::Dispatcher),
//! feeding it bytes from a transport and subscribing to the events it
//! publishes. To decode a capture in one go, see the functions and derive macro
//! in the [`avec`] module. Applications driving the state machine themselves
//! (for example, without listeners or locking) should use the
//! [`Decoder`](sans::Decoder) directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).

pub mod avec;
pub mod sans;

pub use sans::{
    Decoder,
    config::Config,
    dispatcher::Dispatcher,
    event::{Event, EventClass, FieldKey, MessageKind, Value},
};
