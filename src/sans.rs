//! Finite-state machine decoding the Firmata byte stream.
//!
//! # Architecture
//!
//! Each message kind is decoded by one [`State`](state::State). The
//! [`Decoder`] constructs every state once and keeps exactly one of them
//! active; each fed byte is handed to the active state, which answers with a
//! [`Step`](state::Step) telling the decoder whether to stay, transition, or
//! complete the message.
//!
//! States never own the bytes they accumulate. The decoder lends them its
//! [`Buffer`](buffer::Buffer) for the duration of a single call, and clears it
//! whenever a state is entered. A completed message moves the buffer contents
//! into the published [`Event`](event::Event).
//!
//! On completion the decoder always returns to the waiting state *before* the
//! event is handed out, so code reacting to an event sees a decoder ready for
//! the next frame.
//!
//! The [`Dispatcher`](dispatcher::Dispatcher) wraps a decoder with a lock and
//! a listener registry, for use from a transport's read loop.

pub mod buffer;
pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod firmware;
pub mod i2c;
pub mod listener;
pub mod machine;
pub mod pins;
pub mod state;
pub mod sysex;
pub mod token;
pub mod waiting;

/// Entrypoint to the finite-state machine.
pub type Decoder = machine::Machine;
