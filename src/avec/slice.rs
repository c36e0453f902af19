//! Slice-based decoder implementation.

use thiserror::Error;

use crate::sans::{Decoder, config::Config, state::StateKind};

use super::FromEvents;

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// The slice ended in the middle of a frame.
    #[error("Slice ended in the middle of a frame ({state:?}, {buffered} bytes buffered).")]
    Incomplete { state: StateKind, buffered: usize },
}

/// Decode every event in a slice of a captured stream, publishing to a
/// receiver.
///
/// This method is also re-exported as `fermata::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromEvents) -> Result<(), Error> {
    decode_with(r, Config::default(), o)
}

/// Decode every event in a slice with a custom configuration.
pub fn decode_with(r: &[u8], config: Config, o: &mut impl FromEvents) -> Result<(), Error> {
    let mut decoder = Decoder::new(config);

    for &b in r {
        decoder.push(b, |e| o.add_event(&e));
    }

    match decoder.state() {
        StateKind::Waiting => Ok(()),
        state => Err(Error::Incomplete {
            state,
            buffered: decoder.buffered().len(),
        }),
    }
}
