//! Reader-based decoder implementation.

use std::io::{ErrorKind, Read};

use thiserror::Error;

use crate::sans::{Decoder, config::Config, state::StateKind};

use super::FromEvents;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The reader ended in the middle of a frame.
    #[error("Reader ended in the middle of a frame ({state:?}, {buffered} bytes buffered).")]
    Incomplete { state: StateKind, buffered: usize },
}

/// Decode every event from a reader until it ends, publishing to a receiver.
///
/// The reader is consumed in small chunks, so this also suits a serial port
/// opened in blocking mode; decoding then ends when the port is closed.
///
/// This method is also re-exported as `fermata::avec::decode_reader`.
pub fn decode(r: &mut impl Read, o: &mut impl FromEvents) -> Result<(), Error> {
    decode_with(r, Config::default(), o)
}

/// Decode every event from a reader with a custom configuration.
pub fn decode_with(
    r: &mut impl Read,
    config: Config,
    o: &mut impl FromEvents,
) -> Result<(), Error> {
    let mut decoder = Decoder::new(config);
    let mut chunk = [0; 64];

    loop {
        let n = match r.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        for &b in &chunk[..n] {
            decoder.push(b, |e| o.add_event(&e));
        }
    }

    match decoder.state() {
        StateKind::Waiting => Ok(()),
        state => Err(Error::Incomplete {
            state,
            buffered: decoder.buffered().len(),
        }),
    }
}
