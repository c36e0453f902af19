//! Accumulation buffer lent to the active state.

use super::state::FrameError;

/// An append-only byte sequence with an optional length bound.
///
/// The decoder owns a single buffer and lends it to whichever state is
/// active. It is cleared each time a state is entered.
#[derive(Debug, Default)]
pub struct Buffer {
    bytes: Vec<u8>,
    limit: Option<usize>,
}

impl Buffer {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    /// Append a byte, failing if the buffer is already at its limit.
    pub fn push(&mut self, b: u8) -> Result<(), FrameError> {
        if let Some(limit) = self.limit {
            if self.bytes.len() >= limit {
                return Err(FrameError::Overflow { limit });
            }
        }

        self.bytes.push(b);
        Ok(())
    }

    /// Append a byte regardless of the limit, for fixed-length messages.
    pub fn push_unbounded(&mut self, b: u8) {
        self.bytes.push(b);
    }

    /// Move the contents out, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.bytes)
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Fixed-size header bytes a state reads ahead of its payload.
///
/// Header bytes are kept out of the shared [`Buffer`], which then holds only
/// the payload.
#[derive(Debug)]
pub(super) struct Header<const N: usize> {
    bytes: [u8; N],
    found: u8,
}

impl<const N: usize> Default for Header<N> {
    fn default() -> Self {
        Self {
            bytes: [0; N],
            found: 0,
        }
    }
}

impl<const N: usize> Header<N> {
    pub(super) fn clear(&mut self) {
        self.found = 0;
    }

    /// Take a byte if the header is incomplete. Returns whether it was taken.
    pub(super) fn fill(&mut self, b: u8) -> bool {
        let i = self.found as usize;
        if i >= N {
            return false;
        }

        self.bytes[i] = b;
        self.found += 1;
        true
    }

    /// The completed header, or the error of a frame ending too early.
    pub(super) fn get(&self) -> Result<[u8; N], FrameError> {
        if (self.found as usize) < N {
            return Err(FrameError::Truncated {
                expected: N as u8,
                found: self.found,
            });
        }

        Ok(self.bytes)
    }
}
