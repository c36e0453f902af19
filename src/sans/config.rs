//! Decoder settings.

use core::time::Duration;

/// Payload bound applied by [`Config::default`].
pub const DEFAULT_MAX_PAYLOAD: usize = 4096;

/// Safeguards against frames that never complete.
///
/// Neither setting changes how well-formed frames decode. When a frame is cut
/// short by either, the decoder publishes a
/// [`MalformedFrame`](super::event::MessageKind::MalformedFrame) event and
/// returns to waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest payload a single frame may accumulate.
    pub max_payload: Option<usize>,
    /// Longest gap between two bytes of the same frame.
    pub idle_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_payload: Some(DEFAULT_MAX_PAYLOAD),
            idle_timeout: None,
        }
    }
}

impl Config {
    /// A configuration with no safeguards: unterminated frames grow forever.
    pub fn unbounded() -> Self {
        Self {
            max_payload: None,
            idle_timeout: None,
        }
    }

    pub fn with_max_payload(self, max_payload: Option<usize>) -> Self {
        Self {
            max_payload,
            ..self
        }
    }

    pub fn with_idle_timeout(self, idle_timeout: Option<Duration>) -> Self {
        Self {
            idle_timeout,
            ..self
        }
    }
}
