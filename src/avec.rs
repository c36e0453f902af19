//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding captured byte streams
//! from files and data slices, publishing to the [`FromEvents`] trait.
//!
//! In many cases (when only a few message kinds are of interest), this trait
//! can be derived. See the [`FromEvents`](macro@FromEvents) macro for details.

pub mod reader;
pub mod slice;

pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::sans::event::Event;

/// Derive [`FromEvents`] for a struct collecting events by kind.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To collect a single event, add the `event(K)` attribute to an
/// `Option<Event>` struct field, where `K` is a
/// [`MessageKind`](crate::sans::event::MessageKind) variant. Later events of
/// the same kind replace earlier ones. To collect every occurrence, apply the
/// attribute to a `Vec<Event>` instead.
///
/// ```
/// #[derive(Debug, Default, FromEvents)]
/// struct Handshake {
///     #[event(ProtocolVersion)]
///     protocol: Option<Event>,
///     #[event(FirmwareVersion)]
///     firmware: Option<Event>,
///     #[event(I2cReply)]
///     replies: Vec<Event>,
/// }
/// ```
///
/// To store something other than the event itself, supply an accumulator
/// closure. The second argument must be typed as `&Event`.
///
/// ```
/// #[derive(Debug, Default, FromEvents)]
/// struct Console {
///     #[event(StringMessage, |v, e: &Event| v.push(e.payload().unwrap_or_default().to_vec()))]
///     lines: Vec<Vec<u8>>,
/// }
/// ```
///
/// Strings arrive as 7-bit pairs. Keep the raw payload, and convert it later
/// in an accessor.
///
/// ```
/// impl Console {
///     fn lines(&self) -> impl Iterator<Item = String> {
///         self.lines.iter().map(|pairs| {
///             pairs
///                 .chunks(2)
///                 .map(|p| char::from(p[0] | p.get(1).map_or(0, |m| m << 7)))
///                 .collect()
///         })
///     }
/// }
/// ```
#[cfg(feature = "derive")]
pub use fermata_derive::FromEvents;

/// Receive decoded events.
///
/// See the [`FromEvents`](macro@FromEvents) derive macro for an automatic
/// implementation of this trait.
pub trait FromEvents {
    /// Add an event to the receiver.
    fn add_event(&mut self, event: &Event);
}

impl FromEvents for Vec<Event> {
    fn add_event(&mut self, event: &Event) {
        self.push(event.clone());
    }
}
