//! Providers, each contributing zero or more fields to an encoded event.
//!
//! An encoder owns an ordered list of providers and calls them in turn with
//! a generator positioned inside the open event object. A provider writes
//! complete fields or nothing at all; it must leave the generator at the
//! same nesting depth it received it.

use std::io;

use crate::{event::LogEvent, generator::JsonGenerator};

pub mod arguments;
pub mod mdc;
pub mod standard;

/// A source of JSON fields for one log event.
pub trait JsonProvider: Send + Sync {
    /// Appends this provider's fields for `event`.
    ///
    /// Errors are writer errors and abort the event; they must be returned
    /// unchanged so the caller can see the original [`io::Error`].
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()>;
}
