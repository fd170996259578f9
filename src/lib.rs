//! Composable JSON encoding for structured log events.
//!
//! A [`JsonEncoder`] is an ordered list of [`JsonProvider`]s, each
//! contributing fields to one compact JSON document per event. The
//! [`logstash`] module ships the classic layout; custom layouts are
//! assembled through [`JsonEncoder::builder`].
//!
//! ```
//! use json_composer::{kv, JsonEncoder, Level, LogEvent};
//! use json_composer::provider::arguments::ArgumentsProvider;
//!
//! let encoder = JsonEncoder::builder()
//!     .with_level("level")
//!     .with_message("message")
//!     .with_arguments(ArgumentsProvider::new())
//!     .build();
//!
//! let event = LogEvent::new(Level::Info, "app::orders", "order accepted")
//!     .with_argument(kv("order_id", 4127));
//!
//! let line = encoder.encode_to_vec(&event).unwrap();
//! assert_eq!(
//!     String::from_utf8(line).unwrap(),
//!     "{\"level\":\"INFO\",\"message\":\"order accepted\",\"order_id\":4127}\n",
//! );
//! ```

mod argument;
mod encoder;
mod error;
mod event;
mod fields;
mod generator;
pub mod logstash;
pub mod provider;
#[cfg(test)]
mod tests;

pub use argument::{entries, kv, raw_json, Argument, Entries, KeyValue, RawJson, StructuredValue};
pub use encoder::{JsonEncoder, JsonEncoderBuilder};
pub use error::{BoxError, ConfigError, ErrorSink};
pub use event::{Level, LogEvent};
pub use fields::FieldNames;
pub use generator::JsonGenerator;
pub use provider::JsonProvider;
