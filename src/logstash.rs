//! Encoder preset producing the classic logstash event layout.
//!
//! ```
//! use json_composer::{logstash, Level, LogEvent};
//!
//! let encoder = logstash::encoder();
//! let event = LogEvent::new(Level::Info, "app", "hello");
//! let line = encoder.encode_to_vec(&event).unwrap();
//! assert!(line.ends_with(b"\n"));
//! ```

use crate::{
    encoder::JsonEncoder,
    fields::FieldNames,
    provider::{arguments::ArgumentsProvider, mdc::MdcProvider},
};

/// Encoder with the default logstash layout; see [`FieldNames`] for the
/// field set.
pub fn encoder() -> JsonEncoder {
    encoder_with_names(FieldNames::default())
}

/// Encoder with the logstash layout under custom field names.
///
/// Structured arguments are included, non-structured arguments are not;
/// callers that need different argument handling assemble their own
/// [`JsonEncoder`] instead.
pub fn encoder_with_names(names: FieldNames) -> JsonEncoder {
    let mut builder = JsonEncoder::builder()
        .with_timestamp(names.timestamp)
        .with_version(names.version)
        .with_message(names.message)
        .with_logger_name(names.logger_name)
        .with_thread_name(names.thread_name)
        .with_level(names.level)
        .with_level_value(names.level_value);

    if let Some(field_name) = names.uuid {
        builder = builder.with_uuid(field_name);
    }

    let mut mdc = MdcProvider::new();
    if let Some(field_name) = names.mdc {
        mdc = mdc.with_field_name(field_name);
    }

    let mut arguments = ArgumentsProvider::new();
    if let Some(field_name) = names.arguments {
        arguments = arguments.with_field_name(field_name);
    }

    builder.with_mdc(mdc).with_arguments(arguments).build()
}
