use std::io;

use serde_json::Value;

use crate::{
    event::LogEvent,
    generator::JsonGenerator,
    provider::{
        arguments::ArgumentsProvider,
        mdc::MdcProvider,
        standard::{
            LevelProvider, LevelValueProvider, LoggerNameProvider, MessageProvider,
            StaticFieldProvider, ThreadNameProvider, TimestampProvider, UuidProvider,
            VersionProvider,
        },
        JsonProvider,
    },
};

/// Encodes log events as single-line JSON documents.
///
/// An encoder is an ordered list of [`JsonProvider`]s. For each event it
/// opens the top-level object, runs every provider in turn, closes the
/// object and appends a newline. Providers see a generator positioned
/// inside the open object and never the braces themselves.
///
/// ```
/// use json_composer::{JsonEncoder, Level, LogEvent};
///
/// let encoder = JsonEncoder::builder()
///     .with_level("level")
///     .with_static_field("service", "checkout")
///     .build();
///
/// let event = LogEvent::new(Level::Error, "app", "boom");
/// let line = encoder.encode_to_vec(&event).unwrap();
/// assert_eq!(
///     String::from_utf8(line).unwrap(),
///     "{\"level\":\"ERROR\",\"service\":\"checkout\"}\n",
/// );
/// ```
pub struct JsonEncoder {
    providers: Vec<Box<dyn JsonProvider>>,
}

impl JsonEncoder {
    pub fn builder() -> JsonEncoderBuilder {
        JsonEncoderBuilder::default()
    }

    /// Writes `event` as one newline-terminated JSON document.
    ///
    /// The first provider error aborts the event; whatever was written
    /// before the failure stays in the writer.
    pub fn encode<W>(&self, event: &LogEvent, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        {
            let mut generator = JsonGenerator::new(writer);
            generator.begin_object()?;
            for provider in &self.providers {
                provider.write_to(&mut generator, event)?;
            }
            generator.end_object()?;
        }
        writer.write_all(b"\n")
    }

    /// [`encode`](Self::encode) into a fresh buffer.
    pub fn encode_to_vec(&self, event: &LogEvent) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(256);
        self.encode(event, &mut buffer)?;
        Ok(buffer)
    }
}

/// Builds a [`JsonEncoder`]. Fields appear in the output in the order the
/// `with_*` calls are made.
#[derive(Default)]
pub struct JsonEncoderBuilder {
    providers: Vec<Box<dyn JsonProvider>>,
}

impl JsonEncoderBuilder {
    /// Appends any provider.
    pub fn with_provider(mut self, provider: impl JsonProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn with_timestamp(self, field_name: impl Into<String>) -> Self {
        self.with_provider(TimestampProvider::new(field_name))
    }

    pub fn with_version(self, field_name: impl Into<String>) -> Self {
        self.with_provider(VersionProvider::new(field_name))
    }

    pub fn with_message(self, field_name: impl Into<String>) -> Self {
        self.with_provider(MessageProvider::new(field_name))
    }

    pub fn with_logger_name(self, field_name: impl Into<String>) -> Self {
        self.with_provider(LoggerNameProvider::new(field_name))
    }

    pub fn with_thread_name(self, field_name: impl Into<String>) -> Self {
        self.with_provider(ThreadNameProvider::new(field_name))
    }

    pub fn with_level(self, field_name: impl Into<String>) -> Self {
        self.with_provider(LevelProvider::new(field_name))
    }

    pub fn with_level_value(self, field_name: impl Into<String>) -> Self {
        self.with_provider(LevelValueProvider::new(field_name))
    }

    pub fn with_uuid(self, field_name: impl Into<String>) -> Self {
        self.with_provider(UuidProvider::new(field_name))
    }

    /// Adds a field with the same fixed value on every event.
    pub fn with_static_field(self, field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_provider(StaticFieldProvider::new(field_name, value))
    }

    pub fn with_mdc(self, provider: MdcProvider) -> Self {
        self.with_provider(provider)
    }

    pub fn with_arguments(self, provider: ArgumentsProvider) -> Self {
        self.with_provider(provider)
    }

    pub fn build(self) -> JsonEncoder {
        JsonEncoder {
            providers: self.providers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kv, tests::FailingWriter, Level};

    #[test]
    fn fields_appear_in_builder_call_order() {
        let encoder = JsonEncoder::builder()
            .with_message("message")
            .with_level("level")
            .with_logger_name("logger")
            .build();
        let event = LogEvent::new(Level::Debug, "app::core", "ready");

        let line = encoder.encode_to_vec(&event).unwrap();
        assert_eq!(
            String::from_utf8(line).unwrap(),
            "{\"message\":\"ready\",\"level\":\"DEBUG\",\"logger\":\"app::core\"}\n",
        );
    }

    #[test]
    fn event_without_providers_is_an_empty_document() {
        let encoder = JsonEncoder::builder().build();
        let event = LogEvent::new(Level::Info, "app", "hello");

        let line = encoder.encode_to_vec(&event).unwrap();
        assert_eq!(String::from_utf8(line).unwrap(), "{}\n");
    }

    #[test]
    fn writer_failure_aborts_the_event() {
        let encoder = JsonEncoder::builder().with_message("message").build();
        let event = LogEvent::new(Level::Info, "app", "hello");

        let mut writer = FailingWriter::after_calls(0);
        let error = encoder.encode(&event, &mut writer).unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn arguments_flow_through_the_encoder() {
        let encoder = JsonEncoder::builder()
            .with_message("message")
            .with_arguments(ArgumentsProvider::new())
            .build();
        let event =
            LogEvent::new(Level::Info, "app", "order accepted").with_argument(kv("order_id", 4127));

        let line = encoder.encode_to_vec(&event).unwrap();
        assert_eq!(
            String::from_utf8(line).unwrap(),
            "{\"message\":\"order accepted\",\"order_id\":4127}\n",
        );
    }
}
