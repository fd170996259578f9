//! Providers for the standard event fields.
//!
//! Each provider writes at most one field. The constructors take the output
//! field name; [`Default`] uses the conventional one.

use std::io;

use chrono::SecondsFormat;
use serde_json::Value;
use uuid::Uuid;

use crate::{event::LogEvent, generator::JsonGenerator, provider::JsonProvider};

/// Writes the event message.
#[derive(Debug, Clone)]
pub struct MessageProvider {
    field_name: String,
}

impl MessageProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Default for MessageProvider {
    fn default() -> Self {
        Self::new("message")
    }
}

impl JsonProvider for MessageProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, event.message())
    }
}

/// Writes the level's upper-case name.
#[derive(Debug, Clone)]
pub struct LevelProvider {
    field_name: String,
}

impl LevelProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Default for LevelProvider {
    fn default() -> Self {
        Self::new("level")
    }
}

impl JsonProvider for LevelProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, event.level().as_str())
    }
}

/// Writes the level's numeric value.
#[derive(Debug, Clone)]
pub struct LevelValueProvider {
    field_name: String,
}

impl LevelValueProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Default for LevelValueProvider {
    fn default() -> Self {
        Self::new("level_value")
    }
}

impl JsonProvider for LevelValueProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, &event.level().value())
    }
}

/// Writes the logger name.
#[derive(Debug, Clone)]
pub struct LoggerNameProvider {
    field_name: String,
}

impl LoggerNameProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Default for LoggerNameProvider {
    fn default() -> Self {
        Self::new("logger_name")
    }
}

impl JsonProvider for LoggerNameProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, event.logger_name())
    }
}

/// Writes the thread name, skipping events without one.
#[derive(Debug, Clone)]
pub struct ThreadNameProvider {
    field_name: String,
}

impl ThreadNameProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Default for ThreadNameProvider {
    fn default() -> Self {
        Self::new("thread_name")
    }
}

impl JsonProvider for ThreadNameProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        match event.thread_name() {
            Some(thread_name) => generator.field(&self.field_name, thread_name),
            None => Ok(()),
        }
    }
}

/// How [`TimestampProvider`] renders the event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// RFC 3339 with millisecond precision and a `Z` suffix.
    #[default]
    Rfc3339Millis,
    /// Milliseconds since the unix epoch, as a number.
    UnixMillis,
}

/// Writes the event timestamp.
#[derive(Debug, Clone)]
pub struct TimestampProvider {
    field_name: String,
    format: TimestampFormat,
}

impl TimestampProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            format: TimestampFormat::default(),
        }
    }

    pub fn with_format(mut self, format: TimestampFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for TimestampProvider {
    fn default() -> Self {
        Self::new("@timestamp")
    }
}

impl JsonProvider for TimestampProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        match self.format {
            TimestampFormat::Rfc3339Millis => generator.field(
                &self.field_name,
                &event
                    .timestamp()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            TimestampFormat::UnixMillis => {
                generator.field(&self.field_name, &event.timestamp().timestamp_millis())
            }
        }
    }
}

/// Writes a constant schema version, `"1"` unless overridden.
#[derive(Debug, Clone)]
pub struct VersionProvider {
    field_name: String,
    version: String,
}

impl VersionProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            version: "1".to_owned(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for VersionProvider {
    fn default() -> Self {
        Self::new("@version")
    }
}

impl JsonProvider for VersionProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, _event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, &self.version)
    }
}

/// Writes a fresh v4 UUID for every event.
#[derive(Debug, Clone)]
pub struct UuidProvider {
    field_name: String,
}

impl UuidProvider {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Default for UuidProvider {
    fn default() -> Self {
        Self::new("uuid")
    }
}

impl JsonProvider for UuidProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, _event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, &Uuid::new_v4().to_string())
    }
}

/// Writes the same fixed value on every event.
#[derive(Debug, Clone)]
pub struct StaticFieldProvider {
    field_name: String,
    value: Value,
}

impl StaticFieldProvider {
    pub fn new(field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
        }
    }
}

impl JsonProvider for StaticFieldProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, _event: &LogEvent) -> io::Result<()> {
        generator.field(&self.field_name, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::Level;

    fn write(provider: &dyn JsonProvider, event: &LogEvent) -> String {
        let mut buffer = Vec::new();
        let mut generator = JsonGenerator::new(&mut buffer);
        generator.begin_object().unwrap();
        provider.write_to(&mut generator, event).unwrap();
        generator.end_object().unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn event() -> LogEvent {
        LogEvent::new(Level::Warn, "app::db", "slow query")
            .with_timestamp(DateTime::from_timestamp_millis(1_721_039_445_123).unwrap())
            .with_thread_name("worker-3")
    }

    #[test]
    fn standard_fields() {
        let event = event();

        assert_eq!(
            write(&MessageProvider::default(), &event),
            r#"{"message":"slow query"}"#,
        );
        assert_eq!(
            write(&LevelProvider::default(), &event),
            r#"{"level":"WARN"}"#,
        );
        assert_eq!(
            write(&LevelValueProvider::default(), &event),
            r#"{"level_value":30000}"#,
        );
        assert_eq!(
            write(&LoggerNameProvider::default(), &event),
            r#"{"logger_name":"app::db"}"#,
        );
        assert_eq!(
            write(&ThreadNameProvider::default(), &event),
            r#"{"thread_name":"worker-3"}"#,
        );
    }

    #[test]
    fn thread_name_is_skipped_when_absent() {
        // Unnamed threads report no name.
        let event = std::thread::spawn(|| LogEvent::new(Level::Info, "app", "hi"))
            .join()
            .unwrap();
        assert!(event.thread_name().is_none());

        assert_eq!(write(&ThreadNameProvider::default(), &event), "{}");
    }

    #[test]
    fn timestamp_formats() {
        let event = event();

        assert_eq!(
            write(&TimestampProvider::default(), &event),
            r#"{"@timestamp":"2024-07-15T10:30:45.123Z"}"#,
        );
        assert_eq!(
            write(
                &TimestampProvider::new("ts").with_format(TimestampFormat::UnixMillis),
                &event,
            ),
            r#"{"ts":1721039445123}"#,
        );
    }

    #[test]
    fn version_defaults_to_the_string_one() {
        assert_eq!(
            write(&VersionProvider::default(), &event()),
            r#"{"@version":"1"}"#,
        );
        assert_eq!(
            write(&VersionProvider::new("v").with_version("2"), &event()),
            r#"{"v":"2"}"#,
        );
    }

    #[test]
    fn uuid_is_valid_and_fresh_per_event() {
        let provider = UuidProvider::default();
        let event = event();

        let first: serde_json::Value = serde_json::from_str(&write(&provider, &event)).unwrap();
        let second: serde_json::Value = serde_json::from_str(&write(&provider, &event)).unwrap();

        let first = first["uuid"].as_str().unwrap();
        let second = second["uuid"].as_str().unwrap();
        assert!(Uuid::parse_str(first).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn static_field_writes_its_value() {
        let provider = StaticFieldProvider::new("service", "checkout");
        assert_eq!(write(&provider, &event()), r#"{"service":"checkout"}"#);
    }
}
