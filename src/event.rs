use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::argument::Argument;

/// Severity of a [`LogEvent`], ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Uppercase name as it appears in the output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Numeric severity, spaced so intermediate levels can be added.
    pub fn value(&self) -> u32 {
        match self {
            Self::Trace => 5_000,
            Self::Debug => 10_000,
            Self::Info => 20_000,
            Self::Warn => 30_000,
            Self::Error => 40_000,
        }
    }
}

/// One log event, assembled by the caller and handed to an encoder.
///
/// The constructor captures the current time and thread; both can be
/// overridden, which tests rely on for deterministic output.
#[derive(Debug)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    level: Level,
    logger_name: String,
    message: String,
    thread_name: Option<String>,
    arguments: Vec<Argument>,
    mdc: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: Level, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger_name: logger_name.into(),
            message: message.into(),
            thread_name: std::thread::current().name().map(str::to_owned),
            arguments: Vec::new(),
            mdc: BTreeMap::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = Some(thread_name.into());
        self
    }

    /// Appends one argument. Anything convertible to [`Argument`] works:
    /// structured helpers such as [`kv`](crate::kv) as well as plain
    /// display-formatted values.
    pub fn with_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn with_mdc_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mdc.insert(key.into(), value.into());
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn mdc(&self) -> &BTreeMap<String, String> {
        &self.mdc
    }
}
