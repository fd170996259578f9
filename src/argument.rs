use std::fmt;
use std::io;

use serde::Serialize;
use serde_json::Value;

use crate::generator::JsonGenerator;

/// A value that knows how to write itself as one or more JSON fields.
///
/// Implementations are handed a generator positioned inside an open object
/// and append complete fields to it. [`kv`], [`entries`] and [`raw_json`]
/// cover the common cases; custom implementations can emit any number of
/// fields, including none.
pub trait StructuredValue: Send + Sync {
    fn write_to(&self, generator: &mut JsonGenerator<'_>) -> io::Result<()>;
}

/// One argument attached to a [`LogEvent`](crate::LogEvent).
///
/// Structured arguments carry their own field layout; plain arguments are
/// arbitrary display-formatted values that only reach the output when a
/// provider opts in to them.
pub enum Argument {
    Structured(Box<dyn StructuredValue>),
    Plain(Box<dyn fmt::Display + Send + Sync>),
}

impl Argument {
    pub fn structured(value: impl StructuredValue + 'static) -> Self {
        Self::Structured(Box::new(value))
    }

    pub fn plain(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self::Plain(Box::new(value))
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(_) => f.pad("Structured(..)"),
            Self::Plain(value) => write!(f, "Plain({value})"),
        }
    }
}

macro_rules! impl_plain_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Self::plain(value)
                }
            }
        )*
    };
}

impl_plain_from!(&'static str, String, bool, i32, i64, u64, f64);

/// Single named field. The value is converted to a [`Value`] up front;
/// anything that fails the conversion is recorded as `null`.
pub fn kv(key: impl Into<String>, value: impl Serialize) -> KeyValue {
    KeyValue {
        key: key.into(),
        value: serde_json::to_value(value).unwrap_or(Value::Null),
    }
}

pub struct KeyValue {
    key: String,
    value: Value,
}

impl StructuredValue for KeyValue {
    fn write_to(&self, generator: &mut JsonGenerator<'_>) -> io::Result<()> {
        generator.field(&self.key, &self.value)
    }
}

impl From<KeyValue> for Argument {
    fn from(value: KeyValue) -> Self {
        Self::structured(value)
    }
}

/// Several named fields written in iteration order.
pub fn entries<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Entries
where
    K: Into<String>,
    V: Serialize,
{
    Entries {
        fields: fields
            .into_iter()
            .map(|(key, value)| {
                (
                    key.into(),
                    serde_json::to_value(value).unwrap_or(Value::Null),
                )
            })
            .collect(),
    }
}

pub struct Entries {
    fields: Vec<(String, Value)>,
}

impl StructuredValue for Entries {
    fn write_to(&self, generator: &mut JsonGenerator<'_>) -> io::Result<()> {
        for (key, value) in &self.fields {
            generator.field(key, value)?;
        }
        Ok(())
    }
}

impl From<Entries> for Argument {
    fn from(value: Entries) -> Self {
        Self::structured(value)
    }
}

/// Named field whose value is an already-rendered JSON fragment. The
/// fragment is written verbatim, so it must be a single valid JSON value.
pub fn raw_json(key: impl Into<String>, raw: impl Into<String>) -> RawJson {
    RawJson {
        key: key.into(),
        raw: raw.into(),
    }
}

pub struct RawJson {
    key: String,
    raw: String,
}

impl StructuredValue for RawJson {
    fn write_to(&self, generator: &mut JsonGenerator<'_>) -> io::Result<()> {
        generator.raw_field(&self.key, &self.raw)
    }
}

impl From<RawJson> for Argument {
    fn from(value: RawJson) -> Self {
        Self::structured(value)
    }
}
