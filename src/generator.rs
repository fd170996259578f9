use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};

/// Streaming writer for a single compact JSON document.
///
/// The generator drives [`serde_json`]'s [`CompactFormatter`] directly so
/// that providers can interleave serialized values with raw, pre-rendered
/// JSON fragments while the generator keeps track of commas. Output goes to
/// the underlying writer unbuffered; callers that care wrap the writer in a
/// [`io::BufWriter`] or an in-memory buffer.
///
/// Structural calls must nest correctly. Mismatched `begin`/`end` pairs are
/// caught by `debug_assert!` only, the same way invalid raw fragments are.
pub struct JsonGenerator<'a> {
    writer: &'a mut dyn io::Write,
    formatter: CompactFormatter,
    // One entry per open object; flips to true once the object has a field.
    has_fields: Vec<bool>,
}

impl<'a> JsonGenerator<'a> {
    pub fn new(writer: &'a mut dyn io::Write) -> Self {
        Self {
            writer,
            formatter: CompactFormatter,
            has_fields: Vec::new(),
        }
    }

    /// Opens a JSON object.
    pub fn begin_object(&mut self) -> io::Result<()> {
        self.formatter.begin_object(&mut *self.writer)?;
        self.has_fields.push(false);
        Ok(())
    }

    /// Closes the innermost open object.
    pub fn end_object(&mut self) -> io::Result<()> {
        debug_assert!(
            self.has_fields.pop().is_some(),
            "end_object without a matching begin_object",
        );
        self.formatter.end_object(&mut *self.writer)
    }

    /// Writes a field name, escaping it, and leaves the generator positioned
    /// for the field's value.
    pub fn begin_field(&mut self, name: &str) -> io::Result<()> {
        debug_assert!(
            !self.has_fields.is_empty(),
            "field {name:?} written outside of an object",
        );
        let first = match self.has_fields.last_mut() {
            Some(has_fields) => !std::mem::replace(has_fields, true),
            None => true,
        };
        self.formatter.begin_object_key(&mut *self.writer, first)?;
        serde_json::to_writer(&mut *self.writer, name)?;
        self.formatter.end_object_key(&mut *self.writer)?;
        self.formatter.begin_object_value(&mut *self.writer)
    }

    /// Serializes `value` at the current position.
    pub fn value<T>(&mut self, value: &T) -> io::Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde_json::to_writer(&mut *self.writer, value)?;
        Ok(())
    }

    /// Writes an already-rendered JSON fragment verbatim.
    ///
    /// The fragment must be a single valid JSON value; this is only checked
    /// in debug builds.
    pub fn raw_value(&mut self, raw: &str) -> io::Result<()> {
        debug_assert!(
            serde_json::from_str::<serde_json::Value>(raw).is_ok(),
            "raw fragment is not valid JSON: {raw}",
        );
        self.writer.write_all(raw.as_bytes())
    }

    /// Writes one complete `name: value` field.
    pub fn field<T>(&mut self, name: &str, value: &T) -> io::Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.begin_field(name)?;
        self.value(value)
    }

    /// Writes one complete field whose value is a raw JSON fragment.
    pub fn raw_field(&mut self, name: &str, raw: &str) -> io::Result<()> {
        self.begin_field(name)?;
        self.raw_value(raw)
    }

    /// Writes a field name and opens an object as its value.
    pub fn begin_object_field(&mut self, name: &str) -> io::Result<()> {
        self.begin_field(name)?;
        self.begin_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(build: impl FnOnce(&mut JsonGenerator<'_>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        let mut generator = JsonGenerator::new(&mut buffer);
        build(&mut generator).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn empty_object() {
        let output = generate(|g| {
            g.begin_object()?;
            g.end_object()
        });
        assert_eq!(output, "{}");
    }

    #[test]
    fn commas_separate_fields_but_not_the_first() {
        let output = generate(|g| {
            g.begin_object()?;
            g.field("a", &1)?;
            g.field("b", &2)?;
            g.field("c", &3)?;
            g.end_object()
        });
        assert_eq!(output, r#"{"a":1,"b":2,"c":3}"#);
    }

    #[test]
    fn nested_objects_track_commas_per_level() {
        let output = generate(|g| {
            g.begin_object()?;
            g.field("outer", &true)?;
            g.begin_object_field("inner")?;
            g.field("x", &1)?;
            g.field("y", &2)?;
            g.end_object()?;
            g.field("trailing", &false)?;
            g.end_object()
        });
        assert_eq!(
            output,
            r#"{"outer":true,"inner":{"x":1,"y":2},"trailing":false}"#,
        );
    }

    #[test]
    fn field_names_are_escaped() {
        let output = generate(|g| {
            g.begin_object()?;
            g.field("quo\"te", &"tab\there")?;
            g.end_object()
        });
        assert_eq!(output, r#"{"quo\"te":"tab\there"}"#);
    }

    #[test]
    fn raw_fragments_are_written_verbatim() {
        let output = generate(|g| {
            g.begin_object()?;
            g.raw_field("payload", r#"{"nested":[1,2,3]}"#)?;
            g.field("after", &"ok")?;
            g.end_object()
        });
        assert_eq!(output, r#"{"payload":{"nested":[1,2,3]},"after":"ok"}"#);
    }

    #[test]
    fn serializes_non_string_values() {
        let output = generate(|g| {
            g.begin_object()?;
            g.field("n", &7_u64)?;
            g.field("f", &1.5_f64)?;
            g.field("none", &Option::<u8>::None)?;
            g.field("list", &["a", "b"])?;
            g.end_object()
        });
        assert_eq!(output, r#"{"n":7,"f":1.5,"none":null,"list":["a","b"]}"#);
    }
}
