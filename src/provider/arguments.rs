//! Provider for the arguments attached to a log event.

use std::{collections::HashMap, io, sync::Arc};

use crate::{
    argument::Argument,
    error::{BoxError, ConfigError, ErrorSink},
    event::LogEvent,
    generator::JsonGenerator,
    provider::JsonProvider,
};

/// Decodes a raw configuration string into a field-name override table.
///
/// Keys of the decoded table are default field names such as `arg0`; values
/// are the names to write instead.
pub trait MappingDecoder: Send + Sync {
    fn decode(&self, raw: &str) -> Result<HashMap<String, String>, BoxError>;
}

/// The default [`MappingDecoder`]: the raw string is a JSON object with
/// string values, for example `{"arg0":"user_id"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMappingDecoder;

impl MappingDecoder for JsonMappingDecoder {
    fn decode(&self, raw: &str) -> Result<HashMap<String, String>, BoxError> {
        serde_json::from_str(raw).map_err(Into::into)
    }
}

/// Writes the arguments of a [`LogEvent`] as JSON fields.
///
/// [`Structured`](Argument::Structured) arguments write their own fields and
/// are included by default. [`Plain`](Argument::Plain) arguments are off by
/// default; when enabled they become string fields named by a prefix plus
/// the argument's zero-based position in the full argument list, `arg0`,
/// `arg1` and so on. Individual default names can be overridden through a
/// decoded fields mapping.
///
/// Without a field name the fields land directly in the event object. With
/// one, they nest inside an object under that name, and the wrapper is only
/// opened once the first qualifying argument is about to be written, so an
/// event whose arguments are all skipped produces no output at all.
///
/// ```
/// use json_composer::{kv, JsonEncoder, Level, LogEvent};
/// use json_composer::provider::arguments::ArgumentsProvider;
///
/// let encoder = JsonEncoder::builder()
///     .with_arguments(
///         ArgumentsProvider::new()
///             .with_non_structured_arguments(true)
///             .with_field_name("args"),
///     )
///     .build();
///
/// let event = LogEvent::new(Level::Info, "app", "hello")
///     .with_argument(kv("user", "ada"))
///     .with_argument(502);
///
/// let line = encoder.encode_to_vec(&event).unwrap();
/// assert_eq!(
///     String::from_utf8(line).unwrap(),
///     "{\"args\":{\"user\":\"ada\",\"arg1\":\"502\"}}\n",
/// );
/// ```
pub struct ArgumentsProvider {
    include_structured_arguments: bool,
    include_non_structured_arguments: bool,
    non_structured_arguments_field_prefix: String,
    field_name: Option<String>,
    raw_fields_mapping: Option<String>,
    decoder: Box<dyn MappingDecoder>,
    mapping: Arc<HashMap<String, String>>,
    error_sink: ErrorSink,
}

impl ArgumentsProvider {
    pub fn new() -> Self {
        Self {
            include_structured_arguments: true,
            include_non_structured_arguments: false,
            non_structured_arguments_field_prefix: "arg".to_owned(),
            field_name: None,
            raw_fields_mapping: None,
            decoder: Box::new(JsonMappingDecoder),
            mapping: Arc::new(HashMap::new()),
            error_sink: ErrorSink::default(),
        }
    }

    /// Include arguments that write their own JSON. Default `true`.
    pub fn with_structured_arguments(mut self, include: bool) -> Self {
        self.include_structured_arguments = include;
        self
    }

    /// Include display-formatted arguments as string fields. Default
    /// `false`.
    pub fn with_non_structured_arguments(mut self, include: bool) -> Self {
        self.include_non_structured_arguments = include;
        self
    }

    /// Prefix for the default names of non-structured arguments. Default
    /// `"arg"`.
    pub fn with_non_structured_arguments_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.non_structured_arguments_field_prefix = prefix.into();
        self
    }

    /// Nests all emitted fields inside an object under `field_name` instead
    /// of writing them at the top level of the event.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Raw override table for default field names, decoded with the current
    /// [`MappingDecoder`].
    ///
    /// A string that fails to decode is reported through the error sink and
    /// the provider keeps the last table that decoded cleanly, initially the
    /// empty one. Install a custom sink before this call to capture the
    /// report.
    pub fn with_fields_mapping(mut self, raw: impl Into<String>) -> Self {
        self.raw_fields_mapping = Some(raw.into());
        self.resolve_mapping();
        self
    }

    /// Replaces the decoder and re-decodes any raw mapping already set.
    pub fn with_mapping_decoder(mut self, decoder: impl MappingDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self.resolve_mapping();
        self
    }

    /// Destination for decode failures. Defaults to [`ErrorSink::stderr`].
    pub fn with_error_sink(mut self, error_sink: ErrorSink) -> Self {
        self.error_sink = error_sink;
        self
    }

    fn resolve_mapping(&mut self) {
        match try_resolve(self.raw_fields_mapping.as_deref(), &*self.decoder) {
            Some(Ok(mapping)) => self.mapping = Arc::new(mapping),
            Some(Err(source)) => {
                // Keep the previous table; see with_fields_mapping.
                let raw = self.raw_fields_mapping.clone().unwrap_or_default();
                self.error_sink
                    .report(&ConfigError::FieldsMapping { raw, source });
            }
            None => {}
        }
    }

    fn open_wrapper(
        &self,
        generator: &mut JsonGenerator<'_>,
        opened: &mut bool,
    ) -> io::Result<()> {
        if !*opened {
            if let Some(field_name) = &self.field_name {
                generator.begin_object_field(field_name)?;
                *opened = true;
            }
        }
        Ok(())
    }
}

impl Default for ArgumentsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonProvider for ArgumentsProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        if !self.include_structured_arguments && !self.include_non_structured_arguments {
            return Ok(());
        }
        let arguments = event.arguments();
        if arguments.is_empty() {
            return Ok(());
        }

        let mut wrapper_opened = false;
        for (index, argument) in arguments.iter().enumerate() {
            match argument {
                Argument::Structured(value) if self.include_structured_arguments => {
                    self.open_wrapper(generator, &mut wrapper_opened)?;
                    value.write_to(generator)?;
                }
                Argument::Plain(value) if self.include_non_structured_arguments => {
                    self.open_wrapper(generator, &mut wrapper_opened)?;
                    let default_name =
                        format!("{}{index}", self.non_structured_arguments_field_prefix);
                    let field_name = self.mapping.get(&default_name).unwrap_or(&default_name);
                    generator.field(field_name, &value.to_string())?;
                }
                // Excluded kinds are skipped without opening the wrapper,
                // but they still advance the index.
                _ => {}
            }
        }

        if wrapper_opened {
            generator.end_object()?;
        }
        Ok(())
    }
}

/// Decodes `raw` once both inputs are present. `None` means there is
/// nothing to resolve yet.
fn try_resolve(
    raw: Option<&str>,
    decoder: &dyn MappingDecoder,
) -> Option<Result<HashMap<String, String>, BoxError>> {
    raw.map(|raw| decoder.decode(raw))
}
