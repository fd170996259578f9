//! Provider for mapped diagnostic context entries.

use std::io;

use crate::{
    error::{ConfigError, ErrorSink},
    event::LogEvent,
    generator::JsonGenerator,
    provider::JsonProvider,
};

/// Writes the event's MDC entries, inline or nested under a wrapper name.
///
/// Keys can be filtered with an include list or an exclude list. Setting
/// both is a configuration mistake: it is reported through the error sink
/// and the include list wins.
pub struct MdcProvider {
    field_name: Option<String>,
    include_keys: Vec<String>,
    exclude_keys: Vec<String>,
    error_sink: ErrorSink,
}

impl MdcProvider {
    pub fn new() -> Self {
        Self {
            field_name: None,
            include_keys: Vec::new(),
            exclude_keys: Vec::new(),
            error_sink: ErrorSink::default(),
        }
    }

    /// Nests the entries inside an object under `field_name`.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Writes only these keys.
    pub fn with_included_keys(
        mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.include_keys = keys.into_iter().map(Into::into).collect();
        self.check_filters();
        self
    }

    /// Writes everything except these keys.
    pub fn with_excluded_keys(
        mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.exclude_keys = keys.into_iter().map(Into::into).collect();
        self.check_filters();
        self
    }

    /// Destination for configuration mistakes. Defaults to
    /// [`ErrorSink::stderr`]; install before the filter calls to capture
    /// their reports.
    pub fn with_error_sink(mut self, error_sink: ErrorSink) -> Self {
        self.error_sink = error_sink;
        self
    }

    fn check_filters(&self) {
        if !self.include_keys.is_empty() && !self.exclude_keys.is_empty() {
            self.error_sink.report(&ConfigError::MdcKeyFilterConflict);
        }
    }

    fn includes(&self, key: &str) -> bool {
        if !self.include_keys.is_empty() {
            return self.include_keys.iter().any(|included| included == key);
        }
        !self.exclude_keys.iter().any(|excluded| excluded == key)
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

impl Default for MdcProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonProvider for MdcProvider {
    fn write_to(&self, generator: &mut JsonGenerator<'_>, event: &LogEvent) -> io::Result<()> {
        let mdc = event.mdc();
        if mdc.is_empty() {
            return Ok(());
        }

        let mut wrapper_opened = false;
        for (key, value) in mdc {
            if !self.includes(key) {
                continue;
            }
            self.open_wrapper(generator, &mut wrapper_opened)?;
            generator.field(key, value)?;
        }

        if wrapper_opened {
            generator.end_object()?;
        }
        Ok(())
    }
}
