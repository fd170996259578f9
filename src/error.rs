use std::{error::Error as StdError, fmt, sync::Arc};

/// Boxed error type used by decoder capabilities.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Non-fatal problems detected while configuring an encoder or a provider.
///
/// These never surface through the encoding data path; they are reported once
/// through an [`ErrorSink`] and the affected setting falls back to a usable
/// value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The raw non-structured arguments field mapping could not be decoded.
    #[error("invalid arguments fields mapping {raw:?}: {source}")]
    FieldsMapping {
        raw: String,
        #[source]
        source: BoxError,
    },

    /// Both the include and the exclude MDC key lists are configured.
    #[error("both include and exclude MDC key lists are set; the exclude list is ignored")]
    MdcKeyFilterConflict,
}

/// Destination for [`ConfigError`]s, kept separate from the encoding data
/// path.
///
/// The default sink writes one line to stderr. Tests and embedding
/// applications can install their own handler:
///
/// ```
/// use json_composer::ErrorSink;
///
/// let sink = ErrorSink::new(|error| eprintln!("encoder misconfigured: {error}"));
/// # let _ = sink;
/// ```
#[derive(Clone)]
pub struct ErrorSink(Arc<dyn Fn(&ConfigError) + Send + Sync>);

impl ErrorSink {
    pub fn new(handler: impl Fn(&ConfigError) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    /// Reports through `eprintln!`, prefixed with the crate name.
    pub fn stderr() -> Self {
        Self::new(|error| eprintln!("[json-composer] {error}"))
    }

    pub(crate) fn report(&self, error: &ConfigError) {
        (self.0)(error);
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("ErrorSink { .. }")
    }
}
