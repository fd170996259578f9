/// Output field names used by the [`logstash`](crate::logstash) preset.
///
/// The defaults follow the classic logstash layout. Set a field to rename
/// it; the `Option` fields enable providers that are off by default:
///
/// ```
/// use json_composer::FieldNames;
///
/// let names = FieldNames {
///     message: "msg".to_owned(),
///     arguments: Some("args".to_owned()),
///     ..FieldNames::default()
/// };
/// # let _ = names;
/// ```
#[derive(Debug, Clone)]
pub struct FieldNames {
    pub timestamp: String,
    pub version: String,
    pub message: String,
    pub logger_name: String,
    pub thread_name: String,
    pub level: String,
    pub level_value: String,
    /// Wrapper for MDC entries; `None` writes them at the top level.
    pub mdc: Option<String>,
    /// Wrapper for event arguments; `None` writes them at the top level.
    pub arguments: Option<String>,
    /// Enables the per-event UUID field when set.
    pub uuid: Option<String>,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            timestamp: "@timestamp".to_owned(),
            version: "@version".to_owned(),
            message: "message".to_owned(),
            logger_name: "logger_name".to_owned(),
            thread_name: "thread_name".to_owned(),
            level: "level".to_owned(),
            level_value: "level_value".to_owned(),
            mdc: None,
            arguments: None,
            uuid: None,
        }
    }
}
