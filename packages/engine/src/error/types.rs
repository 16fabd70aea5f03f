/// Result alias for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error raised when a raw payload is not valid for the selected format
///
/// Display strings deliberately name the offending format so the error
/// can surface to API consumers unchanged. Carried sources/details are
/// for diagnostics only and do not participate in the display string.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Raw payload is not valid JSON
    #[error("Failed To Parse JSON")]
    Json(#[source] serde_json::Error),

    /// Raw payload is not valid YAML
    #[error("Failed To Parse YAML")]
    Yaml(#[source] serde_yaml::Error),

    /// Raw payload is not well-formed XML
    #[error("Failed To Parse XML")]
    Xml(String),

    /// Raw payload is not a valid serialized-data value
    #[error("Failed To Parse Serialized Data")]
    Serialized(String),

    /// Raw payload is not a decodable query string
    ///
    /// The built-in query-string decoder is total (any text decodes to a
    /// map), so this variant is only produced by replacement decoders
    /// registered for `application/x-www-form-urlencoded`.
    #[error("Failed To Parse Query String")]
    QueryString(String),

    /// Raw payload is not valid for a runtime-registered format
    #[error("Failed To Parse {format} Data")]
    Custom {
        /// Name of the registered format
        format: String,
        /// Decoder-supplied detail
        detail: String,
    },
}

impl DecodeError {
    /// Name of the format that failed to decode
    #[must_use]
    pub fn format_name(&self) -> &str {
        match self {
            Self::Json(_) => "JSON",
            Self::Yaml(_) => "YAML",
            Self::Xml(_) => "XML",
            Self::Serialized(_) => "Serialized Data",
            Self::QueryString(_) => "Query String",
            Self::Custom { format, .. } => format,
        }
    }
}
