use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Why a single logo did not produce a color.
///
/// Every variant is local to one image. A batch driver should skip the image and keep whatever color it had stored
/// before; see [`ExtractionError::is_skippable`].
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The source bytes could not be decoded into a pixel grid.
    #[error("failed to decode image: {message}")]
    DecodeFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Neither the strict nor the relaxed classification pass kept any pixels.
    #[error("no usable content: every pixel was filtered out by both classification passes")]
    NoUsableContent,

    /// The configuration is structurally invalid. Detected before any pixel is touched.
    #[error("invalid config: {parameter} = {value}")]
    InvalidConfig { parameter: &'static str, value: String },
}

impl ExtractionError {
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_config(parameter: &'static str, value: impl ToString) -> Self {
        Self::InvalidConfig {
            parameter,
            value: value.to_string(),
        }
    }

    /// Whether the failure comes from the image itself rather than from the config it was extracted with.
    ///
    /// Either way the failure stays local to the one call: a batch driver skips the image and keeps its stored color.
    /// An invalid config will fail every other image it is used with too.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ExtractionError::DecodeFailure { .. } | ExtractionError::NoUsableContent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_names_parameter() {
        let err = ExtractionError::invalid_config("quant_step", 0);
        assert_eq!(err.to_string(), "invalid config: quant_step = 0");
        assert!(!err.is_skippable());
    }

    #[test]
    fn decode_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated");
        let err = ExtractionError::decode("logo.png", io);

        assert!(err.is_skippable());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "failed to decode image: logo.png");
    }
}
