//! Station directory error types.

/// Errors from loading or querying the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Directory file could not be read (fatal at startup)
    #[error("failed to read station directory: {0}")]
    Io(#[from] std::io::Error),

    /// Directory file is not a valid name → id table (fatal at startup)
    #[error("station directory is not valid JSON: {message}")]
    Json { message: String },

    /// No station in the directory matches the input
    #[error("no station matches '{input}'")]
    NoMatch { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::NoMatch {
            input: "atlantis".into(),
        };
        assert_eq!(err.to_string(), "no station matches 'atlantis'");

        let err = StationError::Json {
            message: "expected number".into(),
        };
        assert!(err.to_string().contains("not valid JSON"));
    }
}
