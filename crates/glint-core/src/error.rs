//! Error types for Glint

use thiserror::Error;

/// The main error type for Glint operations.
///
/// Only configuration loading can fail; the simulation itself degrades
/// to fewer visible particles instead of returning errors.
#[derive(Debug, Error)]
pub enum GlintError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown particle kind: {0}")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for Glint operations
pub type Result<T> = std::result::Result<T, GlintError>;

impl From<toml::de::Error> for GlintError {
    fn from(err: toml::de::Error) -> Self {
        GlintError::TomlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_error_converts() {
        let err = toml::from_str::<toml::value::Table>("not = [valid").unwrap_err();
        let err: GlintError = err.into();
        assert!(matches!(err, GlintError::TomlParse(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn io_error_converts() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here")?)
        }
        let err = read().unwrap_err();
        assert!(matches!(err, GlintError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn unknown_preset_message() {
        let err = GlintError::UnknownPreset("fireworks".into());
        assert_eq!(err.to_string(), "Unknown preset: fireworks");
    }
}
