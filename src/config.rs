//! Configuration types for the session core

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};

/// Output image format options
///
/// Carried as an explicit tag rather than a mode string so format-sensitive
/// operations (JPEG export in particular) can be checked before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency (lossless)
    Png,
    /// JPEG (no transparency; RGBA sources are flattened onto white)
    Jpeg,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// Configuration for an editor session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Output format used when no destination extension decides it
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// Upper bound for user-supplied resize dimensions
    pub max_dimension: u32,

    /// Enable debug mode (additional logging)
    pub debug: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            jpeg_quality: 95,
            max_dimension: 16_384,
            debug: false,
        }
    }
}

impl EditorConfig {
    /// Create a new configuration builder for fluent API construction
    #[must_use]
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder::new()
    }
}

/// Builder for `EditorConfig`
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
        }
    }

    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    #[must_use]
    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.config.max_dimension = max_dimension;
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `EditorError::InvalidConfig` for:
    /// - JPEG quality values above 100
    /// - A zero maximum dimension
    pub fn build(self) -> Result<EditorConfig> {
        if self.config.jpeg_quality > 100 {
            return Err(EditorError::invalid_config("JPEG quality must be 0-100"));
        }
        if self.config.max_dimension == 0 {
            return Err(EditorError::invalid_config(
                "maximum dimension must be positive",
            ));
        }

        Ok(self.config)
    }
}

impl Default for EditorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = EditorConfig::builder().build().unwrap();
        assert_eq!(config.output_format, OutputFormat::Png);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.max_dimension, 16_384);
        assert!(!config.debug);
    }

    #[test]
    fn test_builder_rejects_invalid_quality() {
        let result = EditorConfig::builder().jpeg_quality(101).build();
        assert!(matches!(result, Err(EditorError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_zero_max_dimension() {
        let result = EditorConfig::builder().max_dimension(0).build();
        assert!(matches!(result, Err(EditorError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = EditorConfig::builder()
            .output_format(OutputFormat::Jpeg)
            .jpeg_quality(80)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: EditorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Png.to_string(), "png");
        assert_eq!(OutputFormat::Jpeg.to_string(), "jpeg");
    }
}
