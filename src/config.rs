//! Run configuration
//!
//! Settings can come from a TOML file and are then overridden by the
//! command line. Every key is optional:
//!
//! ```toml
//! output_format = "png"
//! annotation_pattern = "Quadra"
//! raster_extensions = ["tif", "tiff"]
//! strip_trailing_underscore = true
//! layer = "REGIONS"
//! parallel = false
//! dry_run = false
//! ```

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::errors::{CropError, CropResult};
use crate::extractor::ImageEncoderFactory;

/// Annotation files must contain this word unless configured otherwise
pub const DEFAULT_ANNOTATION_PATTERN: &str = "Quadra";

lazy_static! {
    static ref DEFAULT_ANNOTATION_REGEX: Regex = Regex::new(DEFAULT_ANNOTATION_PATTERN)
        .expect("default annotation pattern is a valid regex");
}

/// Settings for one cropping run
#[derive(Debug, Clone)]
pub struct CropConfig {
    /// Output image format name ("png" or "tif")
    pub output_format: String,
    /// Pattern an annotation file name must match
    pub annotation_pattern: Regex,
    /// Raster file extensions, compared case-insensitively
    pub raster_extensions: Vec<String>,
    /// Drop one trailing `_` from raster base names before pairing
    pub strip_trailing_underscore: bool,
    /// Only use annotation entities on this layer
    pub layer: Option<String>,
    /// Process pairs on a thread pool
    pub parallel: bool,
    /// Compute windows without writing images
    pub dry_run: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        CropConfig {
            output_format: "png".to_string(),
            annotation_pattern: DEFAULT_ANNOTATION_REGEX.clone(),
            raster_extensions: vec!["tif".to_string(), "tiff".to_string()],
            strip_trailing_underscore: true,
            layer: None,
            parallel: false,
            dry_run: false,
        }
    }
}

impl CropConfig {
    /// Parse a configuration from a TOML string
    pub fn from_str(content: &str) -> CropResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| CropError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = CropConfig::default();

        if let Some(format) = Self::get_str(&toml_value, "output_format")? {
            config.set_output_format(format)?;
        }

        if let Some(pattern) = Self::get_str(&toml_value, "annotation_pattern")? {
            config.set_annotation_pattern(pattern)?;
        }

        if let Some(value) = toml_value.get("raster_extensions") {
            let list = value.as_array().ok_or_else(|| {
                CropError::ConfigError("raster_extensions must be an array of strings".to_string())
            })?;
            let mut extensions = Vec::with_capacity(list.len());
            for item in list {
                let ext = item.as_str().ok_or_else(|| {
                    CropError::ConfigError("raster_extensions must be an array of strings".to_string())
                })?;
                extensions.push(ext.trim_start_matches('.').to_string());
            }
            if extensions.is_empty() {
                return Err(CropError::ConfigError("raster_extensions cannot be empty".to_string()));
            }
            config.raster_extensions = extensions;
        }

        if let Some(flag) = Self::get_bool(&toml_value, "strip_trailing_underscore")? {
            config.strip_trailing_underscore = flag;
        }

        if let Some(layer) = Self::get_str(&toml_value, "layer")? {
            config.layer = Some(layer.to_string());
        }

        if let Some(flag) = Self::get_bool(&toml_value, "parallel")? {
            config.parallel = flag;
        }

        if let Some(flag) = Self::get_bool(&toml_value, "dry_run")? {
            config.dry_run = flag;
        }

        if let Some(table) = toml_value.as_table() {
            for key in table.keys() {
                if !Self::known_keys().contains(&key.as_str()) {
                    warn!("Ignoring unknown configuration key: {}", key);
                }
            }
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CropResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_str(&contents)
    }

    /// Set the output format, rejecting names no encoder handles
    pub fn set_output_format(&mut self, format: &str) -> CropResult<()> {
        let normalized = format.trim().to_lowercase();
        if !ImageEncoderFactory::supported_formats().contains(&normalized.as_str()) {
            return Err(CropError::ConfigError(format!("Unsupported output format: {}", format)));
        }
        self.output_format = normalized;
        Ok(())
    }

    /// Set the annotation file name pattern
    pub fn set_annotation_pattern(&mut self, pattern: &str) -> CropResult<()> {
        self.annotation_pattern = Regex::new(pattern)
            .map_err(|e| CropError::ConfigError(format!("Invalid annotation pattern '{}': {}", pattern, e)))?;
        Ok(())
    }

    fn known_keys() -> &'static [&'static str] {
        &[
            "output_format",
            "annotation_pattern",
            "raster_extensions",
            "strip_trailing_underscore",
            "layer",
            "parallel",
            "dry_run",
        ]
    }

    fn get_str<'v>(toml_value: &'v toml::Value, key: &str) -> CropResult<Option<&'v str>> {
        match toml_value.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| CropError::ConfigError(format!("{} must be a string", key))),
        }
    }

    fn get_bool(toml_value: &toml::Value, key: &str) -> CropResult<Option<bool>> {
        match toml_value.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| CropError::ConfigError(format!("{} must be a boolean", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CropConfig::default();
        assert_eq!(config.output_format, "png");
        assert!(config.annotation_pattern.is_match("Quadra_01.dxf"));
        assert_eq!(config.raster_extensions, vec!["tif", "tiff"]);
        assert!(config.strip_trailing_underscore);
        assert!(!config.parallel);
    }

    #[test]
    fn test_from_str_overrides() {
        let config = CropConfig::from_str(
            r#"
            output_format = "TIF"
            annotation_pattern = "^Lote_\\d+"
            raster_extensions = [".tif", "jp2"]
            strip_trailing_underscore = false
            layer = "REGIONS"
            parallel = true
            "#,
        )
        .unwrap();

        assert_eq!(config.output_format, "tif");
        assert!(config.annotation_pattern.is_match("Lote_12.dxf"));
        assert!(!config.annotation_pattern.is_match("Quadra.dxf"));
        assert_eq!(config.raster_extensions, vec!["tif", "jp2"]);
        assert!(!config.strip_trailing_underscore);
        assert_eq!(config.layer.as_deref(), Some("REGIONS"));
        assert!(config.parallel);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = CropConfig::from_str("").unwrap();
        assert_eq!(config.output_format, "png");
        assert!(config.layer.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(CropConfig::from_str("output_format = \"jpeg\"").is_err());
        assert!(CropConfig::from_str("annotation_pattern = \"(\"").is_err());
        assert!(CropConfig::from_str("parallel = \"yes\"").is_err());
        assert!(CropConfig::from_str("raster_extensions = []").is_err());
        assert!(CropConfig::from_str("raster_extensions = [1, 2]").is_err());
        assert!(CropConfig::from_str("not toml at all = = =").is_err());
    }
}
