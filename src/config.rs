//! Plot configuration
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. Command line flags are applied on top of whatever the
//! file provides.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PlotError, Result};

/// Largest accepted image side in pixels.
pub const MAX_IMAGE_SIDE: u32 = 16384;

/// Image encoding of the saved chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster image (default)
    #[default]
    Png,
    /// Vector image
    Svg,
}

impl ImageFormat {
    /// File extension used for the output path.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Chart caption
    pub title: String,

    /// X-axis description
    pub x_label: String,

    /// Y-axis description
    pub y_label: String,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    pub format: ImageFormat,

    /// Colour of the expected series, `#rrggbb`
    pub expected_color: String,

    /// Colour of the actual series, `#rrggbb`
    pub actual_color: String,

    /// TrueType/OpenType font used for all text.
    /// None = first match among the usual system font locations.
    pub font_path: Option<PathBuf>,

    /// Field delimiter of the input file.
    /// None = derived from the file extension.
    pub delimiter: Option<char>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "Sine Function Approximation".to_string(),
            x_label: "Input".to_string(),
            y_label: "Output".to_string(),
            // 10 x 6 inches at 100 dpi
            width: 1000,
            height: 600,
            format: ImageFormat::Png,
            expected_color: "#0000ff".to_string(),
            actual_color: "#ff0000".to_string(),
            font_path: None,
            delimiter: None,
        }
    }
}

impl PlotConfig {
    /// Read a JSON configuration file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
        let config: PlotConfig = serde_json::from_str(&text)
            .map_err(|e| PlotError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::Config(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_IMAGE_SIDE || self.height > MAX_IMAGE_SIDE {
            return Err(PlotError::Config(format!(
                "image size must be at most {MAX_IMAGE_SIDE}x{MAX_IMAGE_SIDE}, got {}x{}",
                self.width, self.height
            )));
        }
        if let Some(d) = self.delimiter {
            if !d.is_ascii() {
                return Err(PlotError::Config(format!(
                    "delimiter must be a single ASCII character, got '{d}'"
                )));
            }
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter.filter(char::is_ascii).map(|d| d as u8)
    }
}
