//! Per-call processing options and the step defaults they merge over.
//!
//! Caller-facing option structs have every field optional. Each one resolves
//! against a fully populated settings value into a new settings value; nothing
//! is mutated in place, so defaults can be shared freely across calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::error::ProcessError;

/// Which pipeline an image goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProcessingMode {
    /// Return the input bytes untouched.
    Direct,
    /// Tonal and spatial enhancement only.
    Enhancement,
    /// Resample and re-encode only.
    #[default]
    Compression,
    /// Enhancement, then compression of the enhanced bytes.
    Both,
}

impl ProcessingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::Direct => "direct",
            ProcessingMode::Enhancement => "enhancement",
            ProcessingMode::Compression => "compression",
            ProcessingMode::Both => "both",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingMode {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(ProcessingMode::Direct),
            "enhancement" => Ok(ProcessingMode::Enhancement),
            "compression" => Ok(ProcessingMode::Compression),
            "both" => Ok(ProcessingMode::Both),
            other => Err(ProcessError::InvalidMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProcessingMode {
    type Error = ProcessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How the brightness step is driven.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BrightnessRepr", into = "BrightnessRepr")]
pub enum Brightness {
    /// Skip the step.
    Off,
    /// Pick the delta from the measured mean brightness.
    Auto,
    /// Add a fixed signed delta to every color channel.
    Offset(f32),
}

/// Wire shape: a number is an offset, otherwise `"auto"` / `"off"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BrightnessRepr {
    Offset(f32),
    Keyword(BrightnessKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BrightnessKeyword {
    Off,
    Auto,
}

impl From<BrightnessRepr> for Brightness {
    fn from(repr: BrightnessRepr) -> Self {
        match repr {
            BrightnessRepr::Offset(delta) => Brightness::Offset(delta),
            BrightnessRepr::Keyword(BrightnessKeyword::Off) => Brightness::Off,
            BrightnessRepr::Keyword(BrightnessKeyword::Auto) => Brightness::Auto,
        }
    }
}

impl From<Brightness> for BrightnessRepr {
    fn from(brightness: Brightness) -> Self {
        match brightness {
            Brightness::Off => BrightnessRepr::Keyword(BrightnessKeyword::Off),
            Brightness::Auto => BrightnessRepr::Keyword(BrightnessKeyword::Auto),
            Brightness::Offset(delta) => BrightnessRepr::Offset(delta),
        }
    }
}

/// Contrast values are limited to this symmetric range so the contrast
/// factor's denominator stays positive.
pub const CONTRAST_LIMIT: f32 = 255.0;

/// Fully resolved enhancement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementSettings {
    pub brightness: Brightness,
    /// Signed contrast in `[-255, 255]`; 0 leaves the image unchanged.
    pub contrast: f32,
    /// Non-negative saturation multiplier; 1.0 leaves the image unchanged.
    pub saturation: f32,
    pub texture: bool,
    pub sharpening: bool,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            brightness: Brightness::Offset(-10.0),
            contrast: 45.0,
            saturation: 1.0,
            texture: true,
            sharpening: true,
        }
    }
}

/// Caller-supplied enhancement overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhancementOptions {
    pub brightness: Option<Brightness>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    pub texture: Option<bool>,
    pub sharpening: Option<bool>,
}

impl EnhancementOptions {
    /// Merge these overrides over `defaults`, caller values winning.
    ///
    /// Contrast is clamped to `[-255, 255]`; saturation is floored at 0.
    pub fn resolve(&self, defaults: &EnhancementSettings) -> EnhancementSettings {
        EnhancementSettings {
            brightness: self.brightness.unwrap_or(defaults.brightness),
            contrast: self
                .contrast
                .unwrap_or(defaults.contrast)
                .clamp(-CONTRAST_LIMIT, CONTRAST_LIMIT),
            saturation: self.saturation.unwrap_or(defaults.saturation).max(0.0),
            texture: self.texture.unwrap_or(defaults.texture),
            sharpening: self.sharpening.unwrap_or(defaults.sharpening),
        }
    }
}

/// Compression strength, ordered from mildest to strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Low,
    #[default]
    Normal,
    High,
    Highest,
}

impl CompressionLevel {
    /// Encode quality factor for this level, strictly decreasing with strength.
    pub fn quality(self) -> f32 {
        match self {
            CompressionLevel::Low => 0.9,
            CompressionLevel::Normal => 0.75,
            CompressionLevel::High => 0.5,
            CompressionLevel::Highest => 0.2,
        }
    }

    /// Longer-edge cap used when the caller gives no explicit max dimension.
    pub fn default_max_dimension(self) -> u32 {
        match self {
            CompressionLevel::Low => 4096,
            CompressionLevel::Normal => 2048,
            CompressionLevel::High => 1600,
            CompressionLevel::Highest => 1024,
        }
    }

    /// Parse a level name, returning `None` for anything unrecognized so the
    /// default level applies.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" => Some(CompressionLevel::Low),
            "normal" => Some(CompressionLevel::Normal),
            "high" => Some(CompressionLevel::High),
            "highest" => Some(CompressionLevel::Highest),
            _ => None,
        }
    }
}

/// Fully resolved compression parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionSettings {
    pub level: CompressionLevel,
    /// Explicit longer-edge cap; `None` uses the level's default.
    pub max_dimension: Option<u32>,
    pub filter: FilterType,
}

impl CompressionSettings {
    /// The cap actually enforced on the longer edge.
    pub fn effective_max_dimension(&self) -> u32 {
        self.max_dimension
            .unwrap_or_else(|| self.level.default_max_dimension())
    }

    pub fn quality(&self) -> f32 {
        self.level.quality()
    }
}

/// Caller-supplied compression overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionOptions {
    /// Unrecognized level names deserialize as `None`.
    #[serde(deserialize_with = "lenient_level")]
    pub level: Option<CompressionLevel>,
    pub max_dimension: Option<u32>,
    pub filter: Option<FilterType>,
}

fn lenient_level<'de, D>(deserializer: D) -> Result<Option<CompressionLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(CompressionLevel::from_name))
}

impl CompressionOptions {
    /// Merge these overrides over `defaults`, caller values winning.
    ///
    /// A zero max dimension counts as absent.
    pub fn resolve(&self, defaults: &CompressionSettings) -> CompressionSettings {
        CompressionSettings {
            level: self.level.unwrap_or(defaults.level),
            max_dimension: self
                .max_dimension
                .filter(|&d| d > 0)
                .or(defaults.max_dimension),
            filter: self.filter.unwrap_or(defaults.filter),
        }
    }
}

/// Everything a caller can set for one `process_images` / `process_image` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessingOptions {
    /// Defaults to [`ProcessingMode::Compression`].
    pub mode: Option<ProcessingMode>,
    pub enhancement_options: Option<EnhancementOptions>,
    pub compression_options: Option<CompressionOptions>,
    /// Per-call override of [`ProcessorConfig::max_file_size_mb`](crate::ProcessorConfig).
    #[serde(rename = "maxFileSizeMB")]
    pub max_file_size_mb: Option<f64>,
    pub max_image_count: Option<usize>,
    pub supported_formats: Option<Vec<String>>,
}

impl ProcessingOptions {
    pub fn with_mode(mode: ProcessingMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode.unwrap_or_default()
    }

    pub fn enhancement(&self, defaults: &EnhancementSettings) -> EnhancementSettings {
        self.enhancement_options
            .unwrap_or_default()
            .resolve(defaults)
    }

    pub fn compression(&self, defaults: &CompressionSettings) -> CompressionSettings {
        self.compression_options
            .unwrap_or_default()
            .resolve(defaults)
    }
}
