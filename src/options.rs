//! Optimization options and their wire keywords
//!
//! Every enum here maps to the keyword the service expects in the request
//! path. Values that fall outside the named choices map to an explicit
//! fallback keyword instead of being rejected.

use crate::error::{ImageOptimError, Result};
use std::fmt;
use std::str::FromStr;

/// Multiplier applied to the requested dimensions for high-DPI displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighDpi {
    #[default]
    X1,
    X2,
    X3,
}

impl HighDpi {
    /// Returns the path keyword, or `None` for the 1x default
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            HighDpi::X1 => None,
            HighDpi::X2 => Some("2x"),
            HighDpi::X3 => Some("3x"),
        }
    }
}

impl fmt::Display for HighDpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("1x"))
    }
}

impl FromStr for HighDpi {
    type Err = ImageOptimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1x" | "1" => Ok(HighDpi::X1),
            "2x" | "2" => Ok(HighDpi::X2),
            "3x" | "3" => Ok(HighDpi::X3),
            _ => Err(ImageOptimError::InvalidValue {
                kind: "high DPI",
                value: s.to_string(),
            }),
        }
    }
}

/// Side of the image to favor when cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropType {
    /// Let the service decide; encoded as a bare `crop`
    #[default]
    Default,
    Auto,
    Top,
    Left,
    Right,
    Bottom,
}

impl CropType {
    pub fn keyword(&self) -> &'static str {
        match self {
            CropType::Auto => "crop=auto",
            CropType::Top => "crop=top",
            CropType::Left => "crop=left",
            CropType::Right => "crop=right",
            CropType::Bottom => "crop=bottom",
            CropType::Default => "crop",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CropType::Default => "default",
            CropType::Auto => "auto",
            CropType::Top => "top",
            CropType::Left => "left",
            CropType::Right => "right",
            CropType::Bottom => "bottom",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CropType {
    type Err = ImageOptimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(CropType::Default),
            "auto" => Ok(CropType::Auto),
            "top" => Ok(CropType::Top),
            "left" => Ok(CropType::Left),
            "right" => Ok(CropType::Right),
            "bottom" => Ok(CropType::Bottom),
            _ => Err(ImageOptimError::InvalidValue {
                kind: "crop type",
                value: s.to_string(),
            }),
        }
    }
}

/// Quality level used when saving in a lossy format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
    Lossless,
}

impl Quality {
    pub fn keyword(&self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
            Quality::Lossless => "lossless",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for Quality {
    type Err = ImageOptimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Quality::Low),
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            "lossless" => Ok(Quality::Lossless),
            _ => Err(ImageOptimError::InvalidValue {
                kind: "quality",
                value: s.to_string(),
            }),
        }
    }
}

/// Output format requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Best format chosen by the service
    #[default]
    Auto,
    Png,
    Jpeg,
    WebM,
    H264,
    /// Keep the input format; also the fallback keyword for unknown formats
    Same,
}

impl Format {
    pub fn keyword(&self) -> &'static str {
        match self {
            Format::H264 => "format=h264",
            Format::Jpeg => "format=jpeg",
            Format::Png => "format=png",
            Format::WebM => "format=webm",
            Format::Auto | Format::Same => "format=same",
        }
    }

    /// File extension for files written in this format, `None` keeps the input's
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Format::Png => Some("png"),
            Format::Jpeg => Some("jpg"),
            Format::WebM => Some("webm"),
            Format::H264 => Some("h264"),
            Format::Auto | Format::Same => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Auto => "auto",
            Format::Png => "png",
            Format::Jpeg => "jpeg",
            Format::WebM => "webm",
            Format::H264 => "h264",
            Format::Same => "same",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Format {
    type Err = ImageOptimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Format::Auto),
            "png" => Ok(Format::Png),
            "jpeg" | "jpg" => Ok(Format::Jpeg),
            "webm" => Ok(Format::WebM),
            "h264" => Ok(Format::H264),
            "same" => Ok(Format::Same),
            _ => Err(ImageOptimError::InvalidValue {
                kind: "format",
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the service needs to know about how to optimize one image.
///
/// The value is immutable for the duration of a call; build a new one (or
/// clone and adjust) to change settings between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizationOptions {
    pub username: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub high_dpi: HighDpi,
    pub fit: bool,
    pub crop: bool,
    pub crop_type: CropType,
    pub crop_x_focal_point: Option<u32>,
    pub crop_y_focal_point: Option<u32>,
    pub trim_border: bool,
    pub bg_color: Option<String>,
    pub quality: Quality,
    pub format: Format,
}

impl OptimizationOptions {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}
