//! Structured option descriptors
//!
//! Each struct mirrors one positional directive of the proxy URL scheme.
//! Field order matches the wire order; see `serialize.rs` for the encoding.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// How the proxy fits the source into the requested box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizingType {
    #[default]
    Fit,
    Fill,
    FillDown,
    Force,
    Auto,
}

impl ResizingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::FillDown => "fill-down",
            Self::Force => "force",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for ResizingType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(ResizingType::Fit),
            "fill" => Ok(ResizingType::Fill),
            "fill-down" | "fill_down" => Ok(ResizingType::FillDown),
            "force" => Ok(ResizingType::Force),
            "auto" => Ok(ResizingType::Auto),
            _ => Err(BuilderError::invalid_config(format!(
                "unknown resizing type: {}",
                s
            ))),
        }
    }
}

/// Interpolation used by the proxy when scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizingAlgorithm {
    Nearest,
    Linear,
    Cubic,
    Lanczos2,
    Lanczos3,
}

impl ResizingAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
            Self::Lanczos2 => "lanczos2",
            Self::Lanczos3 => "lanczos3",
        }
    }
}

impl FromStr for ResizingAlgorithm {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(ResizingAlgorithm::Nearest),
            "linear" => Ok(ResizingAlgorithm::Linear),
            "cubic" => Ok(ResizingAlgorithm::Cubic),
            "lanczos2" => Ok(ResizingAlgorithm::Lanczos2),
            "lanczos3" => Ok(ResizingAlgorithm::Lanczos3),
            _ => Err(BuilderError::invalid_config(format!(
                "unknown resizing algorithm: {}",
                s
            ))),
        }
    }
}

/// Gravity/anchor point, serialized with the proxy's short codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityType {
    #[serde(rename = "no", alias = "north")]
    North,
    #[serde(rename = "so", alias = "south")]
    South,
    #[serde(rename = "ea", alias = "east")]
    East,
    #[serde(rename = "we", alias = "west")]
    West,
    #[serde(rename = "noea", alias = "northeast")]
    NorthEast,
    #[serde(rename = "nowe", alias = "northwest")]
    NorthWest,
    #[serde(rename = "soea", alias = "southeast")]
    SouthEast,
    #[serde(rename = "sowe", alias = "southwest")]
    SouthWest,
    #[default]
    #[serde(rename = "ce", alias = "center")]
    Center,
    /// Content-aware smart gravity
    #[serde(rename = "sm", alias = "smart")]
    Smart,
    /// Focus point; offsets are relative coordinates in 0..=1
    #[serde(rename = "fp", alias = "focus_point")]
    FocusPoint,
}

impl GravityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "no",
            Self::South => "so",
            Self::East => "ea",
            Self::West => "we",
            Self::NorthEast => "noea",
            Self::NorthWest => "nowe",
            Self::SouthEast => "soea",
            Self::SouthWest => "sowe",
            Self::Center => "ce",
            Self::Smart => "sm",
            Self::FocusPoint => "fp",
        }
    }
}

impl FromStr for GravityType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no" | "north" => Ok(GravityType::North),
            "so" | "south" => Ok(GravityType::South),
            "ea" | "east" => Ok(GravityType::East),
            "we" | "west" => Ok(GravityType::West),
            "noea" | "northeast" => Ok(GravityType::NorthEast),
            "nowe" | "northwest" => Ok(GravityType::NorthWest),
            "soea" | "southeast" => Ok(GravityType::SouthEast),
            "sowe" | "southwest" => Ok(GravityType::SouthWest),
            "ce" | "center" => Ok(GravityType::Center),
            "sm" | "smart" => Ok(GravityType::Smart),
            "fp" | "focus_point" => Ok(GravityType::FocusPoint),
            _ => Err(BuilderError::invalid_config(format!(
                "unknown gravity: {}",
                s
            ))),
        }
    }
}

/// `g:%type:%x_offset:%y_offset`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gravity {
    #[serde(rename = "type")]
    pub gravity_type: GravityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
}

impl Gravity {
    pub fn with_offsets(gravity_type: GravityType, x_offset: f64, y_offset: f64) -> Self {
        Self {
            gravity_type,
            x_offset: Some(x_offset),
            y_offset: Some(y_offset),
        }
    }

    pub fn focus_point(x: f64, y: f64) -> Self {
        Self::with_offsets(GravityType::FocusPoint, x, y)
    }
}

impl From<GravityType> for Gravity {
    fn from(gravity_type: GravityType) -> Self {
        Self {
            gravity_type,
            x_offset: None,
            y_offset: None,
        }
    }
}

/// `rs:%resizing_type:%width:%height:%enlarge:%extend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resize {
    #[serde(rename = "type", alias = "resizing_type")]
    pub resizing_type: ResizingType,
    pub width: u32,
    pub height: u32,
    pub enlarge: bool,
    pub extend: bool,
}

/// `size:%width:%height:%enlarge:%extend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
    pub enlarge: bool,
    pub extend: bool,
}

/// `ex:%extend:%gravity`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extend {
    #[serde(default)]
    pub extend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Gravity>,
}

/// `c:%width:%height:%gravity`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Crop {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Gravity>,
}

/// `pd:%top:%right:%bottom:%left`
///
/// The proxy mirrors missing sides CSS-style, so trailing sides may be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default)]
    pub top: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<u32>,
}

impl Padding {
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            ..Default::default()
        }
    }

    pub fn sides(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        }
    }
}

/// Red/green/blue triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color given either as an RGB triplet or a hex string (`#` optional)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Rgb(RgbColor),
    Hex(String),
}

impl From<RgbColor> for Color {
    fn from(rgb: RgbColor) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<&str> for Color {
    fn from(hex: &str) -> Self {
        Color::Hex(hex.to_string())
    }
}

impl From<String> for Color {
    fn from(hex: String) -> Self {
        Color::Hex(hex)
    }
}

/// `t:%threshold:%color:%equal_hor:%equal_ver`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trim {
    #[serde(default)]
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal_hor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal_ver: Option<bool>,
}

/// `a:%brightness:%contrast:%saturation`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjust {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
}

/// Watermark placement; `Replicate` tiles it across the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WatermarkPosition {
    #[default]
    #[serde(rename = "ce", alias = "center")]
    Center,
    #[serde(rename = "no", alias = "north")]
    North,
    #[serde(rename = "so", alias = "south")]
    South,
    #[serde(rename = "ea", alias = "east")]
    East,
    #[serde(rename = "we", alias = "west")]
    West,
    #[serde(rename = "noea", alias = "northeast")]
    NorthEast,
    #[serde(rename = "nowe", alias = "northwest")]
    NorthWest,
    #[serde(rename = "soea", alias = "southeast")]
    SouthEast,
    #[serde(rename = "sowe", alias = "southwest")]
    SouthWest,
    #[serde(rename = "re", alias = "replicate")]
    Replicate,
}

impl WatermarkPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "ce",
            Self::North => "no",
            Self::South => "so",
            Self::East => "ea",
            Self::West => "we",
            Self::NorthEast => "noea",
            Self::NorthWest => "nowe",
            Self::SouthEast => "soea",
            Self::SouthWest => "sowe",
            Self::Replicate => "re",
        }
    }
}

/// `wm:%opacity:%position:%x_offset:%y_offset:%scale`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Watermark {
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WatermarkPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// `jpgo:%progressive:%no_subsample:%trellis_quant:%overshoot_deringing:%optimize_scans:%quant_table`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegOptions {
    pub progressive: Option<bool>,
    pub no_subsample: Option<bool>,
    pub trellis_quant: Option<bool>,
    pub overshoot_deringing: Option<bool>,
    pub optimize_scans: Option<bool>,
    pub quant_table: Option<u8>,
}

/// `pngo:%interlaced:%quantize:%quantization_colors`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PngOptions {
    pub interlaced: Option<bool>,
    pub quantize: Option<bool>,
    pub quantization_colors: Option<u16>,
}

/// `gifo:%optimize_frames:%optimize_transparency`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GifOptions {
    pub optimize_frames: Option<bool>,
    pub optimize_transparency: Option<bool>,
}
