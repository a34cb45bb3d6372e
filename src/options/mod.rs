//! Transformation options and their wire encoding
//!
//! An option is identified by its canonical long name (`resizing_algorithm`)
//! and emitted under its short wire key (`ra`). Values are held as a tagged
//! [`OptionValue`] and serialized by the table in [`OptionKind`].

pub mod serialize;
pub mod set;
pub mod types;

use serde_json::Value;

use crate::error::BuilderError;

pub use serialize::WireFormat;
pub use set::OptionSet;
pub use types::{
    Adjust, Color, Crop, Extend, GifOptions, Gravity, GravityType, JpegOptions, Padding,
    PngOptions, Resize, ResizingAlgorithm, ResizingType, RgbColor, Size, Trim, Watermark,
    WatermarkPosition,
};

/// Short wire key for a canonical option name.
///
/// Returns `None` for names without an abbreviation; those are emitted as-is.
pub fn abbreviation(name: &str) -> Option<&'static str> {
    let key = match name {
        "resize" => "rs",
        "size" => "size",
        "resizing_type" => "rt",
        "resizing_algorithm" => "ra",
        "width" => "w",
        "height" => "h",
        "enlarge" => "el",
        "extend" => "ex",
        "gravity" => "g",
        "crop" => "c",
        "padding" => "pd",
        "trim" => "t",
        "quality" => "q",
        "max_bytes" => "mb",
        "background" => "bg",
        "adjust" => "a",
        "brightness" => "br",
        "contrast" => "co",
        "saturation" => "sa",
        "blur" => "bl",
        "sharpen" => "sh",
        "pixelate" => "pix",
        "unsharpening" => "ush",
        "watermark" => "wm",
        "watermark_url" => "wmu",
        "video_thumbnail_second" => "vts",
        "style" => "st",
        "jpeg_options" => "jpgo",
        "png_options" => "pngo",
        "gif_options" => "gifo",
        "preset" => "pr",
        "cachebuster" => "cb",
        "strip_metadata" => "sm",
        "strip_color_profile" => "scp",
        "auto_rotate" => "ar",
        "rotate" => "rot",
        "filename" => "fn",
        "format" => "ext",
        _ => return None,
    };
    Some(key)
}

/// Wire key for `name`, falling back to the name itself
pub fn wire_key(name: &str) -> &str {
    abbreviation(name).unwrap_or(name)
}

/// Serializer category of an option name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Resize,
    Size,
    Extend,
    Gravity,
    Crop,
    Padding,
    Background,
    Trim,
    Adjust,
    Watermark,
    JpegOptions,
    PngOptions,
    GifOptions,
    Preset,
    /// Plain value, stringified as-is
    Scalar,
}

impl OptionKind {
    pub fn of(name: &str) -> Self {
        match name {
            "resize" => OptionKind::Resize,
            "size" => OptionKind::Size,
            "extend" => OptionKind::Extend,
            "gravity" => OptionKind::Gravity,
            "crop" => OptionKind::Crop,
            "padding" => OptionKind::Padding,
            "background" => OptionKind::Background,
            "trim" => OptionKind::Trim,
            "adjust" => OptionKind::Adjust,
            "watermark" => OptionKind::Watermark,
            "jpeg_options" => OptionKind::JpegOptions,
            "png_options" => OptionKind::PngOptions,
            "gif_options" => OptionKind::GifOptions,
            "preset" => OptionKind::Preset,
            _ => OptionKind::Scalar,
        }
    }
}

/// A single option input before serialization
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Removes the option instead of setting it
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Presets(Vec<String>),
    Resize(Resize),
    Size(Size),
    Extend(Extend),
    Gravity(Gravity),
    Crop(Crop),
    Padding(Padding),
    Color(Color),
    Trim(Trim),
    Adjust(Adjust),
    Watermark(Watermark),
    JpegOptions(JpegOptions),
    PngOptions(PngOptions),
    GifOptions(GifOptions),
}

impl OptionValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, OptionValue::Absent)
    }

    /// Check that the value can be written for the option called `name`.
    ///
    /// Non-finite floats are rejected, as are bare numbers and booleans for
    /// structured options. Padding and trim accept a single number, matching
    /// their JSON shorthand.
    pub fn validate(&self, name: &str) -> Result<(), BuilderError> {
        if let OptionValue::Float(n) = self {
            if !n.is_finite() {
                return Err(BuilderError::invalid_config(format!(
                    "option '{}' must be a finite number, got {}",
                    name, n
                )));
            }
        }

        let bare = match self {
            OptionValue::Bool(_) => true,
            OptionValue::Integer(_) | OptionValue::Float(_) => !matches!(
                OptionKind::of(name),
                OptionKind::Padding | OptionKind::Trim
            ),
            _ => false,
        };
        if bare && OptionKind::of(name) != OptionKind::Scalar {
            return Err(BuilderError::invalid_config(format!(
                "option '{}' expects a structured value",
                name
            )));
        }

        Ok(())
    }

    /// Serialize the value for the option called `name`.
    ///
    /// Structured variants use their own encoder. Text is routed through the
    /// serializer of the named option, so `background: "#fff"` loses its `#`.
    pub fn to_wire(&self, name: &str) -> String {
        match self {
            OptionValue::Absent => String::new(),
            OptionValue::Text(text) => match OptionKind::of(name) {
                OptionKind::Background => serialize::hex_color(text),
                _ => serialize::escape_segment(text),
            },
            OptionValue::Integer(n) => n.to_string(),
            OptionValue::Float(n) => n.to_string(),
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Presets(names) => names
                .iter()
                .map(|preset| serialize::escape_segment(preset))
                .collect::<Vec<_>>()
                .join(":"),
            OptionValue::Resize(v) => v.to_wire(),
            OptionValue::Size(v) => v.to_wire(),
            OptionValue::Extend(v) => v.to_wire(),
            OptionValue::Gravity(v) => v.to_wire(),
            OptionValue::Crop(v) => v.to_wire(),
            OptionValue::Padding(v) => v.to_wire(),
            OptionValue::Color(v) => v.to_wire(),
            OptionValue::Trim(v) => v.to_wire(),
            OptionValue::Adjust(v) => v.to_wire(),
            OptionValue::Watermark(v) => v.to_wire(),
            OptionValue::JpegOptions(v) => v.to_wire(),
            OptionValue::PngOptions(v) => v.to_wire(),
            OptionValue::GifOptions(v) => v.to_wire(),
        }
    }

    /// Convert a JSON value for the option called `name`.
    ///
    /// `null` maps to [`OptionValue::Absent`]. Structured options are decoded
    /// into their descriptor; a shape mismatch is an `InvalidConfiguration`.
    pub fn from_json(name: &str, value: &Value) -> Result<Self, BuilderError> {
        if value.is_null() {
            return Ok(OptionValue::Absent);
        }

        let structured = |err: serde_json::Error| {
            BuilderError::invalid_config(format!("option '{}': {}", name, err))
        };

        let parsed = match OptionKind::of(name) {
            OptionKind::Resize => {
                OptionValue::Resize(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::Size => {
                OptionValue::Size(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::Extend => {
                OptionValue::Extend(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::Gravity => match value {
                Value::String(code) => OptionValue::Gravity(code.parse::<GravityType>()?.into()),
                _ => OptionValue::Gravity(
                    serde_json::from_value(value.clone()).map_err(structured)?,
                ),
            },
            OptionKind::Crop => {
                OptionValue::Crop(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::Padding => match value {
                Value::Number(_) => OptionValue::Padding(Padding::uniform(
                    serde_json::from_value(value.clone()).map_err(structured)?,
                )),
                _ => OptionValue::Padding(
                    serde_json::from_value(value.clone()).map_err(structured)?,
                ),
            },
            OptionKind::Background => {
                OptionValue::Color(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::Trim => match value {
                Value::Number(_) => OptionValue::Trim(Trim {
                    threshold: serde_json::from_value(value.clone()).map_err(structured)?,
                    ..Default::default()
                }),
                _ => OptionValue::Trim(serde_json::from_value(value.clone()).map_err(structured)?),
            },
            OptionKind::Adjust => {
                OptionValue::Adjust(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::Watermark => {
                OptionValue::Watermark(serde_json::from_value(value.clone()).map_err(structured)?)
            }
            OptionKind::JpegOptions => OptionValue::JpegOptions(
                serde_json::from_value(value.clone()).map_err(structured)?,
            ),
            OptionKind::PngOptions => OptionValue::PngOptions(
                serde_json::from_value(value.clone()).map_err(structured)?,
            ),
            OptionKind::GifOptions => OptionValue::GifOptions(
                serde_json::from_value(value.clone()).map_err(structured)?,
            ),
            OptionKind::Preset => match value {
                Value::Array(_) => {
                    OptionValue::Presets(serde_json::from_value(value.clone()).map_err(structured)?)
                }
                Value::String(preset) => OptionValue::Presets(vec![preset.clone()]),
                _ => {
                    return Err(BuilderError::invalid_config(format!(
                        "option '{}' expects a preset name or a list of names",
                        name
                    )))
                }
            },
            OptionKind::Scalar => Self::scalar_from_json(name, value)?,
        };

        Ok(parsed)
    }

    fn scalar_from_json(name: &str, value: &Value) -> Result<Self, BuilderError> {
        match value {
            Value::String(text) => Ok(OptionValue::Text(text.clone())),
            Value::Bool(b) => Ok(OptionValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(int) => Ok(OptionValue::Integer(int)),
                None => Ok(OptionValue::Float(n.as_f64().unwrap_or_default())),
            },
            _ => Err(BuilderError::invalid_config(format!(
                "option '{}' expects a scalar value",
                name
            ))),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::Text(text)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Float(n)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::Absent, Into::into)
    }
}

macro_rules! integer_option_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(n: $ty) -> Self {
                    OptionValue::Integer(i64::from(n))
                }
            }
        )*
    };
}

integer_option_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! structured_option_value {
    ($($ty:ident => $variant:ident),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue::$variant(value)
                }
            }
        )*
    };
}

structured_option_value!(
    Resize => Resize,
    Size => Size,
    Extend => Extend,
    Gravity => Gravity,
    Crop => Crop,
    Padding => Padding,
    Color => Color,
    Trim => Trim,
    Adjust => Adjust,
    Watermark => Watermark,
    JpegOptions => JpegOptions,
    PngOptions => PngOptions,
    GifOptions => GifOptions
);

impl From<RgbColor> for OptionValue {
    fn from(rgb: RgbColor) -> Self {
        OptionValue::Color(rgb.into())
    }
}

impl From<GravityType> for OptionValue {
    fn from(gravity_type: GravityType) -> Self {
        OptionValue::Gravity(gravity_type.into())
    }
}
