//! Wire-format serializers for structured options
//!
//! Every serializer yields the colon-delimited argument list that follows the
//! option key, e.g. `40:40:true:false` for a `size` directive.

use super::types::{
    Adjust, Color, Crop, Extend, GifOptions, Gravity, JpegOptions, Padding, PngOptions, Resize,
    RgbColor, Size, Trim, Watermark,
};

/// Encoding of a value into the proxy's positional argument syntax
pub trait WireFormat {
    fn to_wire(&self) -> String;
}

/// Join positional arguments, dropping absent trailing ones.
///
/// Absent arguments in the middle become empty tokens so later positions keep
/// their meaning (`10::true` leaves the second argument at its proxy default).
pub(crate) fn positional(args: &[Option<String>]) -> String {
    let used = args
        .iter()
        .rposition(Option::is_some)
        .map_or(0, |last| last + 1);

    args[..used]
        .iter()
        .map(|arg| arg.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(":")
}

/// Escape path separators in free-form text so one option stays one segment
pub(crate) fn escape_segment(text: &str) -> String {
    text.replace('/', "%2F")
}

/// Hex color in wire form: no leading `#`
pub(crate) fn hex_color(text: &str) -> String {
    escape_segment(text.strip_prefix('#').unwrap_or(text))
}

fn opt<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

impl WireFormat for Gravity {
    fn to_wire(&self) -> String {
        positional(&[
            Some(self.gravity_type.as_str().to_string()),
            opt(self.x_offset),
            opt(self.y_offset),
        ])
    }
}

impl WireFormat for Resize {
    fn to_wire(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.resizing_type.as_str(),
            self.width,
            self.height,
            self.enlarge,
            self.extend
        )
    }
}

impl WireFormat for Size {
    fn to_wire(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.width, self.height, self.enlarge, self.extend
        )
    }
}

impl WireFormat for Extend {
    fn to_wire(&self) -> String {
        match &self.gravity {
            Some(gravity) => format!("{}:{}", self.extend, gravity.to_wire()),
            None => self.extend.to_string(),
        }
    }
}

impl WireFormat for Crop {
    fn to_wire(&self) -> String {
        match &self.gravity {
            Some(gravity) => format!("{}:{}:{}", self.width, self.height, gravity.to_wire()),
            None => format!("{}:{}", self.width, self.height),
        }
    }
}

impl WireFormat for Padding {
    fn to_wire(&self) -> String {
        positional(&[
            Some(self.top.to_string()),
            opt(self.right),
            opt(self.bottom),
            opt(self.left),
        ])
    }
}

impl WireFormat for RgbColor {
    fn to_wire(&self) -> String {
        format!("{}:{}:{}", self.r, self.g, self.b)
    }
}

impl WireFormat for Color {
    fn to_wire(&self) -> String {
        match self {
            Color::Rgb(rgb) => rgb.to_wire(),
            Color::Hex(hex) => hex_color(hex),
        }
    }
}

impl WireFormat for Trim {
    fn to_wire(&self) -> String {
        positional(&[
            Some(self.threshold.to_string()),
            self.color.as_ref().map(|color| match color {
                // Trim only takes a hex color argument
                Color::Rgb(rgb) => format!("{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b),
                Color::Hex(hex) => hex_color(hex),
            }),
            opt(self.equal_hor),
            opt(self.equal_ver),
        ])
    }
}

impl WireFormat for Adjust {
    fn to_wire(&self) -> String {
        positional(&[
            opt(self.brightness),
            opt(self.contrast),
            opt(self.saturation),
        ])
    }
}

impl WireFormat for Watermark {
    fn to_wire(&self) -> String {
        positional(&[
            Some(self.opacity.to_string()),
            self.position.map(|p| p.as_str().to_string()),
            opt(self.x_offset),
            opt(self.y_offset),
            opt(self.scale),
        ])
    }
}

impl WireFormat for JpegOptions {
    fn to_wire(&self) -> String {
        positional(&[
            opt(self.progressive),
            opt(self.no_subsample),
            opt(self.trellis_quant),
            opt(self.overshoot_deringing),
            opt(self.optimize_scans),
            opt(self.quant_table),
        ])
    }
}

impl WireFormat for PngOptions {
    fn to_wire(&self) -> String {
        positional(&[
            opt(self.interlaced),
            opt(self.quantize),
            opt(self.quantization_colors),
        ])
    }
}

impl WireFormat for GifOptions {
    fn to_wire(&self) -> String {
        positional(&[opt(self.optimize_frames), opt(self.optimize_transparency)])
    }
}
