//! Fluent URL builder
//!
//! ```
//! use karasu_url::{BuilderConfig, ImgProxy, Size};
//!
//! let mut proxy = ImgProxy::new(BuilderConfig::new("https://images.test.com")).unwrap();
//! let url = proxy
//!     .size(Size { width: 40, height: 40, enlarge: true, extend: false })
//!     .background("ffffff")
//!     .build("https://example.com/cat.jpg")
//!     .unwrap();
//! assert!(url.starts_with("https://images.test.com/insecure/size:40:40:true:false/bg:ffffff/"));
//! ```

use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::error::BuilderError;
use crate::options::{
    Adjust, Color, Crop, Extend, GifOptions, Gravity, JpegOptions, OptionSet, OptionValue,
    Padding, PngOptions, Resize, ResizingAlgorithm, ResizingType, Size, Trim, Watermark,
};
use crate::signing::{base64_url_encode, UrlSigner};
use crate::store::OptionStore;

/// Path segment used in place of a signature when signing is not configured
pub const INSECURE_SIGNATURE: &str = "insecure";

/// Preset seeded at construction when preset-only mode is enabled
pub const DEFAULT_PRESET: &str = "default";

/// Builds (and optionally signs) proxy URLs from accumulated options
#[derive(Debug, Clone)]
pub struct ImgProxy {
    base_url: String,
    signer: Option<UrlSigner>,
    autoreset: bool,
    preset_only: bool,
    store: OptionStore,
}

impl ImgProxy {
    /// Create a builder, applying `config.options` if present.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for an empty URL, malformed hex key/salt, or an
    /// options value that is not an object.
    pub fn new(config: BuilderConfig) -> Result<Self, BuilderError> {
        config.validate()?;

        let signer = match config.signing_pair() {
            Some((key, salt)) => Some(UrlSigner::from_hex(key, salt)?),
            None => {
                if config.key.is_some() || config.salt.is_some() {
                    warn!("signing needs both key and salt; building unsigned URLs");
                }
                None
            }
        };

        let mut proxy = Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            signer,
            autoreset: config.autoreset,
            preset_only: config.preset_only,
            store: OptionStore::new(),
        };

        if proxy.preset_only {
            proxy.set_option("preset", DEFAULT_PRESET);
        }

        if let Some(options) = &config.options {
            proxy.set_options(&OptionSet::from_json(options)?);
        }

        debug!(
            url = %proxy.base_url,
            signed = proxy.signer.is_some(),
            autoreset = proxy.autoreset,
            preset_only = proxy.preset_only,
            "builder created"
        );

        Ok(proxy)
    }

    /// Create a builder and apply `options` after any configured ones
    pub fn with_options(config: BuilderConfig, options: &OptionSet) -> Result<Self, BuilderError> {
        let mut proxy = Self::new(config)?;
        proxy.set_options(options);
        Ok(proxy)
    }

    pub fn set_autoreset(&mut self, autoreset: bool) -> &mut Self {
        self.autoreset = autoreset;
        self
    }

    pub fn is_signed(&self) -> bool {
        self.signer.is_some()
    }

    pub fn is_preset_only(&self) -> bool {
        self.preset_only
    }

    /// Read-only access to the option store
    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    // === Generic accessors ===

    /// Set any option by canonical name. `OptionValue::Absent` (or `None`)
    /// removes it. Unknown names are emitted verbatim.
    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.store.set(name, &value.into());
        self
    }

    /// Last positional field of an option's value (lossy for multi-field values)
    pub fn get_option(&self, name: &str) -> Option<&str> {
        self.store.get(name)
    }

    /// Full serialized value of an option
    pub fn get_option_value(&self, name: &str) -> Option<&str> {
        self.store.get_value(name)
    }

    pub fn reset_option(&mut self, name: &str) -> &mut Self {
        self.store.remove(name);
        self
    }

    pub fn set_options(&mut self, options: &OptionSet) -> &mut Self {
        self.store.apply(options);
        self
    }

    /// Replace the default baseline and apply it immediately
    pub fn set_default_options(&mut self, options: OptionSet) -> &mut Self {
        self.store.set_defaults(options);
        self
    }

    pub fn reset_default_options(&mut self) -> &mut Self {
        self.store.clear_defaults();
        self
    }

    /// Clear all options and re-apply the default baseline
    pub fn reset_options(&mut self) -> &mut Self {
        self.store.reset();
        self
    }

    // === Typed setters ===

    pub fn resize(&mut self, resize: Resize) -> &mut Self {
        self.set_option("resize", resize)
    }

    pub fn size(&mut self, size: Size) -> &mut Self {
        self.set_option("size", size)
    }

    pub fn crop(&mut self, crop: Crop) -> &mut Self {
        self.set_option("crop", crop)
    }

    pub fn extend(&mut self, extend: Extend) -> &mut Self {
        self.set_option("extend", extend)
    }

    pub fn trim(&mut self, trim: Trim) -> &mut Self {
        self.set_option("trim", trim)
    }

    pub fn padding(&mut self, padding: Padding) -> &mut Self {
        self.set_option("padding", padding)
    }

    pub fn adjust(&mut self, adjust: Adjust) -> &mut Self {
        self.set_option("adjust", adjust)
    }

    pub fn gravity(&mut self, gravity: impl Into<Gravity>) -> &mut Self {
        let gravity: Gravity = gravity.into();
        self.set_option("gravity", gravity)
    }

    pub fn resizing_type(&mut self, resizing_type: ResizingType) -> &mut Self {
        self.set_option("resizing_type", resizing_type.as_str())
    }

    pub fn resizing_algorithm(&mut self, algorithm: ResizingAlgorithm) -> &mut Self {
        self.set_option("resizing_algorithm", algorithm.as_str())
    }

    pub fn width(&mut self, width: u32) -> &mut Self {
        self.set_option("width", width)
    }

    pub fn height(&mut self, height: u32) -> &mut Self {
        self.set_option("height", height)
    }

    /// Device pixel ratio; non-positive or non-finite values are ignored
    pub fn dpr(&mut self, dpr: f64) -> &mut Self {
        if dpr.is_finite() && dpr > 0.0 {
            self.set_option("dpr", dpr);
        }
        self
    }

    pub fn max_bytes(&mut self, max_bytes: u32) -> &mut Self {
        self.set_option("max_bytes", max_bytes)
    }

    pub fn enlarge(&mut self, enlarge: bool) -> &mut Self {
        self.set_option("enlarge", enlarge)
    }

    pub fn quality(&mut self, quality: u8) -> &mut Self {
        self.set_option("quality", quality)
    }

    pub fn background(&mut self, color: impl Into<Color>) -> &mut Self {
        let color: Color = color.into();
        self.set_option("background", color)
    }

    pub fn background_alpha(&mut self, alpha: f64) -> &mut Self {
        self.set_option("background_alpha", alpha)
    }

    pub fn blur(&mut self, sigma: f64) -> &mut Self {
        self.set_option("blur", sigma)
    }

    pub fn saturation(&mut self, saturation: f64) -> &mut Self {
        self.set_option("saturation", saturation)
    }

    pub fn contrast(&mut self, contrast: f64) -> &mut Self {
        self.set_option("contrast", contrast)
    }

    pub fn brightness(&mut self, brightness: i32) -> &mut Self {
        self.set_option("brightness", brightness)
    }

    pub fn sharpen(&mut self, sigma: f64) -> &mut Self {
        self.set_option("sharpen", sigma)
    }

    pub fn pixelate(&mut self, size: u32) -> &mut Self {
        self.set_option("pixelate", size)
    }

    pub fn watermark(&mut self, watermark: Watermark) -> &mut Self {
        self.set_option("watermark", watermark)
    }

    /// Custom watermark image; the URL is base64url-encoded as the proxy expects
    pub fn watermark_url(&mut self, url: &str) -> &mut Self {
        self.set_option("watermark_url", base64_url_encode(url.as_bytes()))
    }

    /// One or more presets, applied by the proxy in the given order
    pub fn preset<I, S>(&mut self, presets: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let presets: Vec<String> = presets.into_iter().map(Into::into).collect();
        self.set_option("preset", OptionValue::Presets(presets))
    }

    pub fn cache_buster(&mut self, value: &str) -> &mut Self {
        self.set_option("cachebuster", value)
    }

    pub fn format(&mut self, extension: &str) -> &mut Self {
        self.set_option("format", extension)
    }

    pub fn filename(&mut self, filename: &str) -> &mut Self {
        self.set_option("filename", filename)
    }

    pub fn rotate(&mut self, degrees: u16) -> &mut Self {
        self.set_option("rotate", degrees)
    }

    pub fn auto_rotate(&mut self, auto_rotate: bool) -> &mut Self {
        self.set_option("auto_rotate", auto_rotate)
    }

    pub fn style(&mut self, style: &str) -> &mut Self {
        self.set_option("style", style)
    }

    pub fn page(&mut self, page: u32) -> &mut Self {
        self.set_option("page", page)
    }

    pub fn video_thumbnail_second(&mut self, second: u32) -> &mut Self {
        self.set_option("video_thumbnail_second", second)
    }

    pub fn strip_metadata(&mut self, strip: bool) -> &mut Self {
        self.set_option("strip_metadata", strip)
    }

    pub fn strip_color_profile(&mut self, strip: bool) -> &mut Self {
        self.set_option("strip_color_profile", strip)
    }

    pub fn jpeg_options(&mut self, options: JpegOptions) -> &mut Self {
        self.set_option("jpeg_options", options)
    }

    pub fn png_options(&mut self, options: PngOptions) -> &mut Self {
        self.set_option("png_options", options)
    }

    pub fn gif_options(&mut self, options: GifOptions) -> &mut Self {
        self.set_option("gif_options", options)
    }

    // === URL assembly ===

    /// Options part of the path, without surrounding slashes
    fn options_path(&self) -> String {
        if self.preset_only {
            // Only preset names are accepted, and without the `pr:` key
            return self.store.get_value("preset").unwrap_or_default().to_string();
        }

        self.store.segments().collect::<Vec<_>>().join("/")
    }

    /// Path for `image`, starting with `/`; this is the signed message
    pub fn path(&self, image: &str) -> Result<String, BuilderError> {
        if image.is_empty() {
            return Err(BuilderError::MissingParameter("image"));
        }

        let encoded = base64_url_encode(image.as_bytes());
        let options = self.options_path();

        Ok(if options.is_empty() {
            format!("/{}", encoded)
        } else {
            format!("/{}/{}", options, encoded)
        })
    }

    /// Build the final URL for `image`.
    ///
    /// With autoreset enabled the options fall back to the default baseline
    /// afterwards.
    ///
    /// # Errors
    ///
    /// `MissingParameter` when `image` is empty.
    pub fn build(&mut self, image: &str) -> Result<String, BuilderError> {
        let path = self.path(image)?;

        let signature = match &self.signer {
            Some(signer) => signer.sign(&path),
            None => INSECURE_SIGNATURE.to_string(),
        };
        let url = format!("{}/{}{}", self.base_url, signature, path);

        debug!(
            signed = self.signer.is_some(),
            preset_only = self.preset_only,
            segments = self.store.len(),
            "url built"
        );

        if self.autoreset {
            self.store.reset();
        }

        Ok(url)
    }
}
