// URL assembly tests: option ordering, serialization and preset-only mode

use karasu_url::signing::base64_url_encode;
use karasu_url::{
    Adjust, BuilderConfig, BuilderError, Color, Crop, Extend, GifOptions, Gravity, GravityType,
    ImgProxy, JpegOptions, OptionSet, OptionValue, Padding, PngOptions, Resize,
    ResizingAlgorithm, ResizingType, RgbColor, Size, Trim, Watermark, WatermarkPosition,
};
use serde_json::json;

const BASE: &str = "https://images.test.com";
const IMAGE: &str =
    "https://upload.wikimedia.org/wikipedia/commons/f/ff/Wikipedia_logo_593.jpg";

fn encoded() -> String {
    base64_url_encode(IMAGE.as_bytes())
}

fn unsigned() -> ImgProxy {
    ImgProxy::new(BuilderConfig::new(BASE)).expect("valid config")
}

fn size_40() -> Size {
    Size {
        width: 40,
        height: 40,
        enlarge: true,
        extend: false,
    }
}

#[test]
fn test_without_options() {
    let url = unsigned().build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/{}", BASE, encoded()));
}

#[test]
fn test_encoded_source_is_url_safe_without_padding() {
    let encoded = encoded();
    assert_eq!(
        encoded,
        "aHR0cHM6Ly91cGxvYWQud2lraW1lZGlhLm9yZy93aWtpcGVkaWEvY29tbW9ucy9mL2ZmL1dpa2lwZWRpYV9sb2dvXzU5My5qcGc"
    );
    assert!(!encoded.contains('='));
    assert!(!encoded.contains('+'));
    assert!(!encoded.contains('/'));
}

#[test]
fn test_with_initial_options() {
    let config = BuilderConfig::new(BASE);
    let options = OptionSet::from_json(&json!({
        "size": {"width": 40, "height": 40, "enlarge": true, "extend": false},
        "background": "ffffff",
    }))
    .unwrap();

    let url = ImgProxy::with_options(config, &options)
        .unwrap()
        .build(IMAGE)
        .unwrap();
    assert_eq!(
        url,
        format!("{}/insecure/size:40:40:true:false/bg:ffffff/{}", BASE, encoded())
    );
}

#[test]
fn test_with_methods() {
    let mut proxy = unsigned();
    proxy.size(size_40()).background("ffffff");

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(
        url,
        format!("{}/insecure/size:40:40:true:false/bg:ffffff/{}", BASE, encoded())
    );
}

#[test]
fn test_with_methods_reset_option() {
    let mut proxy = unsigned();
    proxy
        .size(size_40())
        .background("#ffffff")
        .reset_option("size");

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/bg:ffffff/{}", BASE, encoded()));
}

#[test]
fn test_reset_option_with_abbreviated_wire_key() {
    // `resizing_algorithm` is emitted as `ra`; reset goes by the canonical name
    let mut proxy = unsigned();
    proxy
        .resizing_algorithm(ResizingAlgorithm::Lanczos3)
        .quality(80)
        .reset_option("resizing_algorithm");

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/q:80/{}", BASE, encoded()));
}

#[test]
fn test_segments_follow_call_order() {
    let mut proxy = unsigned();
    proxy
        .quality(75)
        .resizing_type(ResizingType::Fill)
        .width(300)
        .height(200)
        .gravity(GravityType::Smart)
        .format("webp");

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(
        url,
        format!(
            "{}/insecure/q:75/rt:fill/w:300/h:200/g:sm/ext:webp/{}",
            BASE,
            encoded()
        )
    );
}

#[test]
fn test_overwrite_keeps_first_position() {
    let mut proxy = unsigned();
    proxy.width(100).height(100).width(250);

    let url = proxy.build(IMAGE).unwrap();
    assert!(url.contains("/w:250/h:100/"), "got {}", url);
}

#[test]
fn test_structured_setters() {
    let mut proxy = unsigned();
    proxy
        .crop(Crop {
            width: 100,
            height: 80,
            gravity: Some(Gravity::focus_point(0.25, 0.75)),
        })
        .padding(Padding::sides(10, 0, 10, 0))
        .adjust(Adjust {
            brightness: Some(20),
            contrast: Some(1.2),
            saturation: None,
        })
        .watermark(Watermark {
            opacity: 0.8,
            position: Some(WatermarkPosition::Replicate),
            ..Default::default()
        })
        .background(RgbColor { r: 0, g: 128, b: 255 });

    let url = proxy.build(IMAGE).unwrap();
    assert!(url.contains(
        "/c:100:80:fp:0.25:0.75/pd:10:0:10:0/a:20:1.2/wm:0.8:re/bg:0:128:255/"
    ));
}

#[test]
fn test_scalar_setters_use_abbreviations() {
    let mut proxy = unsigned();
    proxy
        .blur(2.5)
        .sharpen(0.7)
        .pixelate(4)
        .brightness(-10)
        .contrast(1.1)
        .saturation(0.9)
        .enlarge(true)
        .auto_rotate(false)
        .rotate(90)
        .strip_metadata(true)
        .strip_color_profile(true)
        .max_bytes(50_000)
        .cache_buster("v2")
        .filename("cat")
        .video_thumbnail_second(3);

    let segments: Vec<String> = proxy.store().segments().collect();
    assert_eq!(
        segments,
        vec![
            "bl:2.5", "sh:0.7", "pix:4", "br:-10", "co:1.1", "sa:0.9", "el:true", "ar:false",
            "rot:90", "sm:true", "scp:true", "mb:50000", "cb:v2", "fn:cat", "vts:3",
        ]
    );
}

#[test]
fn test_structured_setters_use_abbreviations() {
    let mut proxy = unsigned();
    proxy
        .resize(Resize {
            resizing_type: ResizingType::Fit,
            width: 300,
            height: 200,
            enlarge: false,
            extend: true,
        })
        .extend(Extend {
            extend: true,
            gravity: Some(GravityType::North.into()),
        })
        .trim(Trim {
            threshold: 10.0,
            color: Some(Color::Hex("#ff00ff".to_string())),
            equal_hor: Some(true),
            equal_ver: None,
        })
        .jpeg_options(JpegOptions {
            progressive: Some(true),
            trellis_quant: Some(true),
            ..Default::default()
        })
        .png_options(PngOptions {
            interlaced: Some(true),
            quantize: Some(true),
            quantization_colors: Some(128),
        })
        .gif_options(GifOptions {
            optimize_frames: Some(true),
            optimize_transparency: Some(false),
        })
        .style("dark")
        .page(2);

    let segments: Vec<String> = proxy.store().segments().collect();
    assert_eq!(
        segments,
        vec![
            "rs:fit:300:200:false:true",
            "ex:true:no",
            "t:10:ff00ff:true",
            "jpgo:true::true",
            "pngo:true:true:128",
            "gifo:true:false",
            "st:dark",
            "page:2",
        ]
    );
}

#[test]
fn test_unknown_and_unabbreviated_options_pass_through() {
    let mut proxy = unsigned();
    proxy
        .dpr(2.0)
        .page(3)
        .background_alpha(0.5)
        .set_option("zoom", 1.5);

    let segments: Vec<String> = proxy.store().segments().collect();
    assert_eq!(
        segments,
        vec!["dpr:2", "page:3", "background_alpha:0.5", "zoom:1.5"]
    );
}

#[test]
fn test_set_option_absent_resets() {
    let mut proxy = unsigned();
    proxy.quality(80).set_option("quality", OptionValue::Absent);
    assert!(proxy.get_option("quality").is_none());

    proxy.quality(80).set_option("quality", Option::<u8>::None);
    assert!(proxy.get_option("quality").is_none());
}

#[test]
fn test_get_option_returns_last_field() {
    let mut proxy = unsigned();
    proxy.size(size_40()).quality(90);

    assert_eq!(proxy.get_option("quality"), Some("90"));
    assert_eq!(proxy.get_option("size"), Some("false"));
    assert_eq!(proxy.get_option_value("size"), Some("40:40:true:false"));
    assert_eq!(proxy.get_option("width"), None);
}

#[test]
fn test_free_text_cannot_add_path_segments() {
    let mut proxy = unsigned();
    proxy.filename("a/b");

    let url = proxy.build(IMAGE).unwrap();
    assert!(url.contains("/fn:a%2Fb/"));
}

#[test]
fn test_missing_image() {
    let err = unsigned().size(size_40()).build("").unwrap_err();
    assert_eq!(err, BuilderError::MissingParameter("image"));
}

#[test]
fn test_build_is_deterministic() {
    let mut proxy = unsigned();
    proxy.size(size_40()).quality(80).background("ffffff");
    let first = proxy.build(IMAGE).unwrap();
    let second = proxy.build(IMAGE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_preset_only_with_default_value() {
    let mut proxy = ImgProxy::new(BuilderConfig::new(BASE).with_preset_only(true)).unwrap();
    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/default/{}", BASE, encoded()));
}

#[test]
fn test_preset_only_with_custom_value() {
    let mut proxy = ImgProxy::new(BuilderConfig::new(BASE).with_preset_only(true)).unwrap();
    proxy.preset(["something"]);
    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/something/{}", BASE, encoded()));
}

#[test]
fn test_preset_only_with_ignored_values() {
    let mut proxy = ImgProxy::new(BuilderConfig::new(BASE).with_preset_only(true)).unwrap();
    proxy
        .preset(["something"])
        .size(size_40())
        .background("#ffffff");

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/something/{}", BASE, encoded()));

    // The ignored options are still held by the store
    assert!(proxy.store().contains("size"));
    assert!(proxy.store().contains("background"));
}

#[test]
fn test_preset_only_with_autoreset_drops_preset() {
    let config = BuilderConfig::new(BASE)
        .with_preset_only(true)
        .with_autoreset(true);
    let mut proxy = ImgProxy::new(config).unwrap();
    proxy.preset(["a"]);

    let first = proxy.build(IMAGE).unwrap();
    assert_eq!(first, format!("{}/insecure/a/{}", BASE, encoded()));

    // No baseline preset, so the next URL carries no options part
    let second = proxy.build(IMAGE).unwrap();
    assert_eq!(second, format!("{}/insecure/{}", BASE, encoded()));
}

#[test]
fn test_preset_only_with_autoreset_keeps_baseline_preset() {
    let config = BuilderConfig::new(BASE)
        .with_preset_only(true)
        .with_autoreset(true);
    let mut proxy = ImgProxy::new(config).unwrap();
    proxy.set_default_options(
        OptionSet::new().with("preset", OptionValue::Presets(vec!["thumb".into()])),
    );
    proxy.preset(["a"]);

    let first = proxy.build(IMAGE).unwrap();
    assert_eq!(first, format!("{}/insecure/a/{}", BASE, encoded()));

    let second = proxy.build(IMAGE).unwrap();
    assert_eq!(second, format!("{}/insecure/thumb/{}", BASE, encoded()));
}

#[test]
fn test_non_finite_values_are_not_emitted() {
    let mut proxy = unsigned();
    proxy
        .blur(f64::NAN)
        .sharpen(f64::INFINITY)
        .dpr(f64::INFINITY)
        .set_option("background", 16777215u32);

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(url, format!("{}/insecure/{}", BASE, encoded()));
}

#[test]
fn test_presets_outside_preset_only_mode() {
    let mut proxy = unsigned();
    proxy.preset(["thumb", "blurred"]).quality(60);

    let url = proxy.build(IMAGE).unwrap();
    assert_eq!(
        url,
        format!("{}/insecure/pr:thumb:blurred/q:60/{}", BASE, encoded())
    );
}

#[test]
fn test_non_object_options_are_rejected() {
    let err = OptionSet::from_json(&json!("size")).unwrap_err();
    assert!(matches!(err, BuilderError::InvalidConfiguration(_)));

    let mut config = BuilderConfig::new(BASE);
    config.options = Some(json!([1, 2, 3]));
    assert!(matches!(
        ImgProxy::new(config),
        Err(BuilderError::InvalidConfiguration(_))
    ));
}
