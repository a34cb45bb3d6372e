use anyhow::{Context, Result};
use clap::Parser;
use karasu_url::{BuilderConfig, ImgProxy, OptionSet};
use std::path::PathBuf;

/// Karasu URL - build and sign imgproxy URLs
#[derive(Parser, Debug)]
#[command(name = "karasu-url")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source image URL
    image: String,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proxy base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Hex-encoded signing key
    #[arg(long, env = "IMGPROXY_KEY")]
    key: Option<String>,

    /// Hex-encoded signing salt
    #[arg(long, env = "IMGPROXY_SALT")]
    salt: Option<String>,

    /// Emit only the preset directive
    #[arg(long)]
    preset_only: bool,

    /// Options as a JSON object, e.g. '{"size":{"width":40,"height":40}}'
    #[arg(short, long)]
    options: Option<String>,

    /// Log filter directive (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<BuilderConfig> {
    let mut config = match &args.config {
        Some(path) => BuilderConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => BuilderConfig::default(),
    };

    if let Some(url) = &args.url {
        config.url = url.clone();
    }
    if args.key.is_some() {
        config.key = args.key.clone();
    }
    if args.salt.is_some() {
        config.salt = args.salt.clone();
    }
    if args.preset_only {
        config.preset_only = true;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let logging = match &args.log_level {
        Some(level) => karasu_url::logging::init_subscriber_with_level(level),
        None => karasu_url::logging::init_subscriber(),
    };
    logging
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to initialize logging subsystem")?;

    let config = load_config(&args)?;
    let mut proxy = ImgProxy::new(config).context("Invalid builder configuration")?;

    if let Some(raw) = &args.options {
        let value: serde_json::Value =
            serde_json::from_str(raw).context("--options is not valid JSON")?;
        let options = OptionSet::from_json(&value).context("Invalid --options")?;
        proxy.set_options(&options);
    }

    tracing::info!(
        signed = proxy.is_signed(),
        preset_only = proxy.is_preset_only(),
        options = proxy.store().len(),
        "Building URL"
    );

    let url = proxy.build(&args.image)?;
    println!("{}", url);

    Ok(())
}
