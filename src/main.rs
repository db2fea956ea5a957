//! helpful - command-line access to the helper collection
//!
//! # Usage
//!
//! ```bash
//! helpful device-name iPhone9,1            # iPhone 7
//! helpful currency '$1,234.5' --locale de-DE
//! helpful decimal 12.345                   # 12.34 (banker's rounding)
//! helpful clean 'a1-b2!' --mode numbers    # 12
//! helpful unescape 'line\nbreak'
//! helpful postgres-date 2024-03-09T14:05:07+02:00
//! helpful body a=1 b=2
//! helpful resize in.png out.jpg --percent 50
//! helpful resize in.png out.jpg --width 120 --height 80
//! helpful grayscale in.png out.png
//! helpful black-and-white in.jpg out.jpg
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for detail.

use clap::{Parser, Subcommand, ValueEnum};
use helpful_extensions::config::{self, HelperConfig};
use helpful_extensions::dispatch::main_queue;
use helpful_extensions::media::{self, Image, Size};
use helpful_extensions::{Locale, date, device, net, text};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

shadow_rs::shadow!(build);

#[derive(Parser)]
#[command(name = "helpful")]
#[command(about = "Text, currency, date and image helpers", long_about = None)]
#[command(version = build::PKG_VERSION, long_version = build::CLAP_LONG_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the marketing name for a hardware identifier (default: this machine)
    DeviceName { identifier: Option<String> },
    /// Format free-form text as a currency amount
    Currency {
        text: String,
        /// Currency locale (en-US, en-GB, de-DE, fr-FR, ja-JP); defaults to the config
        #[arg(short, long)]
        locale: Option<Locale>,
    },
    /// Parse free-form text as a two-place decimal
    Decimal {
        text: String,
        /// Also print the value as currency
        #[arg(short, long)]
        currency: bool,
    },
    /// Filter characters out of text
    Clean {
        text: String,
        #[arg(short, long, value_enum, default_value_t = CleanMode::Special)]
        mode: CleanMode,
    },
    /// Turn escape sequences (\n, \t, \", ...) into their characters
    Unescape { text: String },
    /// Format an RFC 3339 timestamp (default: now) for Postgres
    PostgresDate { timestamp: Option<String> },
    /// Encode key=value pairs as a request body
    Body {
        #[arg(value_name = "KEY=VALUE")]
        pairs: Vec<String>,
    },
    /// Resize an image by percentage or to an exact size
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long, conflicts_with_all = ["width", "height"])]
        percent: Option<f64>,
        #[arg(long, requires = "height")]
        width: Option<f64>,
        #[arg(long, requires = "width")]
        height: Option<f64>,
    },
    /// Convert an image to single-channel grayscale
    Grayscale { input: PathBuf, output: PathBuf },
    /// High-contrast black and white
    BlackAndWhite { input: PathBuf, output: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum CleanMode {
    /// Digits only
    Numbers,
    /// Digits and the decimal point
    Decimal,
    /// Everything except digits
    NoNumbers,
    /// Letters only
    Letters,
    /// Everything except letters
    NoLetters,
    /// Alphanumerics, spaces and common punctuation
    Special,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config_blocking();
    debug!(?config, "Loaded config");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(handle_cli(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn handle_cli(
    command: Commands,
    config: &HelperConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::DeviceName { identifier } => match identifier {
            Some(identifier) => println!("{}", device::model_name(&identifier)),
            None => println!("{}", device::current_model_name()?),
        },
        Commands::Currency { text, locale } => {
            println!(
                "{}",
                text::currency_value(&text, locale.unwrap_or(config.locale))
            );
        }
        Commands::Decimal { text, currency } => {
            let value = text::decimal_value(&text);
            if currency {
                println!("{}", value.currency_string_value(config.locale));
            } else {
                println!("{value}");
            }
        }
        Commands::Clean { text, mode } => {
            let cleaned = match mode {
                CleanMode::Numbers => text::numbers_only(&text),
                CleanMode::Decimal => text::numbers_with_decimal_only(&text),
                CleanMode::NoNumbers => text::numbers_exempt(&text),
                CleanMode::Letters => text::characters_only(&text),
                CleanMode::NoLetters => text::characters_exempt(&text),
                CleanMode::Special => text::remove_special_characters(&text),
            };
            println!("{cleaned}");
        }
        Commands::Unescape { text } => println!("{}", text::unescaped(&text)),
        Commands::PostgresDate { timestamp } => match timestamp {
            Some(timestamp) => {
                let parsed = chrono::DateTime::parse_from_rfc3339(&timestamp)?;
                println!("{}", date::to_postgres_date(&parsed));
            }
            None => println!("{}", date::to_postgres_date(&chrono::Local::now())),
        },
        Commands::Body { pairs } => {
            let content: IndexMap<&str, &str> = pairs
                .iter()
                .map(|pair| pair.split_once('=').unwrap_or((pair.as_str(), "")))
                .collect();
            let mut request = http::Request::new(Vec::new());
            let len = net::set_body_content(&mut request, &content);
            println!("{}", String::from_utf8_lossy(request.body()));
            println!("Content-Length: {len}");
        }
        Commands::Resize {
            input,
            output,
            percent,
            width,
            height,
        } => {
            let image = read_image(&input, config).await?;
            let resized = match (percent, width.zip(height)) {
                (Some(percent), _) => media::resize_by_percentage(&image, percent / 100.0)?,
                (None, Some((width, height))) => {
                    resize_on_main_queue(image, Size::new(width, height), config).await?
                }
                (None, None) => return Err("Pass --percent or --width and --height.".into()),
            };
            write_image(resized.bitmap(), &output, config).await?;
            let (w, h) = resized.pixel_size();
            println!("Wrote {w}x{h} image to {}", output.display());
        }
        Commands::Grayscale { input, output } => {
            let image = read_image(&input, config).await?;
            write_image(media::grayscale(&image)?.bitmap(), &output, config).await?;
        }
        Commands::BlackAndWhite { input, output } => {
            let image = read_image(&input, config).await?;
            write_image(media::black_and_white(&image)?.bitmap(), &output, config).await?;
        }
    }
    Ok(())
}

async fn read_image(path: &Path, config: &HelperConfig) -> helpful_extensions::Result<Image> {
    let bytes = tokio::fs::read(path).await?;
    let decoded = Image::decode(&bytes)?;
    Ok(Image::new(decoded.into_bitmap(), config.device_scale))
}

/// Exact-size resize through the background path, with the result handed
/// back on a main queue drained here.
async fn resize_on_main_queue(
    image: Image,
    size: Size,
    config: &HelperConfig,
) -> Result<Image, Box<dyn std::error::Error>> {
    let (main, mut main_loop) = main_queue();
    let (tx, rx) = tokio::sync::oneshot::channel();

    let task = media::resize_async(image, size, config.jpeg_quality, &main, move |result| {
        let _ = tx.send(result);
    });
    task.await??;
    main_loop.run_pending();

    let (resized, _jpeg) = rx.await??;
    Ok(resized)
}

async fn write_image(
    bitmap: &image::DynamicImage,
    path: &Path,
    config: &HelperConfig,
) -> helpful_extensions::Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    let bytes = if is_jpeg {
        media::encode_jpeg(bitmap, config.jpeg_quality)?
    } else {
        let mut bytes = std::io::Cursor::new(Vec::new());
        bitmap.write_to(&mut bytes, image::ImageFormat::Png)?;
        bytes.into_inner()
    };
    tokio::fs::write(path, bytes).await?;
    debug!(path = %path.display(), "Wrote image");
    Ok(())
}
