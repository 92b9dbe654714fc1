//! `pixshard` — hide text in erasure-coded grayscale PNG images.
//!
//! # Usage
//!
//! ```text
//! pixshard encode "Your text here"            # writes output.png
//! pixshard encode "Your text here" secret     # writes secret.png
//! pixshard decode secret.png                  # prints the text
//! pixshard decode secret.png --erase 0,3      # treat shards 0 and 3 as lost
//! pixshard inspect secret.png                 # show grid and shard layout
//! pixshard -c pixshard.toml encode "..."      # codec settings from a file
//! ```

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixshard_engine::Pipeline;
use pixshard_types::{CodecConfig, Message};
use tracing::info;

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "pixshard",
    version,
    about = "Encode text into erasure-coded grayscale images and back"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true, env = "PIXSHARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of data shards.
    #[arg(short = 'k', long, global = true)]
    data_shards: Option<usize>,

    /// Override the number of parity shards.
    #[arg(short = 'm', long, global = true)]
    parity_shards: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into a PNG image.
    Encode {
        /// Text to hide in the image.
        text: String,

        /// Output file; `.png` is appended when missing.
        filename: Option<String>,
    },

    /// Decode the text stored in an image.
    Decode {
        /// Image to read.
        filename: PathBuf,

        /// Shard indices to treat as lost (comma separated).
        #[arg(short, long, value_delimiter = ',')]
        erase: Vec<usize>,
    },

    /// Show the grid and shard layout of an encoded image.
    Inspect {
        /// Image to read.
        filename: PathBuf,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    // CLI args override config file values.
    if let Some(k) = cli.data_shards {
        config.codec.data_shards = Some(k);
    }
    if let Some(m) = cli.parity_shards {
        config.codec.parity_shards = Some(m);
    }

    let codec = config.codec_config();

    match cli.command {
        Commands::Encode { text, filename } => {
            let path = match filename {
                Some(name) => png_path(&name),
                None => config.output.default_file.clone(),
            };
            cmd_encode(codec, &text, &path)
        }
        Commands::Decode { filename, erase } => cmd_decode(codec, &filename, &erase),
        Commands::Inspect { filename } => cmd_inspect(codec, &filename),
    }
}

fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Append `.png` unless `name` already ends with it.
fn png_path(name: &str) -> PathBuf {
    if name.ends_with(".png") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.png"))
    }
}

// -----------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------

fn cmd_encode(codec: CodecConfig, text: &str, path: &Path) -> Result<()> {
    let pipeline = Pipeline::new(codec).context("invalid codec config")?;
    let grid = pipeline
        .encode(&Message::new(text))
        .context("failed to encode data")?;
    pixshard_raster::save_png(path, &grid)
        .with_context(|| format!("failed to save {}", path.display()))?;

    info!(
        path = %path.display(),
        side = grid.width(),
        k = codec.data_shards,
        m = codec.parity_shards,
        "wrote image"
    );
    Ok(())
}

fn cmd_decode(codec: CodecConfig, path: &Path, erase: &[usize]) -> Result<()> {
    let pipeline = Pipeline::new(codec).context("invalid codec config")?;
    let image = pixshard_raster::load(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let message: Message = pipeline
        .decode_with_erasures(&image, erase)
        .context("failed to decode data")?;

    println!("Decoded data: {}", message.data);
    Ok(())
}

fn cmd_inspect(codec: CodecConfig, path: &Path) -> Result<()> {
    let pipeline = Pipeline::new(codec).context("invalid codec config")?;
    let image = pixshard_raster::load(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let inspection = pipeline
        .inspect(&image)
        .context("failed to read shard layout")?;
    let layout = inspection.layout;

    println!("Image:          {}", path.display());
    println!("Grid:           {0}x{0}", inspection.side);
    println!(
        "Shards:         {} data + {} parity",
        codec.data_shards, codec.parity_shards
    );
    println!("Shard size:     {} bytes", layout.shard_size);
    println!("Shard bytes:    {}", layout.total_len());
    println!(
        "Unused cells:   {}",
        inspection.side * inspection.side - layout.total_len()
    );
    println!("Payload length: {} bytes", inspection.declared_len);
    Ok(())
}
