use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use idr_patterns::{init_logging, write_patterns, GroupConfig, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "make-symlink-patterns")]
#[command(about = "Write one file pattern per field of a screen directory", long_about = None)]
struct Args {
    /// Directory holding the screen images
    dir: PathBuf,

    /// Directory to write the `.pattern` files to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Prefix of the pattern files (default: name of the screen directory)
    #[arg(short, long)]
    tag: Option<String>,

    /// Extension of the image files
    #[arg(long, default_value = "tif")]
    extension: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level)?;

    let mut config = GroupConfig::new(&args.dir)
        .with_out_dir(args.out_dir)
        .with_extension(args.extension);
    if let Some(tag) = args.tag {
        config = config.with_tag(tag);
    }

    let written = write_patterns(&config)
        .with_context(|| format!("Failed to group images in {}", args.dir.display()))?;
    if written.is_empty() {
        tracing::warn!(dir = %args.dir.display(), "no screen images found");
    }
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
