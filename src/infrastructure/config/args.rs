use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "folio-pictures",
    version,
    about = "Resolve portfolio images into responsive picture markup",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Report missing images and loader failures as warnings
    /// (`--dev-diagnostics` or `--dev-diagnostics=false`).
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub dev_diagnostics: Option<bool>,

    /// Base path the site is deployed under.
    #[arg(long, value_name = "PATH", env = "FOLIO_BASE_PATH", global = true)]
    pub base_path: Option<String>,

    /// Key prefix of images in the catalog.
    #[arg(long, value_name = "PREFIX", global = true)]
    pub catalog_root: Option<String>,

    /// JSON asset manifest.
    #[arg(long, value_name = "PATH", global = true)]
    pub manifest: Option<PathBuf>,

    /// Directory of images to scan instead of a manifest.
    #[arg(long, value_name = "PATH", global = true)]
    pub asset_dir: Option<PathBuf>,

    /// Append content-hash query strings to scanned asset URLs.
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub fingerprint: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print picture descriptors as JSON.
    Resolve {
        /// Logical image names, relative to the catalog root.
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print `<picture>`/`<img>` markup for one image.
    Render {
        /// Logical image name.
        name: String,
        /// Alternative text.
        #[arg(long, default_value = "")]
        alt: String,
        /// Add `loading="lazy"` to the image element.
        #[arg(long)]
        lazy: bool,
    },
}
