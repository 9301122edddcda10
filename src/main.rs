use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use folio_pictures::application::{
    PictureCache, PictureResolver, ResolvePicturesUseCase, UrlPrefixer,
};
use folio_pictures::infrastructure::{AppConfig, CliArgs, Command, StorageManager, open_catalog};
use folio_pictures::presentation::{MarkupOptions, render_picture};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = match &args.config {
        Some(_) => StorageManager::with_dir(std::env::current_dir()?),
        None => StorageManager::new()?,
    };
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn create_cache(config: &AppConfig) -> Result<Arc<PictureCache>> {
    let catalog = open_catalog(&config.catalog, &config.site).await?;
    let prefixer = UrlPrefixer::new(&config.site.base_path);
    let resolver = PictureResolver::new(catalog, prefixer, config.resolver_config());
    Ok(Arc::new(PictureCache::new(Arc::new(resolver))))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = folio_pictures::VERSION, "Starting {}", folio_pictures::NAME);

    let cache = create_cache(&config).await?;

    match args.command {
        Command::Resolve { names } => {
            let results = ResolvePicturesUseCase::new(cache.clone())
                .execute(&names)
                .await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Render { name, alt, lazy } => {
            let picture = cache
                .resolve(&name)
                .await?
                .ok_or_else(|| eyre!("image not found: {name}"))?;
            let options = MarkupOptions { alt, lazy };
            println!("{}", render_picture(&picture, &options));
        }
    }

    debug!("{}", cache.info());

    Ok(())
}

