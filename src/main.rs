// Photo Tagger - Main Entry Point
// Uploads a photo to Imagga and shows the tags and dominant colors it finds

mod state;
mod ui;

use anyhow::Context;
use clap::Parser;
use photo_tagger_backend::{Config, ImagePayload, Orchestrator};
use state::{AppState, Screen};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use ui::{progress_position, render_results, upload_progress_bar};

/// Tag a photo and list its dominant colors
#[derive(Parser, Debug)]
#[command(name = "photo-tagger", version, about)]
struct Cli {
    /// Photo to annotate (any format the image decoder understands)
    image: PathBuf,

    /// JPEG quality (1-100) used when re-encoding the photo
    #[arg(long)]
    quality: Option<u8>,

    /// Base URL of the tagging service
    #[arg(long)]
    base_url: Option<String>,

    /// Value of the Authorization header (e.g. "Basic <token>")
    #[arg(long)]
    authorization: Option<String>,

    /// Upload the file bytes as-is instead of re-encoding (file must be JPEG)
    #[arg(long)]
    raw: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the results
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(quality) = cli.quality {
        config.capture.jpeg_quality = quality;
    }
    if let Some(base_url) = &cli.base_url {
        config.set_base_url(base_url.as_str());
    }
    if let Some(authorization) = &cli.authorization {
        config.service.authorization = authorization.clone();
    }
    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    let payload = if cli.raw {
        let bytes = tokio::fs::read(&cli.image)
            .await
            .with_context(|| format!("failed to read {}", cli.image.display()))?;
        ImagePayload::from_jpeg_bytes(bytes)?
    } else {
        ImagePayload::from_image_file(&cli.image, config.capture.jpeg_quality)?
    };

    let orchestrator = Orchestrator::from_config(&config.service)?;

    let app_state = Arc::new(Mutex::new(AppState::new()));
    {
        let mut state = app_state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.begin_upload(&cli.image) {
            anyhow::bail!("an upload is already in progress");
        }
        info!(
            image = %cli.image.display(),
            payload_len = payload.len(),
            screen = ?state.screen(),
            "Starting annotation"
        );
    }

    let bar = upload_progress_bar();
    let progress_bar = bar.clone();
    let progress_state = app_state.clone();
    let result = orchestrator
        .annotate(&payload, move |fraction| {
            progress_bar.set_position(progress_position(fraction));
            progress_state
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .set_progress(fraction);
        })
        .await;
    bar.finish_and_clear();

    let mut state = app_state.lock().unwrap_or_else(|e| e.into_inner());
    state.finish(result);
    debug_assert_eq!(state.screen(), Screen::Results);

    if state.tags().is_none() || state.colors().is_none() {
        warn!(
            image = ?state.image_path(),
            "Some annotations are unavailable; see the log above for details"
        );
    }

    if let Some(result) = state.result() {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{}", render_results(result, std::io::stdout().is_terminal()));
        }
    }

    Ok(())
}
