use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use voice_relay::{create_router, AppState, Config, OpenAiTranscriber, OpenAiTranslator, Pipeline};

#[derive(Debug, Parser)]
#[command(name = "voice-relay", about = "Real-time voice translation relay")]
struct Args {
    /// Path to a config file (TOML/YAML/JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let cfg = Config::load(args.config.as_deref())?;
    let port = args.port.unwrap_or(cfg.service.port);

    info!("voice-relay v0.1.0");
    info!("Transcription model: {}", cfg.transcription.model);
    info!("Translation model: {}", cfg.translation.model);

    // Credential checks happen here, before the server accepts anything
    let transcriber = OpenAiTranscriber::new(&cfg.transcription)?;
    let translator = OpenAiTranslator::new(&cfg.translation)?;
    let pipeline = Pipeline::new(Arc::new(transcriber), Arc::new(translator));

    let app = create_router(AppState::new(pipeline));
    let addr = format!("{}:{}", cfg.service.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server is running on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
