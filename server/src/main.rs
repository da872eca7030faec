use anyhow::Result;
use axum::Router;
use clap::Parser;
use irs_core::config::{CONSULTANT_STOPWORDS, DEFAULT_STOPWORDS};
use irs_core::corpus::load_dir;
use irs_core::{IrConfig, IrSystem, Scoring, SharedIrSystem};
use irs_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory of documents to index at startup; the index starts empty without it
    #[arg(long)]
    corpus: Option<String>,
    /// File extension to index
    #[arg(long, default_value = "txt")]
    ext: String,
    /// Ranking function: tf or bm25
    #[arg(long, default_value_t = Scoring::Bm25)]
    scoring: Scoring,
    /// Whitespace-separated stopwords (overrides --consultant)
    #[arg(long)]
    stopwords: Option<String>,
    /// Use the man-page consultant stopwords ("how do i the a of")
    #[arg(long, default_value_t = false)]
    consultant: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let default_stopwords = if args.consultant { CONSULTANT_STOPWORDS } else { DEFAULT_STOPWORDS };
    let config = IrConfig {
        stopwords: args.stopwords.clone().unwrap_or_else(|| default_stopwords.to_string()),
        scoring: args.scoring,
    };
    let mut system = IrSystem::with_config(&config);
    if let Some(corpus) = &args.corpus {
        let docs = load_dir(corpus, &args.ext)?;
        system.index_collection_parallel(&docs)?;
    }
    tracing::info!(num_docs = system.len(), scoring = %args.scoring, "index ready");

    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app: Router = build_app(SharedIrSystem::new(system), admin_token);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
