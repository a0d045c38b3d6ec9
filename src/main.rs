use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use webpage_mirror::{DirectorySaver, FetchConfig, HttpClient, MirrorCommand, WebpageMirror};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = MirrorCommand::parse();

    let client = HttpClient::new(&FetchConfig {
        user_agent: args.user_agent,
        timeout: Duration::from_secs(args.timeout),
    })?;
    let saver = DirectorySaver::new(&args.output_dir)?;

    let summary = WebpageMirror::new(client).download(&args.url, &saver).await?;

    let title = if summary.title.is_empty() {
        args.url.as_str()
    } else {
        summary.title.as_str()
    };
    println!(
        "{} {} ({} stylesheets, {} assets) -> {}",
        "Saved".green(),
        title,
        summary.stylesheets_saved,
        summary.assets_saved,
        args.output_dir.display()
    );
    Ok(())
}
