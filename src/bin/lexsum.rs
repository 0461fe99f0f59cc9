use anyhow::Context;
use std::io::Read;
use tracing::{info, warn};

use lexsum::Summarizer;
use lexsum::core::config::AppConfig;
use lexsum::core::models::SummarizeRequest;

/// Reads a summarize request as JSON on stdin and prints the response envelope.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lexsum::setup_logging();

    let config = AppConfig::from_env()?;
    let summarizer = Summarizer::from_config(&config)?;

    // Resource acquisition may fetch over blocking HTTP.
    let warm = summarizer.clone();
    let status = tokio::task::spawn_blocking(move || warm.resources().warm_up()).await?;
    match status.check() {
        Ok(()) => info!("Linguistic resources: {:?}", status),
        Err(e) => warn!("Running with fallback segmentation or lemmatization: {}", e),
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading request from stdin")?;
    let request: SummarizeRequest =
        serde_json::from_str(&raw).context("parsing summarize request")?;

    let request_id = uuid::Uuid::new_v4();
    info!(
        "Handling request {} (mode={}, length={:?}, num_sentences={}, {} chars)",
        request_id,
        request.mode(),
        request.length(),
        request.num_sentences,
        request.text.chars().count()
    );

    let response = summarizer.respond(&request).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
