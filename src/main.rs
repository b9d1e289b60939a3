mod fetch;
mod output;
mod parser;
mod rank;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

#[derive(Parser)]
#[command(name = "token_scraper", about = "Scrape a token listing page into ranked JSON")]
struct Cli {
    /// URL or local .html path supplying the listing page
    #[arg(short, long, default_value = fetch::DEFAULT_SOURCE)]
    source: String,

    /// Max records kept in the output
    #[arg(short = 'n', long, default_value_t = 1000)]
    limit: usize,

    /// Destination path for the JSON output
    #[arg(short, long, default_value = "tokens.json")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let html = fetch::load_source(&cli.source).await?;

    let source_hint = fetch::is_http_url(&cli.source).then_some(cli.source.as_str());
    let raw = parser::extract_tokens(&html, source_hint);
    let tokens = rank::normalize_and_rank(raw, cli.limit);

    output::write_json(&cli.out, &tokens)?;

    println!("Saved {} records to {}", tokens.len(), cli.out.display());
    if !tokens.is_empty() {
        println!("Top entries:");
        for token in tokens.iter().take(3) {
            println!("- {} | ${} | {}", token.name, token.price_usd, token.url);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
