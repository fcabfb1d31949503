// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn them into a CrawlJob (rejecting nonsense like --threads 0)
// 3. Run the crawl and print the discovered links
// 4. Exit with proper code (0 = success, 1 = some downloads failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use link_harvester::{CrawlJob, CrawlResult, DownloadOutcome};
use std::path::Path;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    link_harvester::logging::init(&cli.log_file, cli.verbose)?;

    let job = CrawlJob::new(&cli.url, cli.depth, cli.threads, cli.download)?
        .with_max_attempts(cli.retries)?
        .with_output_dir(&cli.output_dir);

    if !cli.json {
        println!("🔍 Crawling: {}", job.seed_url());
        println!("📊 Depth: {}, threads: {}", job.max_depth(), job.max_concurrency());
    }

    let result = link_harvester::crawl(&job).await?;

    if let Some(path) = &cli.save {
        save_links(path, &result.links)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
        if let Some(path) = &cli.save {
            println!("💾 Links saved to {}", path.display());
        }
    }

    let failed = result.downloads.iter().filter(|o| !o.is_saved()).count();
    Ok(if failed > 0 { 1 } else { 0 })
}

// One link per line, like the results box of the original tool
fn save_links(path: &Path, links: &[String]) -> Result<()> {
    let mut contents = links.join("\n");
    contents.push('\n');
    std::fs::write(path, contents)
        .with_context(|| format!("cannot write results to {}", path.display()))
}

fn print_report(result: &CrawlResult) {
    println!("\nCrawled links:");
    for link in &result.links {
        println!("  {}", link);
    }
    println!();

    println!("📊 Summary:");
    println!("   📄 Pages fetched: {}", result.pages_fetched);
    println!("   ⚠️  Pages failed: {}", result.pages_failed);
    println!("   🔗 Links found: {}", result.links.len());

    if !result.downloads.is_empty() {
        let saved = result.downloads.iter().filter(|o| o.is_saved()).count();
        println!("   ✅ Resources saved: {}", saved);
        println!("   ❌ Resources failed: {}", result.downloads.len() - saved);

        for outcome in &result.downloads {
            if let DownloadOutcome::Failed { url, attempts, .. } = outcome {
                println!("      {} (after {} attempts)", url, attempts);
            }
        }
    }
}
