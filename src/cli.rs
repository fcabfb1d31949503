// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// It stands in for the parameter form of a graphical front-end: seed URL,
// depth, retries, threads and the "download resources" switch. clap rejects
// non-numeric values before the crawl ever starts.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version,
    about = "Crawl a website to a fixed depth and collect every link found",
    long_about = "link-harvester follows links breadth-first from a seed URL for a fixed number of \
                  levels, fetching a few pages at a time. With --download it also saves each visited \
                  page and downloads the stylesheets, scripts and images those pages reference."
)]
pub struct Cli {
    /// URL to start from (https:// is assumed if no scheme is given)
    pub url: String,

    /// How many levels to crawl; 0 fetches nothing
    #[arg(long, short = 'd', default_value_t = 3)]
    pub depth: usize,

    /// Attempts per resource download
    #[arg(long, short = 'r', default_value_t = 3)]
    pub retries: u32,

    /// Pages fetched at once per level, and parallel resource downloads
    #[arg(long, short = 't', default_value_t = 3)]
    pub threads: usize,

    /// Save visited pages and download their CSS, JS and images
    #[arg(long)]
    pub download: bool,

    /// Directory that receives html/, css/, js/ and images/
    #[arg(long, default_value = "downloads")]
    pub output_dir: PathBuf,

    /// File that receives the crawl log
    #[arg(long, default_value = "crawler.log")]
    pub log_file: PathBuf,

    /// Also write the discovered links to this file, one per line
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Print results as JSON instead of a list
    #[arg(long)]
    pub json: bool,

    /// Log debug messages too
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["link-harvester", "example.com"]).unwrap();
        assert_eq!(cli.url, "example.com");
        assert_eq!(cli.depth, 3);
        assert_eq!(cli.retries, 3);
        assert_eq!(cli.threads, 3);
        assert!(!cli.download);
        assert_eq!(cli.output_dir, PathBuf::from("downloads"));
        assert!(cli.save.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "link-harvester",
            "https://example.com",
            "--depth",
            "1",
            "-t",
            "8",
            "--retries",
            "5",
            "--download",
            "--save",
            "links.txt",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.depth, 1);
        assert_eq!(cli.threads, 8);
        assert_eq!(cli.retries, 5);
        assert!(cli.download && cli.json);
        assert_eq!(cli.save, Some(PathBuf::from("links.txt")));
    }

    #[test]
    fn test_non_numeric_depth_is_rejected() {
        let err = Cli::try_parse_from(["link-harvester", "example.com", "--depth", "three"]);
        assert!(err.is_err());
    }
}
