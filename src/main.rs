// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. For 'crawl': build the renderer, run the worker pool, print a summary
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Because the crawl runs many concurrent workers
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checkpoint;    // src/checkpoint.rs - persist/restore crawl state
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - crawl configuration
mod crawl;         // src/crawl/ - worker pool and shared state
mod limiter;       // src/limiter.rs - request pacing
mod renderer;      // src/renderer/ - page fetching and parsing
mod validate;      // src/validate/ - entry validity decision
mod words;         // src/words.rs - word extraction

// Import items we need from our modules
use cli::{Cli, Commands, CrawlArgs};
use clap::Parser;  // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl/sort completed
//   Err = startup or unexpected failure (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
        Commands::Sort { input, output } => handle_sort(&input, &output),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let config = args.to_config()?;

    println!("==============================================");
    println!("🚀 Starting the dictionary word harvest...");
    println!("==============================================");

    // Renderer construction is the one fatal startup point: if this fails
    // there is nothing to crawl with, and no state exists yet to save
    let renderer = renderer::HttpRenderer::new().context("could not start the renderer")?;

    let summary = crawl::run_crawl(&renderer, &config).await?;

    println!("==============================================");
    println!("✅ Done! {} unique valid word(s) found.", summary.valid_words);
    println!("   {} word(s) visited in total.", summary.words_visited);
    println!("   Results saved to: {}", config.output_path.display());
    println!("==============================================");

    Ok(0)
}

// Handles the 'sort' subcommand
//
// Reads a harvested word list, sorts it, and writes the sorted copy to a
// second file. Kept separate from the crawl: sorting is a one-shot
// post-processing step, not something workers do
fn handle_sort(input: &std::path::Path, output: &std::path::Path) -> Result<i32> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("could not read {}", input.display()))?;

    let mut sorted: Vec<&str> = raw.lines().filter(|line| !line.is_empty()).collect();
    sorted.sort_unstable();

    std::fs::write(output, sorted.join("\n"))
        .with_context(|| format!("could not write {}", output.display()))?;

    println!("✅ Sorted {} word(s) into {}", sorted.len(), output.display());
    Ok(0)
}
