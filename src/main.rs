//! `license-text` — gather the full license text of every installed npm
//! package into one document.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]); a bad invocation exits `1`.
//! 2. Load config ([`config::load_config`]).
//! 3. Crawl `node_modules` ([`crawler::crawl`]).
//! 4. Drop synthetic packages ([`filter::filter_packages`]).
//! 5. Resolve and write each license in order ([`report::text::write_licenses`]).
//! 6. Exit `0` if every package resolved and nothing failed, else `1`.

mod cli;
mod config;
mod crawler;
mod fetch;
mod filter;
mod license;
mod models;
mod report;
mod resolver;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info, warn};

use cli::Cli;
use config::load_config;
use fetch::HttpFetcher;
use license::overrides::OverrideTable;
use models::Failures;
use resolver::Resolver;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut failures = Failures::default();
    if let Err(err) = run(&cli, &mut failures).await {
        error!("{:#}", err);
        failures.record();
    }

    if failures.count() > 0 {
        warn!("finished with {} failure(s)", failures.count());
    }
    std::process::exit(failures.exit_code());
}

async fn run(cli: &Cli, failures: &mut Failures) -> Result<()> {
    let config = load_config(&cli.input_dir, cli.config.as_deref())?;
    let overrides = OverrideTable::new(&config.overrides);
    let fetcher = HttpFetcher::new(&config.fetch)?;

    info!(
        "Generating licenses for npm packages under {}",
        cli.input_dir.display()
    );
    let packages = crawler::crawl(&cli.input_dir)?;
    let packages = filter::filter_packages(&packages);

    let resolver = Resolver::new(&fetcher, &overrides);
    let tally =
        report::text::write_licenses(&cli.output_file, &packages, &resolver, failures).await?;

    report::terminal::render(&cli.output_file, &tally, cli.quiet);
    Ok(())
}
