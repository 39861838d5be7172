pub mod chart;
pub mod config;
pub mod content;
pub mod contract;
pub mod docsync;
pub mod fetch;
pub mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Settings;

/// CLI for campaign-pipeline: fetch, generate and publish campaign reports.
#[derive(Parser)]
#[clap(
    name = "campaign-pipeline",
    version,
    about = "Fetch funding data, generate social content ideas and publish Markdown reports for the PattesThai campaign"
)]
pub struct Cli {
    /// Root directory all input/output paths are resolved against
    #[clap(long, default_value = ".")]
    pub root: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch (or default) funding data and refresh the campaign status page
    FetchFunding,
    /// Generate (or default) TikTok content ideas and write them to disk
    GenerateContent,
    /// Render the funding and social-media reports from the stored data
    RenderReports,
    /// Copy rendered reports into the docs tree and regenerate the index
    SyncDocs,
}

/// Extracted async CLI logic entrypoint for integration tests and main().
///
/// Each subcommand is an independent, stateless batch run; they compose
/// only through the files they leave on disk.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env(&cli.root);

    match cli.command {
        Commands::FetchFunding => {
            println!("Fetching funding data...");
            let api =
                fetch::GoFundMeClient::new(settings.funding.api_key.clone().unwrap_or_default());
            let snapshot = fetch::fetch(&settings.funding, &api).await;
            info!(origin = ?snapshot.origin, "Funding snapshot obtained");
            println!("Updating funding documentation...");
            fetch::write_funding_data(&snapshot.record, &settings.paths)?;
            println!("Done.");
        }
        Commands::GenerateContent => {
            println!("Generating TikTok content ideas...");
            let api =
                content::OpenAiClient::new(settings.content.api_key.clone().unwrap_or_default());
            let idea_set = content::generate(&settings.content, &api).await;
            info!(origin = ?idea_set.origin, count = idea_set.ideas.len(), "Content ideas obtained");
            println!("Saving content ideas...");
            content::save_ideas(&idea_set.ideas, &settings.paths)?;
            println!("Done.");
        }
        Commands::RenderReports => {
            println!("Generating analytics reports...");
            let record = report::load_funding_data(&settings.paths);
            report::render_funding_report(&record, &settings.paths)?;
            report::render_social_report(&settings.paths)?;
            println!("All reports generated.");
        }
        Commands::SyncDocs => {
            println!("Updating documentation with reports...");
            let copied = docsync::sync(
                &settings.paths.reports_dir,
                &settings.paths.docs_reports_dir,
            )?;
            println!("Documentation updated with {copied} report(s).");
        }
    }
    Ok(())
}
