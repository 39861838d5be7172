use clap::Parser;

use campaign_pipeline::{run, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();

    // Uniform exit policy for every subcommand: 0 on normal completion
    // (fallback paths included), 1 on an uncaught top-level error.
    if let Err(e) = run(cli).await {
        eprintln!("[ERROR] {e:#}");
        std::process::exit(1);
    }
}
