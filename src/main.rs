use std::process;

use blogcommits::Cli;
use clap::Parser;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables take precedence.
    dotenvy::dotenv().ok();

    // Logs go to stderr so `generate` and `commits` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {err}");
            source = err.source();
        }

        process::exit(1);
    }
}
