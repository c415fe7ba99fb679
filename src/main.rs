//! CLI entry point for scout.

mod cli;

use clap::Parser;
use scout::config::load_config;
use scout::probe::Prober;
use scout::render::render_config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    let config = match load_config(args.into_overrides()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let prober = Prober::from_config(&config);
    let (result, notes) = prober.discover(&config.host, config.port).await;

    if config.debug {
        for note in &notes {
            eprintln!("# {note}");
        }
    }

    let Some(result) = result else {
        eprintln!(
            "error: could not find a working OpenAI-compatible endpoint at http://{}:{}",
            config.host, config.port
        );
        if !config.debug {
            eprintln!("Tip: rerun with --debug to see every attempted endpoint.");
        }
        std::process::exit(2);
    };

    print!(
        "{}",
        render_config(&result, &config.api_key, &config.title, &config.model_name)
    );
}
