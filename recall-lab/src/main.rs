//! recall-lab — run one free-recall experiment and print the report.
//!
//! Startup sequence:
//!   1. Init logger (RUST_LOG controls verbosity)
//!   2. Load config (optional TOML path as the first argument)
//!   3. Build the session and print the trial list
//!   4. Run study + recall
//!   5. Print the recall report

use anyhow::Context;
use tracing::info;

use recall_core::RecallConfig;
use recall_core::session::RecallSession;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RecallConfig::from_file(std::path::Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => RecallConfig::default(),
    };

    info!(
        n_items = config.list.n_items,
        mixed = config.list.mixed,
        seed = ?config.list.seed,
        noise = config.choice.noise,
        "config loaded"
    );

    let session = RecallSession::new(config).context("building session")?;

    let trial: Vec<String> = session
        .trial_list()
        .iter()
        .map(|s| format!("{} ({})", s.word, s.category))
        .collect();
    println!("Presenting: {}", trial.join(", "));

    let outcome = session.run().context("running session")?;

    print!("{}", outcome.render());
    Ok(())
}
