//! charforge - builds one character automatically and prints it as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod autopilot;
mod config;

use autopilot::SessionSettings;
use charforge_domain::RuleBook;
use config::RunnerConfig;

fn main() -> Result<()> {
    // Load environment from repo root so the binary works from any crate directory.
    load_dotenv_from_repo_root();

    // Logs go to stderr; stdout carries the character JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charforge_engine=debug,charforge_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = RunnerConfig::from_env()?;
    tracing::info!(?config, "Starting charforge");

    let rules = match &config.rules_dir {
        Some(dir) => RuleBook::from_dir(dir)
            .with_context(|| format!("loading rule tables from {}", dir.display()))?,
        None => RuleBook::builtin().context("loading bundled rule tables")?,
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let character = autopilot::run(
        &rules,
        rng,
        SessionSettings {
            offer_count: config.offer_count,
            edge_picks: config.edge_picks,
        },
    )?;

    let json = serde_json::to_string_pretty(&character)?;
    match &config.output {
        Some(path) => write_output(path, &json)?,
        None => println!("{}", json),
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote character");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
