//! CRUCIBLE command-line entry point.
//!
//! Builds a panel (heuristic by default, remote where keys are configured and
//! `--remote` is set), runs the evaluation, prints the report, optionally
//! exports JSON, and exits with the decision code: KILL is 1, caution is 2,
//! proceed is 0.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use consensus::{
    CrucibleConfig, CrucibleOrchestrator, Evaluator, EvaluatorRegistry,
};
use crucible_agents::{report, HeuristicEvaluator, Provider, RemoteEvaluator};

#[derive(Parser)]
#[command(
    name = "crucible",
    about = "Adversarial multi-evaluator concept evaluation",
    arg_required_else_help = true
)]
struct Cli {
    /// The concept to evaluate (all positional words are joined).
    #[arg(required = true)]
    concept: Vec<String>,

    /// Load evaluator profiles from a TOML file instead of the built-ins.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Comma-separated evaluator names to include (default: all enabled).
    #[arg(long, value_delimiter = ',')]
    evaluators: Option<Vec<String>>,

    /// Prefer remote model evaluators where API keys are configured.
    #[arg(long)]
    remote: bool,

    /// Write the full verdict as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Per-evaluator wall-clock budget in seconds.
    #[arg(long)]
    evaluator_timeout_secs: Option<u64>,

    /// Hard deadline for the whole panel in seconds.
    #[arg(long)]
    panel_timeout_secs: Option<u64>,
}

fn build_panel(registry: &EvaluatorRegistry, cli: &Cli) -> Vec<Arc<dyn Evaluator>> {
    let mut panel: Vec<Arc<dyn Evaluator>> = Vec::new();

    for profile in registry.enabled_profiles() {
        if let Some(filter) = &cli.evaluators {
            if !filter.iter().any(|name| name == &profile.name) {
                continue;
            }
        }

        if cli.remote {
            let provider = Provider::all()
                .iter()
                .find(|p| p.evaluator_name() == profile.name)
                .copied();
            if let Some(provider) = provider {
                match RemoteEvaluator::new(provider) {
                    Ok(remote) => {
                        info!(evaluator = %profile.name, "using remote evaluator");
                        panel.push(Arc::new(remote));
                        continue;
                    }
                    Err(err) => {
                        warn!(
                            evaluator = %profile.name,
                            error = %err,
                            "remote evaluator unavailable, using heuristic"
                        );
                    }
                }
            }
        }

        panel.push(Arc::new(HeuristicEvaluator::from_profile(profile)));
    }

    panel
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let concept = cli.concept.join(" ");

    let registry = match &cli.registry {
        Some(path) => EvaluatorRegistry::load(path)
            .with_context(|| format!("failed to load registry from {}", path.display()))?,
        None => EvaluatorRegistry::builtin(),
    };

    let mut config = CrucibleConfig::default();
    if let Some(secs) = cli.evaluator_timeout_secs {
        config = config.with_evaluator_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.panel_timeout_secs {
        config = config.with_panel_timeout(Duration::from_secs(secs));
    }

    let panel = build_panel(&registry, &cli);
    info!(members = panel.len(), remote = cli.remote, "panel assembled");

    let mut orchestrator = CrucibleOrchestrator::new(registry, config);
    for member in panel {
        orchestrator.register(member);
    }

    let verdict = orchestrator.evaluate(&concept).await?;

    println!("{}", report::render(&verdict));

    if let Some(path) = &cli.json {
        report::write_json(&verdict, path)?;
        println!("Detailed results saved to: {}", path.display());
    }

    std::process::exit(report::exit_code(verdict.decision));
}
