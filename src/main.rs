use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod errors;
mod prompt;
mod provider;
mod publish;
mod requirements;
mod sanitize;
mod server;
mod workflow;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let default_filter = if args.debug { "pagesmith=debug,info" } else { "pagesmith=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Fail fast: every endpoint and credential is resolved before we bind.
    let mut cfg = config::Config::from_env()?;
    if let Some(model) = args.model {
        cfg.model = model;
    }
    cfg.timeout_secs = args.timeout_secs;

    tracing::info!(
        model = %cfg.model,
        repo = %format!("{}/{}", cfg.github_owner, cfg.github_repo),
        branch = %cfg.github_branch,
        "configuration loaded"
    );

    let provider = provider::make_provider(&cfg);
    let state = Arc::new(server::AppState {
        workflow: workflow::GenerationWorkflow::new(provider),
        publisher: publish::GithubPublisher::new(&cfg),
    });

    server::serve(state, &args.host, args.port).await
}
