//! Kwitter terminal client
//!
//! Signs in with a phone number and edits the matching contact profile.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use firebase_auth::{FirebaseAuthOptions, FirebaseAuthService};
use kwitter_core::cli::{self, PromptVerificationGate};
use kwitter_core::kernel::{
    AppDeps, AppKernel, BaseVerificationGate, FirebaseAuthAdapter, ProfileApiAdapter,
    StaticVerificationGate,
};
use kwitter_core::Config;
use profile_client::ProfileApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kwitter")]
#[command(about = "Sign in by phone and edit your contact profile")]
#[command(version)]
struct Cli {
    /// Phone number to prefill at the sign-in prompt
    #[arg(long, env = "KWITTER_PHONE")]
    phone: Option<String>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,kwitter_core=debug,firebase_auth=debug,profile_client=debug"
    } else {
        "warn,kwitter_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

async fn run(args: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let kernel_deps = build_deps(&config)?;

    tracing::debug!("Starting interactive session");
    let mut kernel = AppKernel::new(kernel_deps);
    cli::run(&mut kernel, args.phone).await
}

fn build_deps(config: &Config) -> Result<AppDeps> {
    let mut auth_options =
        FirebaseAuthOptions::new(config.firebase_api_key.clone()).with_timeout(config.http_timeout());
    if let Some(url) = &config.firebase_auth_url {
        auth_options = auth_options.with_base_url(url.clone());
    }
    let auth = FirebaseAuthService::new(auth_options)
        .context("Failed to create identity provider client")?;

    let profiles = ProfileApiClient::with_timeout(&config.profile_api_url, config.http_timeout())
        .context("Failed to create profile API client")?;

    let gate: Arc<dyn BaseVerificationGate> = match &config.recaptcha_token {
        Some(token) => Arc::new(StaticVerificationGate::new(token.clone())),
        None => Arc::new(PromptVerificationGate),
    };

    Ok(AppDeps::new(
        Arc::new(FirebaseAuthAdapter::new(Arc::new(auth))),
        gate,
        Arc::new(ProfileApiAdapter::new(Arc::new(profiles))),
        config.challenge_ttl(),
    ))
}
