use clap::Parser;
use std::fmt::Write as _;
use std::path::PathBuf;

use equity_issuance::deploy::DeploymentOrchestrator;
use equity_issuance::report::render_outcome;
use equity_issuance::request::IssuanceRequest;
use equity_issuance::{Config, IssuanceSession, SubmitResult, setup_tracing};

/// Submits a JSON-serialized issuance request for deployment.
///
/// Intended for manual testing against a development chain; interactive
/// editing of the request lives in the UI layer, not here.
#[derive(Debug, Parser)]
struct Cli {
    /// Path to a JSON-serialized issuance request.
    request_file: PathBuf,

    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.config.log_level());

    match run(cli).await {
        Ok(message) => println!("{message}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&cli.request_file)?;
    let request: IssuanceRequest = serde_json::from_str(&raw)?;

    let artifact = cli.config.load_artifact()?;
    let wallet = cli.config.create_wallet_provider()?;
    let orchestrator = DeploymentOrchestrator::new(wallet, artifact);

    let mut session = IssuanceSession::from_request(request);
    match session.submit(&orchestrator).await {
        SubmitResult::Invalid(errors) => {
            let mut message = String::from("Request is invalid:");
            for (field, text) in errors.iter() {
                let _ = write!(message, "\n  {field}: {text}");
            }
            Err(message.into())
        }
        SubmitResult::Completed(outcome) => {
            Ok(render_outcome(&outcome, &cli.config.explorer()))
        }
    }
}
