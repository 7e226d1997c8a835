/// This script deploys the Inbox contract to one of the supported networks
/// and writes a `deployment-<network>-<date>.json` record of where it landed.
///
/// The mnemonic, Infura API key, and initial message are read from the
/// environment (a `.env` file in the working directory is loaded first if
/// there is one).
use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use eyre::{Result, WrapErr};
use inbox_deployer::{
    artifact::ContractArtifact,
    chain::ChainClient,
    config::DeployConfig,
    constants::{DEFAULT_ARTIFACT_PATH, DEFAULT_NETWORK},
    deploy::Deployment,
    network::NetworkRegistry,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(about = "Deploy the Inbox contract and record its address")]
struct Cli {
    /// The network to deploy to.
    #[arg(default_value = DEFAULT_NETWORK)]
    network: String,

    /// The compiled contract (ABI and bytecode).
    #[arg(long, env = "CONTRACT_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,

    /// Where the deployment record is written.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    // The variables may already be set, so a missing .env file is fine.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    ExitCode::from(exit_status(run(cli).await))
}

/// Reports a failed deployment and maps the outcome to the process exit
/// status.
fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(report) => {
            error!("deployment failed: {report:?}");
            1
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = DeployConfig::from_env().wrap_err("please check your .env file")?;

    // Resolve the network and load the artifact before connecting so that
    // neither failure leaves a provider behind.
    let registry = NetworkRegistry::new(config.infura_api_key.clone());
    let endpoint = registry.resolve(&cli.network)?;
    let artifact = ContractArtifact::load(&cli.artifact)?;

    let client = ChainClient::connect(&endpoint, &config)
        .await
        .wrap_err_with(|| format!("failed to connect to {}", cli.network))?;
    let deployed = Deployment::new(&registry, &artifact, &config.initial_message)
        .run_and_record(client, &cli.network, &cli.output_dir)
        .await?;

    info!(
        contract_address = ?deployed.outcome.contract_address,
        transaction_hash = ?deployed.outcome.transaction_hash,
        record = %deployed.path.display(),
        "done"
    );

    Ok(())
}
