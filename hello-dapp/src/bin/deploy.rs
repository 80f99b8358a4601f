//! Deploy HelloWorld and publish its address for the client.

use clap::Parser;
use eyre::{Result, WrapErr};
use hello_dapp::{
    config::DeployConfig,
    deploy::{deploy_hello_world, AlloyDeployer, ContractArtifact, DeployOutputs},
    error::ConfigError,
    logging,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "deploy", about = "Deploy the HelloWorld contract")]
struct Cli {
    /// Only verify that the required environment is present
    #[arg(long)]
    check_env: bool,

    /// Override the compiled artifact location
    #[arg(long)]
    artifact: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let config = match DeployConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingVars(missing)) => {
            for name in &missing {
                error!("Missing required environment variable: {name}");
            }
            error!("Create a .env file based on .env.example and fill in the required values.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.check_env {
        info!("All required environment variables are set.");
        return ExitCode::SUCCESS;
    }

    match run(config, cli.artifact).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: DeployConfig, artifact: Option<PathBuf>) -> Result<()> {
    let artifact_path = artifact.unwrap_or_else(|| config.artifact_path.clone());
    let artifact = ContractArtifact::load(&artifact_path)?;
    let deployer = AlloyDeployer::new(&config.rpc_url, &config.private_key)?;

    let outputs = DeployOutputs {
        deployments_path: config.deployments_path.clone(),
        frontend_path: config.frontend_path.clone(),
    };
    let address = deploy_hello_world(&deployer, &artifact, &outputs)
        .await
        .wrap_err("HelloWorld deployment failed")?;

    info!("HelloWorld smart contract deployed. Address: {address}");
    Ok(())
}
