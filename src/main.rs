use system_config_deploy::artifact;
use system_config_deploy::cli::{Cli, Command, ConfigArgs, DeployArgs, VerifyArgs};
use system_config_deploy::config::DeployConfig;
use system_config_deploy::deploy::provider::{connect_read_only, connect_with_signer};
use system_config_deploy::deploy::{ProviderDeployer, ProviderSystemConfig};
use system_config_deploy::harness::{DeployStep, Orchestrator, StepOutcome};
use system_config_deploy::output;

use alloy_primitives::Bytes;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Main entry point for the SystemConfig deployer
#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Check(args) => check(args),
        Command::Deploy(args) => deploy(args).await,
        Command::Verify(args) => verify(args).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_step(args: &ConfigArgs) -> eyre::Result<DeployStep> {
    let config = DeployConfig::load(&args.config)?;
    tracing::info!(path = %args.config.display(), "Loaded deploy config");
    Ok(DeployStep::system_config(config))
}

/// Build the constructor arguments and print them; no RPC access.
fn check(args: ConfigArgs) -> eyre::Result<()> {
    output::print_banner("check");
    let step = load_step(&args)?;

    let params = step.constructor_args()?;
    output::print_constructor_args(&params);
    output::print_encoded_args(&params.args.abi_encode());
    Ok(())
}

async fn deploy(args: DeployArgs) -> eyre::Result<()> {
    output::print_banner("deploy");
    let step = load_step(&args.config)?;
    if !step.matches_tags(&args.tags) {
        tracing::info!(step = step.name, requested = ?args.tags, "Skipping deploy step");
        output::print_skipped(step.name, &args.tags);
        return Ok(());
    }

    // Fail on bad config before loading keys or connecting.
    let params = step.constructor_args()?;
    output::print_constructor_args(&params);

    let creation_code: Bytes = artifact::load_creation_code(&args.artifact)?;
    let signer = args.key.signer()?;
    let deployer_address = signer.address();
    output::print_connection(Some(&deployer_address), &args.rpc.rpc_url);

    let provider = connect_with_signer(&args.rpc.rpc_url, signer).await?;
    let orchestrator =
        Orchestrator::new(ProviderDeployer::new(provider, creation_code), args.tags.clone());

    match orchestrator.run(&step).await {
        Ok(StepOutcome::Skipped { name }) => {
            output::print_skipped(name, &args.tags);
            Ok(())
        }
        Ok(StepOutcome::Deployed(deployed)) => {
            output::print_verification_report(&deployed.report);
            output::print_deployed(&deployed.address());
            Ok(())
        }
        Err(err) => {
            output::print_failure(&err);
            Err(err.into())
        }
    }
}

async fn verify(args: VerifyArgs) -> eyre::Result<()> {
    output::print_banner("verify");
    let step = load_step(&args.config)?;
    output::print_connection(None, &args.rpc.rpc_url);

    let provider = connect_read_only(&args.rpc.rpc_url).await?;
    let instance = ProviderSystemConfig::new(args.address, provider);
    tracing::info!(step = step.name, address = %args.address, "Verifying existing deployment");

    match step.post_deploy(&instance).await {
        Ok(report) => {
            output::print_verification_report(&report);
            Ok(())
        }
        Err(err) => {
            output::print_failure(&err);
            Err(err.into())
        }
    }
}
