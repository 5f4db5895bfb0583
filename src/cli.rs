use crate::keystore;
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use clap::{Args, Parser, Subcommand};
use eyre::{bail, Context, Result};
use std::path::PathBuf;

/// CLI arguments for the SystemConfig deployer
#[derive(Parser, Debug)]
#[command(name = "system-config-deploy", about = "Deploy and verify the SystemConfig contract")]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as newline-delimited JSON instead of human-readable output.
    ///
    /// Log verbosity follows RUST_LOG (default: info).
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build constructor arguments, deploy SystemConfig and verify it on chain
    Deploy(DeployArgs),
    /// Build and print constructor arguments without touching the chain
    Check(ConfigArgs),
    /// Run the post-deploy verification against an existing SystemConfig
    Verify(VerifyArgs),
}

/// Deploy config location
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the deploy config JSON file
    #[arg(long, env = "DEPLOY_CONFIG")]
    pub config: PathBuf,
}

/// L1 RPC endpoint
#[derive(Args, Debug)]
pub struct RpcArgs {
    /// L1 JSON-RPC URL (http, ws or ipc)
    #[arg(long, env = "L1_RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,
}

/// Deployer key source: a raw key or an encrypted keystore
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Deployer private key (hex, with or without 0x prefix).
    /// Can also be set via DEPLOYER_PRIVATE_KEY environment variable.
    #[arg(
        long,
        env = "DEPLOYER_PRIVATE_KEY",
        conflicts_with = "keystore",
        hide_env_values = true
    )]
    pub private_key: Option<String>,

    /// Path to an encrypted V3 keystore holding the deployer key
    #[arg(long)]
    pub keystore: Option<PathBuf>,

    /// Keystore password.
    /// Can also be set via KEYSTORE_PASSWORD environment variable.
    #[arg(long, env = "KEYSTORE_PASSWORD", requires = "keystore", hide_env_values = true)]
    pub keystore_password: Option<String>,
}

impl KeyArgs {
    /// Resolve the deployer signer.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        if let Some(key) = &self.private_key {
            return key
                .trim()
                .parse::<PrivateKeySigner>()
                .map_err(|_| eyre::eyre!("Invalid deployer private key"));
        }
        if let Some(path) = &self.keystore {
            let Some(password) = &self.keystore_password else {
                bail!("--keystore requires --keystore-password or KEYSTORE_PASSWORD");
            };
            return keystore::load_signer(path, password)
                .wrap_err_with(|| format!("Failed to unlock keystore {}", path.display()));
        }
        bail!("No deployer key: set --private-key / DEPLOYER_PRIVATE_KEY or --keystore")
    }
}

/// Arguments of `deploy`
#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Compiled SystemConfig artifact (forge or hardhat JSON)
    #[arg(long, env = "SYSTEM_CONFIG_ARTIFACT")]
    pub artifact: PathBuf,

    /// Only run deploy steps carrying one of these tags (comma-separated).
    /// Example: --tags setup,l1
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

/// Arguments of `verify`
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub rpc: RpcArgs,

    /// Address of the deployed SystemConfig
    #[arg(long)]
    pub address: Address,
}
