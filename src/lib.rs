//! # SystemConfig deployer
//!
//! One-shot deployment of the L1 `SystemConfig` contract with post-deploy
//! verification: every constructor argument is read back from the chain and
//! compared before the deployment is reported as successful.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod constants;
pub mod contract;
pub mod deploy;
pub mod harness;
pub mod keystore;
pub mod output;
pub mod params;

pub use config::DeployConfig;
pub use contract::ResourceConfig;
pub use deploy::{execute, DeployError, VerificationError};
pub use params::{build, BuiltParams, ConfigurationError, ConstructorArgs};
