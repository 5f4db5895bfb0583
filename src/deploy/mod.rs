//! SystemConfig deployment and post-deploy verification.
//!
//! Flow:
//!   BuiltParams → SystemConfigDeployer::deploy (submit, wait for receipt)
//!   ↓
//!   verify_deployment reads owner, overhead, scalar, batcherHash,
//!   unsafeBlockSigner, resourceConfig back and compares them one by one
//!   ↓
//!   DeployedSystemConfig, or the first mismatch as a VerificationError
//!
//! A verification failure does not undo the deployment: the contract stays on
//! chain and only the procedure is reported as failed.

pub mod errors;
#[cfg(test)]
pub(crate) mod mock;
pub mod provider;
pub mod verify;

pub use errors::{DeployError, VerificationError};
pub use provider::{ProviderDeployer, ProviderSystemConfig};
pub use verify::{verify_deployment, CheckedField, VerificationReport};

use crate::contract::ResourceConfig;
use crate::params::{BuiltParams, ConstructorArgs};
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;

/// Side-effect-free getters of a deployed SystemConfig.
///
/// In production: implemented by [`ProviderSystemConfig`] (`eth_call`)
/// In tests: implemented by an in-memory contract
#[async_trait]
pub trait SystemConfigReader: Send + Sync {
    /// Address of the contract instance
    fn address(&self) -> Address;
    /// `owner()`
    async fn owner(&self) -> Result<Address, DeployError>;
    /// `overhead()`
    async fn overhead(&self) -> Result<U256, DeployError>;
    /// `scalar()`
    async fn scalar(&self) -> Result<U256, DeployError>;
    /// `batcherHash()`
    async fn batcher_hash(&self) -> Result<B256, DeployError>;
    /// `unsafeBlockSigner()`
    async fn unsafe_block_signer(&self) -> Result<Address, DeployError>;
    /// `resourceConfig()`
    async fn resource_config(&self) -> Result<ResourceConfig, DeployError>;
}

/// Submits SystemConfig creation transactions.
#[async_trait]
pub trait SystemConfigDeployer: Send + Sync {
    /// Handle returned for a created contract
    type Instance: SystemConfigReader;

    /// Send the creation transaction and wait until it is mined.
    ///
    /// Errors are returned as-is; retries are the transport's business.
    async fn deploy(&self, args: &ConstructorArgs) -> Result<Self::Instance, DeployError>;

    /// Handle to an already deployed contract.
    fn attach(&self, address: Address) -> Self::Instance;
}

/// A SystemConfig that was deployed and fully verified
#[derive(Debug)]
pub struct DeployedSystemConfig<I> {
    /// Handle to the on-chain instance
    pub instance: I,
    /// Fields checked after deployment
    pub report: VerificationReport,
}

impl<I: SystemConfigReader> DeployedSystemConfig<I> {
    /// Address of the deployed contract.
    pub fn address(&self) -> Address {
        self.instance.address()
    }
}

/// Deploy a SystemConfig with `params` and verify every field on chain.
pub async fn execute<D>(
    deployer: &D,
    params: &BuiltParams,
) -> Result<DeployedSystemConfig<D::Instance>, DeployError>
where
    D: SystemConfigDeployer + ?Sized,
{
    tracing::info!(
        owner = %params.args.owner,
        gas_limit = %params.args.gas_limit,
        "Deploying SystemConfig"
    );
    let instance = deployer.deploy(&params.args).await?;
    let address = instance.address();
    tracing::info!(%address, "SystemConfig deployed, verifying on-chain state");

    let report = verify_deployment(&instance, params).await.inspect_err(|err| {
        tracing::error!(%address, %err, "SystemConfig deployed but verification failed");
    })?;
    tracing::info!(%address, checked = report.fields.len(), "SystemConfig verified");

    Ok(DeployedSystemConfig { instance, report })
}
