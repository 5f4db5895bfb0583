//! Constructor argument builder.
//!
//! Turns a [`DeployConfig`] plus the fixed [`ResourceConfig`] into the exact
//! argument tuple passed to the `SystemConfig` constructor. This is a pure
//! function: it either returns arguments or a [`ConfigurationError`], and the
//! chain is never touched on the error path.

pub mod errors;

pub use errors::ConfigurationError;

use crate::config::DeployConfig;
use crate::contract::ResourceConfig;
use alloy_primitives::{hex, Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;

/// Arguments of the `SystemConfig` constructor, in ABI order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorArgs {
    /// `_owner`
    pub owner: Address,
    /// `_overhead`
    pub overhead: U256,
    /// `_scalar`
    pub scalar: U256,
    /// `_batcherHash`
    pub batcher_hash: B256,
    /// `_gasLimit`
    pub gas_limit: U256,
    /// `_unsafeBlockSigner`
    pub unsafe_block_signer: Address,
    /// `_config`
    pub resource_config: ResourceConfig,
}

impl ConstructorArgs {
    /// ABI-encode the arguments as constructor parameters (no selector).
    ///
    /// Appended to the creation bytecode to form the deployment calldata.
    pub fn abi_encode(&self) -> Bytes {
        (
            self.owner,
            self.overhead,
            self.scalar,
            self.batcher_hash,
            self.gas_limit,
            self.unsafe_block_signer,
            self.resource_config.clone(),
        )
            .abi_encode_params()
            .into()
    }
}

/// Output of [`build`]: the constructor arguments plus the batcher hash kept
/// aside for post-deploy verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltParams {
    /// Constructor arguments
    pub args: ConstructorArgs,
    /// Expected `batcherHash()` of the deployed contract
    pub batcher_hash: B256,
}

/// Compute the batcher hash for a batch sender address.
///
/// The address is left-padded with zeros to 32 bytes.
pub fn batcher_hash(batch_sender: Address) -> B256 {
    batch_sender.into_word()
}

/// Render a batcher hash as `0x`-prefixed lower-case hex (66 characters).
pub fn batcher_hash_hex(hash: &B256) -> String {
    hex::encode_prefixed(hash)
}

/// Smallest genesis gas limit that still fits a fully metered block plus the
/// system transaction allowance.
pub fn gas_limit_lower_bound(resource_config: &ResourceConfig) -> U256 {
    U256::from(resource_config.systemTxMaxGas) + U256::from(resource_config.maxResourceLimit)
}

/// Build the `SystemConfig` constructor arguments.
///
/// Fails with [`ConfigurationError::GasLimitTooLow`] when
/// `l2GenesisBlockGasLimit < systemTxMaxGas + maxResourceLimit`.
pub fn build(
    config: &DeployConfig,
    resource_config: &ResourceConfig,
) -> Result<BuiltParams, ConfigurationError> {
    validate_resource_config(resource_config)?;

    let batcher_hash = batcher_hash(config.batch_sender_address);

    let minimum = gas_limit_lower_bound(resource_config);
    let actual = config.l2_genesis_block_gas_limit;
    if actual < minimum {
        return Err(ConfigurationError::GasLimitTooLow { minimum, actual });
    }

    let args = ConstructorArgs {
        owner: config.final_system_owner,
        overhead: config.gas_price_oracle_overhead,
        scalar: config.gas_price_oracle_scalar,
        batcher_hash,
        gas_limit: actual,
        unsafe_block_signer: config.p2p_sequencer_address,
        resource_config: resource_config.clone(),
    };

    tracing::debug!(
        batcher_hash = %batcher_hash_hex(&batcher_hash),
        gas_limit = %actual,
        lower_bound = %minimum,
        "Built SystemConfig constructor arguments"
    );

    Ok(BuiltParams { args, batcher_hash })
}

fn validate_resource_config(resource_config: &ResourceConfig) -> Result<(), ConfigurationError> {
    if resource_config.elasticityMultiplier == 0 {
        return Err(ConfigurationError::ZeroResourceParameter { field: "elasticityMultiplier" });
    }
    if resource_config.baseFeeMaxChangeDenominator == 0 {
        return Err(ConfigurationError::ZeroResourceParameter {
            field: "baseFeeMaxChangeDenominator",
        });
    }
    if resource_config.minimumBaseFee > resource_config.maximumBaseFee {
        return Err(ConfigurationError::BaseFeeBoundsInverted {
            minimum: resource_config.minimumBaseFee,
            maximum: resource_config.maximumBaseFee,
        });
    }
    Ok(())
}
