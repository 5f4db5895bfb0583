use crate::contract::ResourceConfig;

/// Name the deployment is registered under with the deployment harness
pub const SYSTEM_CONFIG_NAME: &str = "SystemConfig";
/// Tags the SystemConfig implementation deployment is grouped under
pub const SYSTEM_CONFIG_TAGS: &[&str] = &["SystemConfigImpl", "setup", "l1"];
/// One gwei in wei
pub const GWEI: u128 = 1_000_000_000;
/// Ceiling of every uint128 field in the resource config (2^128 - 1)
pub const UINT128_MAX: u128 = u128::MAX;

/// Resource metering parameters baked into every SystemConfig deployment.
///
/// These are never read from the deploy config file. Changing any of them
/// changes the gas market of the L2 chain.
pub const DEFAULT_RESOURCE_CONFIG: ResourceConfig = ResourceConfig {
    maxResourceLimit: 20_000_000,
    elasticityMultiplier: 10,
    baseFeeMaxChangeDenominator: 8,
    minimumBaseFee: GWEI,
    systemTxMaxGas: 1_000_000,
    maximumBaseFee: UINT128_MAX,
};
