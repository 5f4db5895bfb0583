use alloy_primitives::U256;
use thiserror::Error;

/// Errors raised while building constructor arguments, before any chain access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Genesis gas limit leaves no room for a full system transaction
    #[error("L2 genesis block gas limit must be at least {minimum}, got {actual}")]
    GasLimitTooLow {
        /// systemTxMaxGas + maxResourceLimit
        minimum: U256,
        /// Value from the deploy config
        actual: U256,
    },

    /// A resource config divisor/multiplier is zero
    #[error("Resource config {field} must be at least 1")]
    ZeroResourceParameter {
        /// Offending field name
        field: &'static str,
    },

    /// Minimum base fee above maximum base fee
    #[error("Resource config minimumBaseFee {minimum} exceeds maximumBaseFee {maximum}")]
    BaseFeeBoundsInverted {
        /// Configured minimum base fee
        minimum: u128,
        /// Configured maximum base fee
        maximum: u128,
    },
}
