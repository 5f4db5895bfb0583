use crate::params::ConfigurationError;
use alloy_primitives::B256;
use thiserror::Error;

/// A read-back value of the deployed contract disagrees with what was deployed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SystemConfig.{field} mismatch: expected {expected}, observed {observed}")]
pub struct VerificationError {
    /// Getter (or `resourceConfig` member) that mismatched
    pub field: &'static str,
    /// Value passed to the constructor
    pub expected: String,
    /// Value read from the chain
    pub observed: String,
}

/// Errors that abort the deploy procedure
#[derive(Debug, Error)]
pub enum DeployError {
    /// Arguments could not be built; nothing was sent
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Contract deployed but state does not match
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// RPC connection or transaction submission failed
    #[error("RPC transport error: {0}")]
    Transport(#[from] alloy_transport::TransportError),

    /// Waiting for the creation receipt failed
    #[error("Deployment receipt unavailable: {0}")]
    Receipt(#[from] alloy_provider::PendingTransactionError),

    /// Creation transaction was mined but reverted
    #[error("Deployment transaction {0} reverted")]
    Reverted(B256),

    /// Receipt carries no created contract address
    #[error("Receipt of deployment transaction {0} has no contract address")]
    MissingContractAddress(B256),

    /// A getter call against the deployed contract failed
    #[error("Call to SystemConfig.{method} failed: {source}")]
    Read {
        /// Getter name
        method: &'static str,
        /// Contract call error
        #[source]
        source: alloy_contract::Error,
    },
}

impl DeployError {
    /// True when the contract exists on chain even though the procedure failed.
    pub fn left_contract_deployed(&self) -> bool {
        matches!(self, Self::Verification(_) | Self::Read { .. })
    }
}
