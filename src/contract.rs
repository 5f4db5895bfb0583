//! SystemConfig contract bindings.
//!
//! Only the constructor shape and the getters read back after deployment are
//! bound here. The creation bytecode comes from a compiled artifact, see
//! [`crate::artifact`].

use alloy_sol_types::sol;

sol! {
    /// Gas-market resource accounting parameters of the L2 chain.
    ///
    /// Mirrors `SystemConfig.ResourceConfig` field for field, including widths.
    #[derive(Debug, PartialEq, Eq)]
    struct ResourceConfig {
        uint32 maxResourceLimit;
        uint8 elasticityMultiplier;
        uint8 baseFeeMaxChangeDenominator;
        uint32 systemTxMaxGas;
        uint128 minimumBaseFee;
        uint128 maximumBaseFee;
    }

    /// Read interface of a deployed `SystemConfig`.
    #[sol(rpc)]
    interface ISystemConfig {
        /// Returns the owner of the contract.
        function owner() external view returns (address);

        /// Returns the L2 fee overhead.
        function overhead() external view returns (uint256);

        /// Returns the L2 fee scalar.
        function scalar() external view returns (uint256);

        /// Returns the identifier of the authorized batch submitter.
        function batcherHash() external view returns (bytes32);

        /// Returns the address allowed to sign unsafe blocks.
        function unsafeBlockSigner() external view returns (address);

        /// Returns the resource metering parameters.
        function resourceConfig() external view returns (ResourceConfig memory);
    }
}
