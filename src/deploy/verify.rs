use super::errors::{DeployError, VerificationError};
use super::SystemConfigReader;
use crate::params::BuiltParams;
use alloy_primitives::Address;
use std::fmt::Display;

/// A field whose on-chain value matched the deployed argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedField {
    /// Getter (or `resourceConfig` member) name
    pub field: &'static str,
    /// Value observed on chain
    pub value: String,
}

/// Fields verified against a deployed SystemConfig, in check order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Address of the verified contract
    pub address: Address,
    /// Every field that matched
    pub fields: Vec<CheckedField>,
}

impl VerificationReport {
    fn new(address: Address) -> Self {
        Self { address, fields: Vec::new() }
    }

    fn check<T: PartialEq + Display>(
        &mut self,
        field: &'static str,
        expected: T,
        observed: T,
    ) -> Result<(), VerificationError> {
        if expected != observed {
            tracing::error!(field, %expected, %observed, "SystemConfig field mismatch");
            return Err(VerificationError {
                field,
                expected: expected.to_string(),
                observed: observed.to_string(),
            });
        }
        tracing::debug!(field, value = %observed, "SystemConfig field verified");
        self.fields.push(CheckedField { field, value: observed.to_string() });
        Ok(())
    }
}

/// Read every configured value back from `instance` and compare it with `params`.
///
/// Checks run one at a time in a fixed order and stop at the first mismatch,
/// so a failure on `overhead` means nothing after it was read.
pub async fn verify_deployment<R>(
    instance: &R,
    params: &BuiltParams,
) -> Result<VerificationReport, DeployError>
where
    R: SystemConfigReader + ?Sized,
{
    let args = &params.args;
    let mut report = VerificationReport::new(instance.address());

    report.check("owner", args.owner, instance.owner().await?)?;
    report.check("overhead", args.overhead, instance.overhead().await?)?;
    report.check("scalar", args.scalar, instance.scalar().await?)?;
    report.check("batcherHash", params.batcher_hash, instance.batcher_hash().await?)?;
    report.check(
        "unsafeBlockSigner",
        args.unsafe_block_signer,
        instance.unsafe_block_signer().await?,
    )?;

    let expected = &args.resource_config;
    let observed = instance.resource_config().await?;
    report.check(
        "resourceConfig.maxResourceLimit",
        expected.maxResourceLimit,
        observed.maxResourceLimit,
    )?;
    report.check(
        "resourceConfig.elasticityMultiplier",
        expected.elasticityMultiplier,
        observed.elasticityMultiplier,
    )?;
    report.check(
        "resourceConfig.baseFeeMaxChangeDenominator",
        expected.baseFeeMaxChangeDenominator,
        observed.baseFeeMaxChangeDenominator,
    )?;
    report.check(
        "resourceConfig.systemTxMaxGas",
        expected.systemTxMaxGas,
        observed.systemTxMaxGas,
    )?;
    report.check(
        "resourceConfig.minimumBaseFee",
        expected.minimumBaseFee,
        observed.minimumBaseFee,
    )?;
    report.check(
        "resourceConfig.maximumBaseFee",
        expected.maximumBaseFee,
        observed.maximumBaseFee,
    )?;

    Ok(report)
}
