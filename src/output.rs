//! Colored console output for the SystemConfig deployer.
//!
//! Color scheme: blue+bold headers, cyan values, green success,
//! yellow warnings, red failures, dimmed secondary text.

use crate::deploy::{DeployError, VerificationReport};
use crate::params::{batcher_hash_hex, gas_limit_lower_bound, BuiltParams};
use alloy_primitives::{hex, Address, Bytes};
use colored::Colorize;

// ── Banner ─────────────────────────────────────────────────────────

/// Print the startup banner.
pub fn print_banner(command: &str) {
    println!();
    println!("{}", "=== SystemConfig Deployer ===".blue().bold());
    println!("  Command:      {}", command.cyan());
}

/// Print the deployer account and RPC endpoint.
pub fn print_connection(deployer: Option<&Address>, rpc_url: &str) {
    println!("  RPC:          {}", rpc_url.cyan());
    if let Some(deployer) = deployer {
        println!("  Deployer:     {}", format!("{deployer}").cyan());
    }
}

// ── Constructor arguments ──────────────────────────────────────────

/// Print the built constructor arguments.
pub fn print_constructor_args(params: &BuiltParams) {
    let args = &params.args;
    let rc = &args.resource_config;

    println!();
    println!("{}", "Constructor arguments:".blue().bold());
    println!("  {} {}", "owner:            ".dimmed(), format!("{}", args.owner).cyan());
    println!("  {} {}", "overhead:         ".dimmed(), args.overhead.to_string().cyan());
    println!("  {} {}", "scalar:           ".dimmed(), args.scalar.to_string().cyan());
    println!(
        "  {} {}",
        "batcherHash:      ".dimmed(),
        batcher_hash_hex(&params.batcher_hash).cyan()
    );
    println!(
        "  {} {} {}",
        "gasLimit:         ".dimmed(),
        args.gas_limit.to_string().cyan(),
        format!("(min {})", gas_limit_lower_bound(rc)).dimmed()
    );
    println!(
        "  {} {}",
        "unsafeBlockSigner:".dimmed(),
        format!("{}", args.unsafe_block_signer).cyan()
    );
    println!("  {}", "resourceConfig:".dimmed());
    println!("    maxResourceLimit:            {}", rc.maxResourceLimit.to_string().cyan());
    println!("    elasticityMultiplier:        {}", rc.elasticityMultiplier.to_string().cyan());
    println!(
        "    baseFeeMaxChangeDenominator: {}",
        rc.baseFeeMaxChangeDenominator.to_string().cyan()
    );
    println!("    systemTxMaxGas:              {}", rc.systemTxMaxGas.to_string().cyan());
    println!("    minimumBaseFee:              {}", rc.minimumBaseFee.to_string().cyan());
    println!("    maximumBaseFee:              {}", rc.maximumBaseFee.to_string().cyan());
}

/// Print ABI-encoded constructor arguments.
pub fn print_encoded_args(encoded: &Bytes) {
    println!();
    println!("{}", "Encoded constructor arguments:".blue().bold());
    println!("  {}", hex::encode_prefixed(encoded).dimmed());
}

// ── Outcome ────────────────────────────────────────────────────────

/// Print a step skipped by tag selection.
pub fn print_skipped(step: &str, tags: &[String]) {
    println!(
        "  {} {} not selected by --tags {}",
        "SKIP".yellow().bold(),
        step.cyan(),
        tags.join(",").dimmed()
    );
}

/// Print every verified field.
pub fn print_verification_report(report: &VerificationReport) {
    println!();
    println!(
        "{} {}",
        "Verified SystemConfig at".blue().bold(),
        format!("{}", report.address).cyan()
    );
    for checked in &report.fields {
        println!("  {} {:<44} {}", "OK".green().bold(), checked.field, checked.value.dimmed());
    }
}

/// Print the final success line.
pub fn print_deployed(address: &Address) {
    println!();
    println!(
        "  {} SystemConfig deployed and verified: {}",
        "OK".green().bold(),
        format!("{address}").cyan()
    );
}

/// Print a fatal error, noting when the contract remains on chain.
pub fn print_failure(err: &DeployError) {
    println!();
    println!("  {} {}", "FAILED:".red().bold(), err);
    if let DeployError::Verification(mismatch) = err {
        println!("    field:    {}", mismatch.field.cyan());
        println!("    expected: {}", mismatch.expected.green());
        println!("    observed: {}", mismatch.observed.red());
    }
    if err.left_contract_deployed() {
        println!(
            "  {} {}",
            "WARNING:".yellow().bold(),
            "The contract is deployed on chain; it was not rolled back.".dimmed()
        );
    }
}
